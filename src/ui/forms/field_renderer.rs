//! Field rendering utilities for forms

use crate::state::PreviewImage;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(label: &str, is_active: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style(is_active))
}

/// Draw a text field with its current value
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if is_multiline {
        // Trailing newline should show the cursor on a fresh line
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::styled(l.to_string(), style))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    frame.render_widget(
        content
            .wrap(Wrap { trim: false })
            .block(field_block(label, is_active)),
        area,
    );
}

/// Draw a yes/no selector
pub fn draw_toggle_field(frame: &mut Frame, area: Rect, label: &str, value: bool, is_active: bool) {
    let option = |text: &'static str, selected: bool| {
        if selected {
            Span::styled(
                format!(" {text} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(if is_active { Color::Cyan } else { Color::Gray })
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {text} "), Style::default().fg(Color::DarkGray))
        }
    };

    let line = Line::from(vec![
        option("Yes", value),
        Span::raw("  "),
        option("No", !value),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(field_block(label, is_active)),
        area,
    );
}

/// Draw the selected photos as a list of previews
pub fn draw_image_list(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    previews: &[PreviewImage],
    is_active: bool,
) {
    let mut lines: Vec<Line> = previews
        .iter()
        .enumerate()
        .map(|(idx, preview)| {
            Line::from(vec![
                Span::styled(format!("[{}] ", idx + 1), Style::default().fg(Color::Cyan)),
                Span::raw(preview.file_name.as_str()),
            ])
        })
        .collect();

    lines.push(Line::from(Span::styled(
        if is_active { "+ Enter: choose photos" } else { "+" },
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(field_block(label, is_active)),
        area,
    );
}
