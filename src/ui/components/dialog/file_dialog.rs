//! Path-entry dialog for picking image files

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the image picker with the paths typed so far
pub fn render_file_dialog(frame: &mut Frame, input: &str) {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::styled("Enter", key),
        Span::raw(" select  "),
        Span::styled("Esc", key),
        Span::raw(" cancel"),
    ];

    let message = format!("Image paths, separated by ';'\n\n> {input}▌");

    render_dialog(
        frame,
        DialogConfig {
            title: "Add photos",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            message: &message,
            hint: Some(hint),
            max_width: 70,
        },
    );
}
