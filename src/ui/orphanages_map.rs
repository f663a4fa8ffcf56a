//! Landing page: the orphanages map

use super::components::{render_action_button, BUTTON_HEIGHT};
use super::map_widget::{render_map, MapPanel};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Width of the aside panel
const ASIDE_WIDTH: u16 = 32;
/// Width of the create button
const CREATE_BUTTON_WIDTH: u16 = 7;

/// Split the page into aside (left) and map (right)
fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(ASIDE_WIDTH), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Area of the "+" button, in the bottom-right corner of the map
pub fn create_button_area(content: Rect) -> Rect {
    let (_, map) = split(content);
    let width = CREATE_BUTTON_WIDTH.min(map.width);
    let height = BUTTON_HEIGHT.min(map.height);
    Rect {
        x: map.right().saturating_sub(width + 2).max(map.x),
        y: map.bottom().saturating_sub(height + 1).max(map.y),
        width,
        height,
    }
}

/// Draw the landing page
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let (aside_area, map_area) = split(area);

    draw_aside(frame, aside_area);

    render_map(
        frame,
        map_area,
        MapPanel {
            title: "Map",
            viewport: &app.state.landing_map,
            marker: None,
            show_cursor: false,
            focused: false,
        },
        &app.config,
    );

    render_action_button(
        frame,
        create_button_area(area),
        "+",
        true,
        true,
        Some(Color::Cyan),
    );
}

fn draw_aside(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Header
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(inner);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Choose an orphanage on the map",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Many children are waiting for your visit :)",
            Style::default().fg(Color::Gray),
        )),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(header, chunks[0]);

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(
            "Belo Horizonte",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Minas Gerais"),
    ]);
    frame.render_widget(footer, chunks[1]);
}
