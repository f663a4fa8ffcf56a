//! Map panel drawn on a ratatui canvas
//!
//! Canvas units are terminal cells centred on the viewport centre, so a cell
//! offset from [`MapViewport::cell_offset`] plots directly. The centre cell
//! sits at `((w - 1) / 2, (h - 1) / 2)` of the inner area, matching the
//! mouse hit-testing in the app.

use crate::config::AppConfig;
use crate::state::{MapViewport, Position};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders,
    },
    Frame,
};

/// Spacing of the background grid, in cells
const GRID_STEP_X: i32 = 4;
const GRID_STEP_Y: i32 = 2;

/// What to draw in a map panel
pub struct MapPanel<'a> {
    pub title: &'a str,
    pub viewport: &'a MapViewport,
    /// Marker to pin, if any
    pub marker: Option<Position>,
    pub show_cursor: bool,
    pub focused: bool,
}

fn map_block<'a>(title: &'a str, footer: Line<'a>, focused: bool) -> Block<'a> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(format!(" {title} "))
        .title_bottom(footer)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Area available to the canvas inside a map panel
pub fn inner_area(area: Rect) -> Rect {
    map_block("", Line::default(), false).inner(area)
}

/// Canvas bounds that put whole cells on integer coordinates
fn bounds(inner: Rect) -> ([f64; 2], [f64; 2]) {
    let w = f64::from(inner.width.saturating_sub(1));
    let h = f64::from(inner.height.saturating_sub(1));
    let cx = (w / 2.0).floor();
    let cy = (h / 2.0).floor();
    ([-cx, w - cx], [-(h - cy), cy])
}

/// Draw a map panel
pub fn render_map(frame: &mut Frame, area: Rect, panel: MapPanel, config: &AppConfig) {
    let token = if config.map_access_token().is_empty() {
        ""
    } else {
        "…"
    };
    let tile = panel.viewport.tile_url(config.map_tile_url(), token);
    let cursor = panel.viewport.cursor_coordinate();
    let footer = Line::from(vec![
        Span::styled(
            format!(" {:.5}, {:.5} ", cursor.latitude, cursor.longitude),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("{tile} "), Style::default().fg(Color::DarkGray)),
    ]);

    let block = map_block(panel.title, footer, panel.focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Too small to place anything
    if inner.width < 2 || inner.height < 2 {
        return;
    }

    let (x_bounds, y_bounds) = bounds(inner);

    let mut grid = Vec::new();
    let mut x = x_bounds[0] as i32;
    while f64::from(x) <= x_bounds[1] {
        let mut y = y_bounds[0] as i32;
        while f64::from(y) <= y_bounds[1] {
            if x % GRID_STEP_X == 0 && y % GRID_STEP_Y == 0 {
                grid.push((f64::from(x), f64::from(y)));
            }
            y += 1;
        }
        x += 1;
    }

    let marker = panel
        .marker
        .filter(Position::has_marker)
        .map(|position| {
            let (dx, dy) = panel.viewport.cell_offset(position);
            (dx.round(), -dy.round())
        })
        .filter(|(x, y)| {
            (x_bounds[0]..=x_bounds[1]).contains(x) && (y_bounds[0]..=y_bounds[1]).contains(y)
        });
    let (cursor_x, cursor_y) = panel.viewport.cursor;
    let cursor = panel
        .show_cursor
        .then(|| (f64::from(cursor_x), -f64::from(cursor_y)));

    let canvas = Canvas::default()
        .marker(Marker::Block)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &grid,
                color: Color::Rgb(40, 40, 48),
            });
            ctx.layer();
            if let Some((x, y)) = marker {
                ctx.print(
                    x,
                    y,
                    Span::styled("●", Style::default().fg(Color::LightRed)),
                );
            }
            if let Some((x, y)) = cursor {
                ctx.print(
                    x,
                    y,
                    Span::styled(
                        "+",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    frame.render_widget(canvas, inner);
}
