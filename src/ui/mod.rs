//! UI module for rendering the TUI

mod components;
pub mod forms;
mod layout;
mod map_widget;
mod orphanages_map;
mod title;

pub use layout::content_area;
pub use orphanages_map::create_button_area;

use crate::app::App;
use crate::state::View;
use components::{render_error_dialog, render_file_dialog, render_notice_dialog};
use ratatui::Frame;

/// Heading shown above each page
fn page_title(view: View) -> &'static str {
    match view {
        View::OrphanagesMap => "Orphanages",
        View::CreateOrphanage => "Register an orphanage",
    }
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (header_area, main_area) = layout::create_layout(area);

    title::render_title(frame, header_area, page_title(app.state.current_view));

    // Draw main content based on current view
    match app.state.current_view {
        View::OrphanagesMap => orphanages_map::draw(frame, main_area, app),
        View::CreateOrphanage => forms::draw_create_orphanage(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Modal overlays, one at a time
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    } else if let Some(notice) = &app.state.notice {
        render_notice_dialog(frame, &notice.message);
    } else if let Some(dialog) = &app.state.file_dialog {
        render_file_dialog(frame, &dialog.input);
    }
}
