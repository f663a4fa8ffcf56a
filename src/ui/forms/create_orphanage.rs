//! Orphanage registration page

use super::field_renderer::{draw_field_with_value, draw_image_list, draw_toggle_field};
use crate::app::App;
use crate::state::{
    RegistrationField, RegistrationForm, ABOUT_MAX_CHARS, CANCEL_BUTTON, CONFIRM_BUTTON,
};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use crate::ui::map_widget::{self, MapPanel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Areas of the registration page
struct FormLayout {
    data: Rect,
    visit: Rect,
    actions: Rect,
    map: Rect,
    name: Rect,
    about: Rect,
    images: Rect,
    instructions: Rect,
    opening_hours: Rect,
    open_on_weekends: Rect,
}

fn form_layout(area: Rect) -> FormLayout {
    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    let fieldsets = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[0]);

    let data = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Map
            Constraint::Length(3), // Name
            Constraint::Length(6), // About
            Constraint::Length(5), // Photos
        ])
        .margin(1)
        .split(fieldsets[0]);

    let visit = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Instructions
            Constraint::Length(3), // Opening hours
            Constraint::Length(3), // Open on weekends
        ])
        .margin(1)
        .split(fieldsets[1]);

    FormLayout {
        data: fieldsets[0],
        visit: fieldsets[1],
        actions: main_chunks[1],
        map: data[0],
        name: data[1],
        about: data[2],
        images: data[3],
        instructions: visit[0],
        opening_hours: visit[1],
        open_on_weekends: visit[2],
    }
}

/// Inner map area of the registration page, for mouse hit-testing
pub fn registration_map_area(content: Rect) -> Rect {
    map_widget::inner_area(form_layout(content).map)
}

fn fieldset(title: &str, focused: bool) -> Block<'_> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Draw the registration page
pub fn draw_create_orphanage(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.registration.as_ref() else {
        let empty = Paragraph::new("No registration in progress")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let layout = form_layout(area);
    let active = form.active();

    let data_focused = matches!(
        active,
        RegistrationField::Map
            | RegistrationField::Name
            | RegistrationField::About
            | RegistrationField::Images
    );
    frame.render_widget(fieldset("Data", data_focused), layout.data);
    let visit_focused = !data_focused && active != RegistrationField::Actions;
    frame.render_widget(fieldset("Visit", visit_focused), layout.visit);

    let draft = &form.draft;

    map_widget::render_map(
        frame,
        layout.map,
        MapPanel {
            title: RegistrationField::Map.label(),
            viewport: &form.map,
            marker: Some(draft.position()),
            show_cursor: active == RegistrationField::Map,
            focused: active == RegistrationField::Map,
        },
        &app.config,
    );

    draw_field_with_value(
        frame,
        layout.name,
        RegistrationField::Name.label(),
        draft.name(),
        active == RegistrationField::Name,
        false,
    );

    let about_label = format!(
        "{} ({}/{ABOUT_MAX_CHARS})",
        RegistrationField::About.label(),
        draft.about().chars().count()
    );
    draw_field_with_value(
        frame,
        layout.about,
        &about_label,
        draft.about(),
        active == RegistrationField::About,
        true,
    );

    draw_image_list(
        frame,
        layout.images,
        RegistrationField::Images.label(),
        draft.preview_images(),
        active == RegistrationField::Images,
    );

    draw_field_with_value(
        frame,
        layout.instructions,
        RegistrationField::Instructions.label(),
        draft.instructions(),
        active == RegistrationField::Instructions,
        true,
    );

    draw_field_with_value(
        frame,
        layout.opening_hours,
        RegistrationField::OpeningHours.label(),
        draft.opening_hours(),
        active == RegistrationField::OpeningHours,
        false,
    );

    draw_toggle_field(
        frame,
        layout.open_on_weekends,
        RegistrationField::OpenOnWeekends.label(),
        draft.open_on_weekends(),
        active == RegistrationField::OpenOnWeekends,
    );

    draw_action_panel(frame, layout.actions, form);
}

/// Draw the action panel sidebar
fn draw_action_panel(frame: &mut Frame, area: Rect, form: &RegistrationForm) {
    let is_focused = form.is_buttons_row_active();
    let selected_button = form.selected_button;

    let block = fieldset("Actions", is_focused);
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Confirm (primary)
            Constraint::Length(BUTTON_HEIGHT), // Cancel
            Constraint::Min(0),                // remaining space
        ])
        .split(inner_area);

    let submitting = form.is_submitting();
    render_action_button(
        frame,
        button_chunks[0],
        if submitting { "Submitting..." } else { "Confirm" },
        is_focused && selected_button == CONFIRM_BUTTON,
        !submitting,
        Some(Color::Green),
    );

    render_action_button(
        frame,
        button_chunks[1],
        "Cancel",
        is_focused && selected_button == CANCEL_BUTTON,
        true,
        Some(Color::Gray),
    );
}
