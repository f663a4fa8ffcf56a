//! Application state and core logic

use crate::api::{ApiClient, OrphanageApi};
use crate::config::AppConfig;
use crate::state::{
    AppState, FileDialogState, Form, Notice, RegistrationField, SubmissionOutcome, SubmissionReport,
    View, CANCEL_BUTTON, CONFIRM_BUTTON, POST_SUBMIT_ROUTE,
};
use crate::ui;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position as ScreenPos, Rect};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Message shown once a registration has been accepted
pub const SUCCESS_NOTICE: &str = "Registration completed successfully!";

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Resolved configuration
    pub config: AppConfig,
    /// Orphanage API client
    api: Arc<dyn OrphanageApi>,
    /// Outcomes of spawned submissions, drained by the UI loop
    submissions_tx: mpsc::UnboundedSender<SubmissionReport>,
    submissions_rx: mpsc::UnboundedReceiver<SubmissionReport>,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message
    pub status_message: Option<String>,
    /// Terminal size for hit-testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance talking to the configured API
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = ApiClient::new(config.api_url())?;
        tracing::info!("Using orphanage API at {}", client.base_url());
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create an App with a specific API implementation
    pub fn with_api(config: AppConfig, api: Arc<dyn OrphanageApi>) -> Self {
        let (submissions_tx, submissions_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            config,
            api,
            submissions_tx,
            submissions_rx,
            quit: false,
            status_message: None,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Full terminal area, once the size is known
    fn frame_area(&self) -> Option<Rect> {
        self.terminal_size
            .map(|(height, width)| Rect::new(0, 0, width, height))
    }

    /// Inner area of the registration map panel
    fn registration_map_rect(&self) -> Option<Rect> {
        self.frame_area()
            .map(|area| ui::forms::registration_map_area(ui::content_area(area)))
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if view == self.state.current_view {
            return;
        }
        // Leaving the form discards the draft
        if self.state.current_view.is_form_view() {
            self.state.close_registration();
        }
        tracing::debug!("Navigating to {}", view.route());
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Navigate to an application route
    pub fn push_route(&mut self, route: &str) {
        match View::from_route(route) {
            Some(view) => self.navigate(view),
            None => tracing::warn!("Unknown route {route}"),
        }
    }

    /// Go back to the previous non-form view
    pub fn go_back(&mut self) {
        if self.state.current_view.is_form_view() {
            self.state.close_registration();
        }
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            return;
        }
        self.state.current_view = View::default();
    }

    /// Open a fresh registration form
    pub fn open_create_orphanage(&mut self) {
        self.navigate(View::CreateOrphanage);
        self.state.open_registration();
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Blocking notice (modal)
        if self.state.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.dismiss_notice();
            }
            return Ok(());
        }

        // File picker (modal)
        if self.state.file_dialog.is_some() {
            self.handle_file_dialog_key(key);
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::OrphanagesMap => self.handle_orphanages_map_key(key),
            View::CreateOrphanage => self.handle_create_orphanage_key(key),
        }

        Ok(())
    }

    /// Handle keys on the landing map
    fn handle_orphanages_map_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('n') | KeyCode::Enter => {
                self.open_create_orphanage()
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys on the registration form
    fn handle_create_orphanage_key(&mut self, key: KeyEvent) {
        // Submit shortcut works from any field
        if key.code == KeyCode::Char('s')
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER))
        {
            self.submit_registration();
            return;
        }

        let half_extents = self
            .registration_map_rect()
            .map(|r| {
                (
                    i32::from(r.width.saturating_sub(1)) / 2,
                    i32::from(r.height.saturating_sub(1)) / 2,
                )
            })
            .unwrap_or((0, 0));

        let Some(form) = self.state.registration.as_mut() else {
            if key.code == KeyCode::Esc {
                self.go_back();
            }
            return;
        };

        match key.code {
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Esc => {
                self.go_back();
            }
            _ => match form.active() {
                RegistrationField::Map => {
                    let (hw, hh) = half_extents;
                    match key.code {
                        KeyCode::Left | KeyCode::Char('h') => form.map.move_cursor(-1, 0, hw, hh),
                        KeyCode::Right | KeyCode::Char('l') => form.map.move_cursor(1, 0, hw, hh),
                        KeyCode::Up | KeyCode::Char('k') => form.map.move_cursor(0, -1, hw, hh),
                        KeyCode::Down | KeyCode::Char('j') => form.map.move_cursor(0, 1, hw, hh),
                        KeyCode::Enter | KeyCode::Char(' ') => form.click_map_cursor(),
                        _ => {}
                    }
                }
                RegistrationField::Images => {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Char('+')) {
                        self.state.file_dialog = Some(FileDialogState::default());
                    }
                }
                RegistrationField::OpenOnWeekends => match key.code {
                    KeyCode::Left | KeyCode::Char('y') => form.draft.set_open_on_weekends(true),
                    KeyCode::Right | KeyCode::Char('n') => form.draft.set_open_on_weekends(false),
                    _ => {}
                },
                RegistrationField::Actions => match key.code {
                    KeyCode::Up | KeyCode::Char('k') => form.prev_button(),
                    KeyCode::Down | KeyCode::Char('j') => form.next_button(),
                    KeyCode::Enter => match form.selected_button {
                        CONFIRM_BUTTON => self.submit_registration(),
                        CANCEL_BUTTON => self.go_back(),
                        _ => {}
                    },
                    _ => {}
                },
                _ => match key.code {
                    KeyCode::Char(c) => form.input_char(c),
                    KeyCode::Backspace => form.backspace(),
                    KeyCode::Enter => form.newline(),
                    _ => {}
                },
            },
        }
    }

    /// Handle keys in the file picker dialog
    fn handle_file_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.state.file_dialog.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => dialog.input.push(c),
            KeyCode::Backspace => {
                dialog.input.pop();
            }
            KeyCode::Enter => {
                let files = dialog.selected_files();
                self.state.file_dialog = None;
                self.select_images(files);
            }
            KeyCode::Esc => {
                self.state.file_dialog = None;
                self.select_images(None);
            }
            _ => {}
        }
    }

    /// Deliver a file selection to the form
    fn select_images(&mut self, files: Option<Vec<std::path::PathBuf>>) {
        if let Some(form) = self.state.registration.as_mut() {
            if form.handle_select_images(files) {
                let count = form.draft.images().len();
                self.status_message = Some(format!("{count} photo(s) selected"));
            }
        }
    }

    /// Submit the current draft.
    ///
    /// The request runs on a spawned task; its outcome comes back through
    /// [`App::poll_submission`]. A submit while one is in flight is rejected.
    pub fn submit_registration(&mut self) {
        let Some(form) = self.state.registration.as_mut() else {
            return;
        };

        let submission = match form.begin_submit() {
            Ok(submission) => submission,
            Err(err) => {
                tracing::debug!("Submit rejected: {err}");
                self.status_message = Some(err.to_string());
                return;
            }
        };

        let session = form.session();
        tracing::info!("Submitting orphanage registration '{}'", submission.name);
        self.status_message = Some("Submitting...".to_string());

        let api = Arc::clone(&self.api);
        let tx = self.submissions_tx.clone();
        tokio::spawn(async move {
            let outcome = match api.create_orphanage(submission).await {
                Ok(()) => SubmissionOutcome::Succeeded,
                Err(err) => {
                    tracing::warn!("Orphanage registration failed: {err}");
                    SubmissionOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            // Receiver lives as long as the app
            let _ = tx.send(SubmissionReport { session, outcome });
        });
    }

    /// Apply any finished submissions
    pub fn poll_submission(&mut self) {
        while let Ok(report) = self.submissions_rx.try_recv() {
            self.apply_submission_report(report);
        }
    }

    /// Apply a finished submission.
    ///
    /// Only the form session that submitted is moved along its state machine.
    /// A report for a closed or replaced form is still shown to the user, but
    /// never navigates away from a newer draft.
    fn apply_submission_report(&mut self, report: SubmissionReport) {
        let SubmissionReport { session, outcome } = report;

        let live_form = self
            .state
            .registration
            .as_mut()
            .filter(|form| form.session() == session);
        let is_live = live_form.is_some();
        match live_form {
            Some(form) => form.finish_submit(&outcome),
            None => tracing::debug!("Submission {session} finished after its form was closed"),
        }

        // A newer form may be submitting and owns the status line
        if is_live {
            self.status_message = None;
        }

        match outcome {
            SubmissionOutcome::Succeeded => {
                tracing::info!("Orphanage registered");
                let keeps_other_draft = !is_live && self.state.registration.is_some();
                self.state.notice = Some(Notice {
                    message: SUCCESS_NOTICE.to_string(),
                    then_navigate: (!keeps_other_draft).then_some(POST_SUBMIT_ROUTE),
                });
            }
            SubmissionOutcome::Failed { reason } => {
                self.push_error(format!("Failed to register orphanage: {reason}"));
            }
        }
    }

    /// Close the notice and follow its route, if any
    fn dismiss_notice(&mut self) {
        if let Some(notice) = self.state.notice.take() {
            if let Some(route) = notice.then_navigate {
                self.push_route(route);
                // A finished registration starts a fresh trail
                if route == POST_SUBMIT_ROUTE {
                    self.state.view_history.clear();
                }
            }
        }
    }

    /// Handle mouse events
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Ok(());
        }
        if self.state.has_errors()
            || self.state.notice.is_some()
            || self.state.file_dialog.is_some()
        {
            return Ok(());
        }
        let Some(area) = self.frame_area() else {
            return Ok(());
        };
        let content = ui::content_area(area);
        let click = ScreenPos::new(mouse.column, mouse.row);

        match self.state.current_view {
            View::OrphanagesMap => {
                if ui::create_button_area(content).contains(click) {
                    self.open_create_orphanage();
                }
            }
            View::CreateOrphanage => {
                let map = ui::forms::registration_map_area(content);
                if map.contains(click) {
                    if let Some(form) = self.state.registration.as_mut() {
                        let (cx, cy) = map_center(map);
                        form.map.cursor = (
                            i32::from(mouse.column) - cx,
                            i32::from(mouse.row) - cy,
                        );
                        form.set_active_field(RegistrationField::Map.index());
                        form.click_map_cursor();
                    }
                }
            }
        }

        Ok(())
    }
}

/// Centre cell of a map rect, in screen coordinates
pub fn map_center(area: Rect) -> (i32, i32) {
    (
        i32::from(area.x) + i32::from(area.width.saturating_sub(1)) / 2,
        i32::from(area.y) + i32::from(area.height.saturating_sub(1)) / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockOrphanageApi};
    use crate::state::{Position, SubmissionPhase};
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(mock: MockOrphanageApi) -> App {
        let mut app = App::with_api(AppConfig::default(), Arc::new(mock));
        app.terminal_size = Some((40, 120));
        app
    }

    /// Wait for the next finished submission
    async fn next_report(app: &mut App) -> SubmissionReport {
        app.submissions_rx.recv().await.expect("submission report")
    }

    /// Wait for the in-flight submission and apply its outcome
    async fn settle(app: &mut App) {
        let report = next_report(app).await;
        app.apply_submission_report(report);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn focus(app: &mut App, field: RegistrationField) {
        if let Some(form) = app.state.registration.as_mut() {
            form.set_active_field(field.index());
        }
    }

    fn form(app: &App) -> &crate::state::RegistrationForm {
        app.state.registration.as_ref().expect("registration form")
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_starts_on_landing_map() {
            let app = app_with(MockOrphanageApi::new());
            assert_eq!(app.state.current_view, View::OrphanagesMap);
            assert!(app.state.registration.is_none());
        }

        #[test]
        fn test_plus_opens_registration() {
            let mut app = app_with(MockOrphanageApi::new());
            app.handle_key(key(KeyCode::Char('+'))).unwrap();
            assert_eq!(app.state.current_view, View::CreateOrphanage);
            assert!(app.state.registration.is_some());
        }

        #[test]
        fn test_escape_discards_draft() {
            let mut app = app_with(MockOrphanageApi::new());
            app.open_create_orphanage();
            if let Some(form) = app.state.registration.as_mut() {
                form.handle_select_images(Some(vec![PathBuf::from("a.png")]));
            }
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::OrphanagesMap);
            assert!(app.state.registration.is_none());
            assert_eq!(app.state.previews.live_count(), 0);
        }

        #[test]
        fn test_push_route_unknown_is_ignored() {
            let mut app = app_with(MockOrphanageApi::new());
            app.push_route("/nowhere");
            assert_eq!(app.state.current_view, View::OrphanagesMap);
        }

        #[test]
        fn test_q_quits_from_landing() {
            let mut app = app_with(MockOrphanageApi::new());
            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(app.should_quit());
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn test_typing_fills_focused_field() {
            let mut app = app_with(MockOrphanageApi::new());
            app.open_create_orphanage();
            focus(&mut app, RegistrationField::Name);
            type_text(&mut app, "Casa Feliz");
            assert_eq!(form(&app).draft.name(), "Casa Feliz");
        }

        #[test]
        fn test_weekend_selector() {
            let mut app = app_with(MockOrphanageApi::new());
            app.open_create_orphanage();
            focus(&mut app, RegistrationField::OpenOnWeekends);
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert!(!form(&app).draft.open_on_weekends());
            app.handle_key(key(KeyCode::Left)).unwrap();
            assert!(form(&app).draft.open_on_weekends());
        }

        #[test]
        fn test_enter_on_map_clicks_cursor() {
            let mut app = app_with(MockOrphanageApi::new());
            app.open_create_orphanage();
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();
            let form = form(&app);
            assert_eq!(form.draft.position(), form.map.coordinate_at(1, 0));
            assert!(form.draft.position().has_marker());
        }

        #[test]
        fn test_mouse_click_on_map_sets_position() {
            let mut app = app_with(MockOrphanageApi::new());
            app.open_create_orphanage();
            let map = app.registration_map_rect().unwrap();
            let (cx, cy) = map_center(map);
            app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: (cx + 2) as u16,
                row: (cy + 1) as u16,
                modifiers: KeyModifiers::NONE,
            })
            .unwrap();
            let form = form(&app);
            assert_eq!(form.map.cursor, (2, 1));
            assert_eq!(form.draft.position(), form.map.coordinate_at(2, 1));
        }

        #[test]
        fn test_file_dialog_selects_images() {
            let mut app = app_with(MockOrphanageApi::new());
            app.open_create_orphanage();
            focus(&mut app, RegistrationField::Images);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.state.file_dialog.is_some());
            type_text(&mut app, "/p/a.png;/p/b.jpg");
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert!(app.state.file_dialog.is_none());
            let draft = &form(&app).draft;
            assert_eq!(draft.images().len(), 2);
            assert_eq!(draft.preview_images().len(), 2);
        }

        #[test]
        fn test_cancelled_file_dialog_keeps_images() {
            let mut app = app_with(MockOrphanageApi::new());
            app.open_create_orphanage();
            if let Some(form) = app.state.registration.as_mut() {
                form.handle_select_images(Some(vec![PathBuf::from("a.png")]));
            }
            focus(&mut app, RegistrationField::Images);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(form(&app).draft.images().len(), 1);
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_success_shows_notice_then_navigates() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage().times(1).returning(|_| Ok(()));
            let mut app = app_with(mock);
            app.open_create_orphanage();

            app.handle_key(ctrl('s')).unwrap();
            assert_eq!(form(&app).phase(), SubmissionPhase::Submitting);
            settle(&mut app).await;

            assert_eq!(
                app.state.notice.as_ref().map(|n| n.message.as_str()),
                Some(SUCCESS_NOTICE)
            );
            assert_eq!(app.state.current_view, View::CreateOrphanage);

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.state.notice.is_none());
            assert_eq!(app.state.current_view, View::OrphanagesMap);
            assert!(app.state.registration.is_none());
        }

        #[tokio::test]
        async fn test_casa_feliz_end_to_end() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage()
                .withf(|s| {
                    s.name == "Casa Feliz"
                        && s.position == Position::new(-19.91, -43.96)
                        && s.open_on_weekends
                        && s.images.len() == 2
                        && s.images[0].file_name == "one.png"
                        && s.images[1].file_name == "two.png"
                })
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(mock);
            app.open_create_orphanage();

            focus(&mut app, RegistrationField::Name);
            type_text(&mut app, "Casa Feliz");
            if let Some(form) = app.state.registration.as_mut() {
                form.handle_map_click(Position::new(-19.91, -43.96));
                form.handle_select_images(Some(vec![
                    PathBuf::from("/p/one.png"),
                    PathBuf::from("/p/two.png"),
                ]));
            }
            focus(&mut app, RegistrationField::Actions);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            settle(&mut app).await;

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(
                app.state.current_view,
                View::from_route(POST_SUBMIT_ROUTE).unwrap()
            );
        }

        #[tokio::test]
        async fn test_unclicked_map_still_submits_sentinel() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage()
                .withf(|s| s.position == Position::UNSET)
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(mock);
            app.open_create_orphanage();
            app.submit_registration();
            settle(&mut app).await;
            assert!(app.state.notice.is_some());
        }

        #[tokio::test]
        async fn test_double_submit_sends_one_request() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage().times(1).returning(|_| Ok(()));
            let mut app = app_with(mock);
            app.open_create_orphanage();

            app.submit_registration();
            app.submit_registration();
            assert_eq!(
                app.status_message.as_deref(),
                Some("A submission is already in progress")
            );
            settle(&mut app).await;
            assert_eq!(form(&app).phase(), SubmissionPhase::Submitted);
        }

        #[tokio::test]
        async fn test_failure_keeps_form_editable() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage().times(1).returning(|_| {
                Err(ApiError::Status {
                    status: 500,
                    body: "internal error".to_string(),
                })
            });
            let mut app = app_with(mock);
            app.open_create_orphanage();
            focus(&mut app, RegistrationField::Name);
            type_text(&mut app, "Casa Feliz");

            app.submit_registration();
            settle(&mut app).await;

            assert!(app.state.notice.is_none());
            assert_eq!(app.state.current_view, View::CreateOrphanage);
            assert_eq!(form(&app).phase(), SubmissionPhase::Editing);
            assert_eq!(form(&app).draft.name(), "Casa Feliz");
            let error = app.state.current_error().unwrap_or_default();
            assert!(error.contains("500"));
        }

        #[tokio::test]
        async fn test_retry_after_failure() {
            let mut mock = MockOrphanageApi::new();
            let mut seq = mockall::Sequence::new();
            mock.expect_create_orphanage()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| {
                    Err(ApiError::Status {
                        status: 502,
                        body: String::new(),
                    })
                });
            mock.expect_create_orphanage()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
            let mut app = app_with(mock);
            app.open_create_orphanage();

            app.submit_registration();
            settle(&mut app).await;
            app.handle_key(key(KeyCode::Enter)).unwrap(); // dismiss error
            app.submit_registration();
            settle(&mut app).await;

            assert!(app.state.notice.is_some());
        }

        #[tokio::test]
        async fn test_poll_submission_drains_outcomes() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage().returning(|_| Ok(()));
            let mut app = app_with(mock);
            app.open_create_orphanage();
            app.submit_registration();

            for _ in 0..100 {
                app.poll_submission();
                if app.state.notice.is_some() {
                    break;
                }
                tokio::task::yield_now().await;
            }
            assert!(app.state.notice.is_some());
        }

        #[tokio::test]
        async fn test_success_after_form_closed_still_notifies() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage().times(1).returning(|_| Ok(()));
            let mut app = app_with(mock);
            app.open_create_orphanage();
            app.submit_registration();

            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::OrphanagesMap);
            settle(&mut app).await;

            assert_eq!(
                app.state.notice.as_ref().map(|n| n.message.as_str()),
                Some(SUCCESS_NOTICE)
            );
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::OrphanagesMap);
            assert!(app.state.registration.is_none());
        }

        #[tokio::test]
        async fn test_failure_after_form_closed_is_reported() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage().times(1).returning(|_| {
                Err(ApiError::Status {
                    status: 503,
                    body: String::new(),
                })
            });
            let mut app = app_with(mock);
            app.open_create_orphanage();
            app.submit_registration();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            settle(&mut app).await;

            assert!(app.state.notice.is_none());
            assert!(app.state.registration.is_none());
            let error = app.state.current_error().unwrap_or_default();
            assert!(error.contains("503"));
        }

        /// Submit a form named `first`, leave it, then submit a new form
        /// named `second`. Returns both reports, stale one first.
        async fn submit_twice(app: &mut App) -> (SubmissionReport, SubmissionReport) {
            app.open_create_orphanage();
            focus(app, RegistrationField::Name);
            type_text(app, "first");
            app.submit_registration();
            app.handle_key(key(KeyCode::Esc)).unwrap();

            app.open_create_orphanage();
            focus(app, RegistrationField::Name);
            type_text(app, "second");
            app.submit_registration();
            let live_session = form(app).session();

            let a = next_report(app).await;
            let b = next_report(app).await;
            if a.session == live_session {
                (b, a)
            } else {
                (a, b)
            }
        }

        #[tokio::test]
        async fn test_stale_failure_keeps_new_form_submitting() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage()
                .withf(|s| s.name == "first")
                .times(1)
                .returning(|_| {
                    Err(ApiError::Status {
                        status: 500,
                        body: String::new(),
                    })
                });
            mock.expect_create_orphanage()
                .withf(|s| s.name == "second")
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(mock);
            let (stale, live) = submit_twice(&mut app).await;

            app.apply_submission_report(stale);
            assert_eq!(form(&app).phase(), SubmissionPhase::Submitting);
            assert!(app.state.has_errors());
            app.handle_key(key(KeyCode::Enter)).unwrap(); // dismiss error

            // Guard still holds: no second request for the new form
            app.submit_registration();
            assert_eq!(
                app.status_message.as_deref(),
                Some("A submission is already in progress")
            );

            app.apply_submission_report(live);
            assert_eq!(form(&app).phase(), SubmissionPhase::Submitted);
        }

        #[tokio::test]
        async fn test_stale_success_does_not_lock_new_form() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage()
                .withf(|s| s.name == "first")
                .times(1)
                .returning(|_| Ok(()));
            mock.expect_create_orphanage()
                .withf(|s| s.name == "second")
                .times(1)
                .returning(|_| {
                    Err(ApiError::Status {
                        status: 500,
                        body: String::new(),
                    })
                });
            let mut app = app_with(mock);
            let (stale, live) = submit_twice(&mut app).await;

            app.apply_submission_report(stale);
            assert_eq!(form(&app).phase(), SubmissionPhase::Submitting);
            assert!(app.state.notice.is_some());

            // Dismissing the earlier success keeps the new draft open
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::CreateOrphanage);
            assert_eq!(form(&app).draft.name(), "second");

            app.apply_submission_report(live);
            assert_eq!(form(&app).phase(), SubmissionPhase::Editing);
            assert!(app.state.has_errors());
        }

        #[tokio::test]
        async fn test_post_submit_navigation_resets_history() {
            let mut mock = MockOrphanageApi::new();
            mock.expect_create_orphanage().times(2).returning(|_| Ok(()));
            let mut app = app_with(mock);

            for _ in 0..2 {
                app.open_create_orphanage();
                app.submit_registration();
                settle(&mut app).await;
                app.handle_key(key(KeyCode::Enter)).unwrap();
                assert_eq!(app.state.current_view, View::OrphanagesMap);
                assert!(app.state.view_history.is_empty());
            }
        }

        #[test]
        fn test_submit_without_form_is_noop() {
            let mut app = app_with(MockOrphanageApi::new());
            app.submit_registration();
            assert!(app.status_message.is_none());
        }
    }
}
