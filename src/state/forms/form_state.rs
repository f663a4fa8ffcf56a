//! Registration form state and submission state machine

use super::field::RegistrationField;
use crate::state::{
    DraftOrphanage, MapViewport, OrphanageSubmission, Position, PreviewRegistry, SelectedImage,
    CREATE_MAP_CENTER, DEFAULT_ZOOM,
};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Where a registration is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    Submitting,
    Submitted,
}

/// Result of one submission, delivered back to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded,
    Failed { reason: String },
}

/// Outcome tagged with the form session that submitted it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub session: Uuid,
    pub outcome: SubmissionOutcome,
}

/// Reasons a submit request is rejected before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,
    #[error("This orphanage has already been registered")]
    AlreadySubmitted,
}

/// Action panel buttons
pub const CONFIRM_BUTTON: usize = 0;
pub const CANCEL_BUTTON: usize = 1;
const BUTTON_COUNT: usize = 2;

/// State of the orphanage registration page
#[derive(Debug)]
pub struct RegistrationForm {
    pub draft: DraftOrphanage,
    pub map: MapViewport,
    pub active_field_index: usize,
    /// Which button is selected when on the action panel (0=Confirm, 1=Cancel)
    pub selected_button: usize,
    phase: SubmissionPhase,
    /// Identity of this form session, carried by its submission reports
    session: Uuid,
}

impl RegistrationForm {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            draft: DraftOrphanage::new(registry),
            map: MapViewport::new(CREATE_MAP_CENTER, DEFAULT_ZOOM),
            active_field_index: 0,
            selected_button: CONFIRM_BUTTON,
            phase: SubmissionPhase::Editing,
            session: Uuid::new_v4(),
        }
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn active(&self) -> RegistrationField {
        RegistrationField::from_index(self.active_field_index)
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active() == RegistrationField::Actions
    }

    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % BUTTON_COUNT;
    }

    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = BUTTON_COUNT - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    /// Store the coordinate reported by a map click
    pub fn handle_map_click(&mut self, position: Position) {
        tracing::debug!(
            "Map clicked at ({}, {})",
            position.latitude,
            position.longitude
        );
        self.draft.set_position(position);
    }

    /// Click the map at the current cursor
    pub fn click_map_cursor(&mut self) {
        let position = self.map.cursor_coordinate();
        self.handle_map_click(position);
    }

    /// Replace the selected images.
    ///
    /// `None` or an empty list means nothing was selected and leaves the
    /// draft untouched. Returns whether the selection was applied.
    pub fn handle_select_images(&mut self, files: Option<Vec<PathBuf>>) -> bool {
        let Some(files) = files.filter(|f| !f.is_empty()) else {
            return false;
        };
        tracing::debug!("Selected {} image(s)", files.len());
        let images = files.into_iter().map(SelectedImage::from_path).collect();
        self.draft.replace_images(images);
        true
    }

    /// Type a character into the focused text field
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.active().text_field() {
            self.draft.push_char(field, c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.active().text_field() {
            self.draft.pop_char(field);
        }
    }

    /// Insert a newline in the focused field if it is multiline
    pub fn newline(&mut self) {
        let active = self.active();
        if active.is_multiline() {
            self.input_char('\n');
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Enter the submitting phase and take a snapshot of the draft.
    ///
    /// Rejected while a previous submission is still in flight or after the
    /// registration already succeeded.
    pub fn begin_submit(&mut self) -> Result<OrphanageSubmission, SubmitError> {
        match self.phase {
            SubmissionPhase::Submitting => Err(SubmitError::AlreadySubmitting),
            SubmissionPhase::Submitted => Err(SubmitError::AlreadySubmitted),
            SubmissionPhase::Editing => {
                self.phase = SubmissionPhase::Submitting;
                Ok(self.draft.snapshot())
            }
        }
    }

    /// Apply the outcome of the in-flight submission
    pub fn finish_submit(&mut self, outcome: &SubmissionOutcome) {
        self.phase = match outcome {
            SubmissionOutcome::Succeeded => SubmissionPhase::Submitted,
            SubmissionOutcome::Failed { .. } => SubmissionPhase::Editing,
        };
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        RegistrationField::ALL.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(RegistrationField::ALL.len() - 1);
    }
}
