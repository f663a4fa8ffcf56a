//! Application state definitions

use super::forms::RegistrationForm;
use super::map::{MapViewport, DEFAULT_ZOOM, LANDING_MAP_CENTER};
use super::previews::PreviewRegistry;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Landing map of orphanages (`/app`)
    #[default]
    OrphanagesMap,
    /// Registration form (`/orphanages/create`)
    CreateOrphanage,
}

impl View {
    /// Application route for this view
    pub fn route(&self) -> &'static str {
        match self {
            Self::OrphanagesMap => "/app",
            Self::CreateOrphanage => "/orphanages/create",
        }
    }

    /// Resolve an application route
    pub fn from_route(route: &str) -> Option<Self> {
        match route.trim_end_matches('/') {
            "/app" => Some(Self::OrphanagesMap),
            "/orphanages/create" => Some(Self::CreateOrphanage),
            _ => None,
        }
    }

    pub fn is_form_view(&self) -> bool {
        matches!(self, Self::CreateOrphanage)
    }
}

/// Route the user is sent to after a successful registration
pub const POST_SUBMIT_ROUTE: &str = "/app";

/// Blocking notice shown to the user, with a route to open once dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub then_navigate: Option<&'static str>,
}

/// Path-entry dialog used to pick image files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDialogState {
    pub input: String,
}

impl FileDialogState {
    /// Parse the entered paths.
    ///
    /// Paths are separated by `;` or newlines. Returns `None` when nothing
    /// was entered, which is the picker's "cancelled" signal.
    pub fn selected_files(&self) -> Option<Vec<PathBuf>> {
        let files: Vec<PathBuf> = self
            .input
            .split([';', '\n'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect();
        if files.is_empty() {
            None
        } else {
            Some(files)
        }
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Pages
    pub landing_map: MapViewport,
    pub registration: Option<RegistrationForm>,
    pub previews: PreviewRegistry,

    // Modals
    pub errors: VecDeque<String>,
    pub notice: Option<Notice>,
    pub file_dialog: Option<FileDialogState>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: View::default(),
            view_history: Vec::new(),
            landing_map: MapViewport::new(LANDING_MAP_CENTER, DEFAULT_ZOOM),
            registration: None,
            previews: PreviewRegistry::default(),
            errors: VecDeque::new(),
            notice: None,
            file_dialog: None,
        }
    }
}

impl AppState {
    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Open a fresh registration form, dropping any previous draft
    pub fn open_registration(&mut self) {
        self.registration = Some(RegistrationForm::new(self.previews.clone()));
    }

    /// Drop the registration draft and its previews
    pub fn close_registration(&mut self) {
        self.registration = None;
        self.file_dialog = None;
    }
}
