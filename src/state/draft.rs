//! Draft orphanage value object
//!
//! Holds the in-progress, unpersisted data of one orphanage registration.
//! Every field has a single update entry point.

use super::previews::{PreviewBatch, PreviewImage, PreviewRegistry};
use std::path::{Path, PathBuf};

/// Maximum number of characters accepted by the "about" field
pub const ABOUT_MAX_CHARS: usize = 300;

/// Geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    /// The `{0,0}` sentinel meaning "no location selected yet"
    pub const UNSET: Position = Position {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether the map marker should be drawn for this position.
    ///
    /// Only the latitude is checked, so a click at `{0, lng}` with `lng != 0`
    /// still hides the marker while a click at `{lat, 0}` shows it.
    pub fn has_marker(&self) -> bool {
        self.latitude != 0.0
    }
}

/// An image file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
}

impl SelectedImage {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let mime = mime_for_path(&path);
        Self {
            path,
            file_name,
            mime,
        }
    }
}

/// Guess the MIME type of an image from its extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// In-progress orphanage registration
#[derive(Debug)]
pub struct DraftOrphanage {
    name: String,
    about: String,
    instructions: String,
    opening_hours: String,
    open_on_weekends: bool,
    position: Position,
    images: Vec<SelectedImage>,
    previews: PreviewBatch,
}

impl DraftOrphanage {
    /// Create an empty draft whose previews are tracked by `registry`
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            name: String::new(),
            about: String::new(),
            instructions: String::new(),
            opening_hours: String::new(),
            open_on_weekends: true,
            position: Position::UNSET,
            images: Vec::new(),
            previews: PreviewBatch::empty(registry),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn opening_hours(&self) -> &str {
        &self.opening_hours
    }

    pub fn open_on_weekends(&self) -> bool {
        self.open_on_weekends
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn images(&self) -> &[SelectedImage] {
        &self.images
    }

    pub fn preview_images(&self) -> &[PreviewImage] {
        self.previews.previews()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    /// Set the about text, truncated to [`ABOUT_MAX_CHARS`]
    pub fn set_about(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.about = if value.chars().count() > ABOUT_MAX_CHARS {
            value.chars().take(ABOUT_MAX_CHARS).collect()
        } else {
            value
        };
    }

    pub fn set_instructions(&mut self, value: impl Into<String>) {
        self.instructions = value.into();
    }

    pub fn set_opening_hours(&mut self, value: impl Into<String>) {
        self.opening_hours = value.into();
    }

    pub fn set_open_on_weekends(&mut self, value: bool) {
        self.open_on_weekends = value;
    }

    /// Overwrite the position unconditionally
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Replace the selected images and regenerate their previews.
    ///
    /// The previous preview batch is released when it is replaced here.
    pub fn replace_images(&mut self, images: Vec<SelectedImage>) {
        let registry = self.previews.registry().clone();
        self.previews = PreviewBatch::create(&registry, &images);
        self.images = images;
        tracing::debug!("{} preview(s) live", registry.live_count());
    }

    /// Owned copy of the current values, handed to a submission task
    pub fn snapshot(&self) -> OrphanageSubmission {
        OrphanageSubmission {
            name: self.name.clone(),
            about: self.about.clone(),
            instructions: self.instructions.clone(),
            opening_hours: self.opening_hours.clone(),
            open_on_weekends: self.open_on_weekends,
            position: self.position,
            images: self.images.clone(),
        }
    }

    /// Route a whole-value edit through the field's setter
    fn set_text(&mut self, field: TextField, value: String) {
        match field {
            TextField::Name => self.set_name(value),
            TextField::About => self.set_about(value),
            TextField::Instructions => self.set_instructions(value),
            TextField::OpeningHours => self.set_opening_hours(value),
        }
    }

    /// Get a text field value
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::About => &self.about,
            TextField::Instructions => &self.instructions,
            TextField::OpeningHours => &self.opening_hours,
        }
    }

    /// Append a character to a text field, respecting the about cap
    pub fn push_char(&mut self, field: TextField, c: char) {
        let mut value = self.text(field).to_string();
        value.push(c);
        self.set_text(field, value);
    }

    /// Remove the last character of a text field
    pub fn pop_char(&mut self, field: TextField) {
        let mut value = self.text(field).to_string();
        value.pop();
        self.set_text(field, value);
    }
}

/// Values of a draft at the moment it was submitted
#[derive(Debug, Clone, PartialEq)]
pub struct OrphanageSubmission {
    pub name: String,
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    pub position: Position,
    pub images: Vec<SelectedImage>,
}

/// The free-text fields of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    About,
    Instructions,
    OpeningHours,
}
