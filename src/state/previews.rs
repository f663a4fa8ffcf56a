//! Preview handles for selected images
//!
//! Each file selection creates one [`PreviewBatch`]. The batch registers a
//! local `preview://` URL per image and releases them all when it is dropped.

use super::draft::SelectedImage;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Set of live preview URLs
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<String>>>,
}

impl PreviewRegistry {
    fn register(&self, url: &str) {
        if let Ok(mut live) = self.live.lock() {
            live.insert(url.to_string());
        }
    }

    fn release(&self, url: &str) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(url);
        }
    }

    /// Number of preview URLs not yet released
    pub fn live_count(&self) -> usize {
        self.live.lock().map(|live| live.len()).unwrap_or(0)
    }

    /// Whether a preview URL is still live
    #[cfg(test)]
    pub fn is_live(&self, url: &str) -> bool {
        self.live
            .lock()
            .map(|live| live.contains(url))
            .unwrap_or(false)
    }
}

/// A local preview URL for one selected image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub url: String,
    pub file_name: String,
}

/// Previews created by a single file selection
#[derive(Debug)]
pub struct PreviewBatch {
    registry: PreviewRegistry,
    previews: Vec<PreviewImage>,
}

impl PreviewBatch {
    pub fn empty(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            previews: Vec::new(),
        }
    }

    /// Register one preview per image, in order
    pub fn create(registry: &PreviewRegistry, images: &[SelectedImage]) -> Self {
        let previews = images
            .iter()
            .map(|image| {
                let url = format!("preview://{}/{}", Uuid::new_v4(), image.file_name);
                registry.register(&url);
                PreviewImage {
                    url,
                    file_name: image.file_name.clone(),
                }
            })
            .collect();

        Self {
            registry: registry.clone(),
            previews,
        }
    }

    pub fn previews(&self) -> &[PreviewImage] {
        &self.previews
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }
}

impl Drop for PreviewBatch {
    fn drop(&mut self) {
        for preview in &self.previews {
            self.registry.release(&preview.url);
        }
    }
}
