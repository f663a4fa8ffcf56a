//! Multipart payload for orphanage registration
//!
//! The part list is built separately from the reqwest form so the exact
//! field names and order can be checked without a server.

use super::ApiError;
use crate::state::OrphanageSubmission;

/// Value carried by one multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        mime: &'static str,
        bytes: Vec<u8>,
    },
}

/// One named multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: &'static str,
    pub value: PartValue,
}

impl FormPart {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: PartValue::Text(value.into()),
        }
    }

    /// Text value, if this is a text part
    #[cfg(test)]
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            PartValue::Text(s) => Some(s),
            PartValue::File { .. } => None,
        }
    }
}

/// Stringify a coordinate as plain decimal text.
///
/// Zero is written as `0`, never `0.0` or `-0`. Magnitudes below `1e-6` stay in
/// positional form (`0.0000001`), whereas a JavaScript number string switches
/// to exponent form (`1e-7`). Map clicks near the configured centres never
/// produce such values.
pub fn format_coordinate(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Build the ordered multipart parts for a submission.
///
/// Text fields come first in a fixed order, followed by one `images` part per
/// selected file in selection order. Image bytes are read here.
pub async fn build_parts(submission: &OrphanageSubmission) -> Result<Vec<FormPart>, ApiError> {
    let mut parts = vec![
        FormPart::text("name", submission.name.as_str()),
        FormPart::text("latitude", format_coordinate(submission.position.latitude)),
        FormPart::text(
            "longitude",
            format_coordinate(submission.position.longitude),
        ),
        FormPart::text("about", submission.about.as_str()),
        FormPart::text("instructions", submission.instructions.as_str()),
        FormPart::text("opening_hours", submission.opening_hours.as_str()),
        FormPart::text("open_on_weekends", submission.open_on_weekends.to_string()),
    ];

    for image in &submission.images {
        let bytes = tokio::fs::read(&image.path)
            .await
            .map_err(|source| ApiError::ReadImage {
                path: image.path.clone(),
                source,
            })?;
        parts.push(FormPart {
            name: "images",
            value: PartValue::File {
                file_name: image.file_name.clone(),
                mime: image.mime,
                bytes,
            },
        });
    }

    Ok(parts)
}
