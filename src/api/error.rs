//! Errors returned by the orphanage API client

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL or resource path could not be parsed
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A selected image could not be read from disk
    #[error("Failed to read image {}: {source}", path.display())]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = ApiError::Status {
            status: 400,
            body: "name is required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Server responded with 400: name is required"
        );
    }

    #[test]
    fn test_read_image_message_includes_path() {
        let err = ApiError::ReadImage {
            path: PathBuf::from("/photos/a.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.contains("/photos/a.png"));
        assert!(message.contains("not found"));
    }
}
