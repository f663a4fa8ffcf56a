//! reqwest-backed client for the orphanage API

use super::payload::{build_parts, FormPart, PartValue};
use super::traits::OrphanageApi;
use super::ApiError;
use crate::state::OrphanageSubmission;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;

/// Resource path for orphanage registrations, relative to the base URL
const ORPHANAGES_PATH: &str = "orphanages";

/// Client for the orphanage HTTP API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("happy-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of the orphanages resource
    pub fn orphanages_url(&self) -> Result<Url, ApiError> {
        self.base_url
            .join(ORPHANAGES_PATH)
            .map_err(|e| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Parse a base URL, making sure relative paths join beneath it
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Convert payload parts into a reqwest multipart form
fn into_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match part.value {
            PartValue::Text(value) => form.text(part.name, value),
            PartValue::File {
                file_name,
                mime,
                bytes,
            } => {
                let file = Part::bytes(bytes).file_name(file_name).mime_str(mime)?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl OrphanageApi for ApiClient {
    async fn create_orphanage(&self, submission: OrphanageSubmission) -> Result<(), ApiError> {
        let url = self.orphanages_url()?;
        let parts = build_parts(&submission).await?;
        let form = into_form(parts)?;

        tracing::info!("POST {url} ({} image(s))", submission.images.len());

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
