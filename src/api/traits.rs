//! Trait abstraction for the API client to enable mocking in tests

use super::ApiError;
use crate::state::OrphanageSubmission;
use async_trait::async_trait;

/// Trait for orphanage API operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrphanageApi: Send + Sync {
    /// POST a registration as multipart form data to `orphanages`.
    ///
    /// Any 2xx response is success; the response body is ignored.
    async fn create_orphanage(&self, submission: OrphanageSubmission) -> Result<(), ApiError>;
}
