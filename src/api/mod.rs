//! HTTP client module for the orphanage API

mod client;
mod error;
mod payload;
mod traits;

pub use client::ApiClient;
pub use error::ApiError;
pub use traits::OrphanageApi;

#[cfg(test)]
pub use traits::MockOrphanageApi;
