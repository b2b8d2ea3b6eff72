//! Forecast service client boundary
//!
//! The pipeline treats the remote weather service as a black box: one
//! operation returning a raw forecast document, or nothing, or an
//! error. Stages never interpret the document themselves.

pub mod canned;
pub mod http;

pub use canned::*;
pub use http::*;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid forecast endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("no forecast source for location {0}")]
    Unavailable(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Trait for all forecast sources
#[async_trait::async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch the raw forecast document for one location identifier.
    ///
    /// `Ok(None)` means the service has no forecast for the location;
    /// that is a normal outcome, not an error.
    async fn fetch(&self, location: &str) -> ClientResult<Option<Value>>;
}
