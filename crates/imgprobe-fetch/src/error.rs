//! Error types for imgprobe-fetch.

use thiserror::Error;

/// Transport-level failure of a single probe. Always fatal to a crawl.
///
/// A missing image is not an error; it is [`Outcome::NotFound`](crate::Outcome::NotFound).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build request for {url}: {reason}")]
    RequestConstruction { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    RequestExecution { url: String, reason: String },

    #[error("failed to read response body from {url}: {reason}")]
    BodyRead { url: String, reason: String },

    #[error("unrecognized content signature from {url}: [{}]", hex::encode(.prefix))]
    UnrecognizedSignature { url: String, prefix: Vec<u8> },
}

/// Step of a probe at which a [`FetchError`] occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Construction,
    Execution,
    BodyRead,
    Classification,
}

impl FetchError {
    pub fn phase(&self) -> FetchPhase {
        match self {
            FetchError::RequestConstruction { .. } => FetchPhase::Construction,
            FetchError::RequestExecution { .. } => FetchPhase::Execution,
            FetchError::BodyRead { .. } => FetchPhase::BodyRead,
            FetchError::UnrecognizedSignature { .. } => FetchPhase::Classification,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::RequestConstruction { url, .. }
            | FetchError::RequestExecution { url, .. }
            | FetchError::BodyRead { url, .. }
            | FetchError::UnrecognizedSignature { url, .. } => url,
        }
    }
}

impl std::fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchPhase::Construction => write!(f, "construction"),
            FetchPhase::Execution => write!(f, "execution"),
            FetchPhase::BodyRead => write!(f, "body read"),
            FetchPhase::Classification => write!(f, "classification"),
        }
    }
}
