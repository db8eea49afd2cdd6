//! Error handling for Elysium

use crate::catalog::StreamCriteria;
use thiserror::Error;

/// Main error type for Elysium
#[derive(Debug, Error)]
pub enum ElysiumError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    CatalogUnavailable,

    #[error("Format discovery failed: {0}")]
    Discovery(String),

    #[error("No stream matches the selection: {0}")]
    ResolutionMiss(StreamCriteria),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed catalog payload: {0}")]
    Payload(#[from] serde_json::Error),
}
