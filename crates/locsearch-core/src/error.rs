// crates/locsearch-core/src/error.rs

use thiserror::Error;

/// Errors produced while loading or querying the location dataset.
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("dataset not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary dataset error: {0}")]
    Binary(#[from] bincode::Error),

    /// A search source failed. The in-memory engine never produces this;
    /// remote [`LocationSource`](crate::suggest::LocationSource)
    /// implementations do.
    #[error("search failed: {0}")]
    Search(String),
}

pub type Result<T> = std::result::Result<T, LocationError>;
