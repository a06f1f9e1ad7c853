//! Error types for the choreboard ecosystem.

use thiserror::Error;

/// Errors that can occur in choreboard operations.
///
/// "Not found" is deliberately absent: operating on an unknown id is a
/// no-op that reports through return values (`Ok(false)` / `Ok(None)`), so
/// front ends don't have to branch on errors for routine misses.
#[derive(Error, Debug)]
pub enum ChoreBoardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("Feed fetch error: {0}")]
    Fetch(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for choreboard operations.
pub type ChoreBoardResult<T> = Result<T, ChoreBoardError>;
