//! Error types for the high-score persistence boundary.

/// Failure to read or write the stored high score.
#[derive(thiserror::Error, Debug)]
pub enum HighScoreError {
    /// The file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value is not a non-negative integer.
    #[error("Parse error: {0:?} is not a score")]
    Parse(String),
}

/// Result type for high-score operations
pub type Result<T> = std::result::Result<T, HighScoreError>;
