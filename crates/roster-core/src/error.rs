// Rust guideline compliant 2026-10-18

//! Error types for the Roster core library.

use thiserror::Error;

/// Result type alias for Roster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Roster operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid user record data.
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    /// A user with the same name is already recorded.
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    /// No user matched the query.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// More than one user matched the query.
    #[error("Too many matches for '{query}': {}", .matches.join(", "))]
    TooManyMatches {
        /// The raw query as typed.
        query: String,
        /// Display names of every match.
        matches: Vec<String>,
    },
}
