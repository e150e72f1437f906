// Rust guideline compliant 2026-10-18

//! Error handling for Roster application services.

use roster_core::Error as CoreError;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Stable error codes for command and envelope output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No user matched the query.
    NotFound,
    /// More than one user matched the query.
    TooManyMatches,
    /// A user with the same name already exists.
    DuplicateUser,
    /// Input validation failed.
    ValidationError,
    /// Configuration could not be loaded.
    ConfigError,
    /// IO failure while reading or writing repository data.
    IoError,
    /// The repository has not been initialized.
    RepoNotInitialized,
    /// The request included invalid inputs.
    InvalidInput,
    /// JSON serialization or parsing failed.
    JsonError,
}

impl From<&CoreError> for ErrorCode {
    fn from(error: &CoreError) -> Self {
        match error {
            CoreError::UserNotFound(_) => ErrorCode::NotFound,
            CoreError::TooManyMatches { .. } => ErrorCode::TooManyMatches,
            CoreError::DuplicateUser(_) => ErrorCode::DuplicateUser,
            CoreError::InvalidUser(_) => ErrorCode::ValidationError,
            CoreError::InvalidConfig(_) => ErrorCode::ConfigError,
            CoreError::Io(_) => ErrorCode::IoError,
            CoreError::Json(_) => ErrorCode::JsonError,
        }
    }
}

/// Application-level errors with stable mapping to error codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository is missing or not initialized.
    #[error("Roster repository not initialized at {path}. Run 'roster init' first.")]
    RepoNotInitialized {
        /// Path where `.roster` was expected.
        path: PathBuf,
    },

    /// Invalid input was provided by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No user matched; `message` is already localized.
    #[error("{message}")]
    UserNotFound {
        /// The query as typed.
        query: String,
        /// Localized message.
        message: String,
    },

    /// Several users matched; `message` is already localized.
    #[error("{message}")]
    TooManyMatches {
        /// The query as typed.
        query: String,
        /// Localized message.
        message: String,
        /// Display names of every match.
        matches: Vec<String>,
    },

    /// Error from core library operations.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error not represented by core errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a stable error code for the error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::RepoNotInitialized { .. } => ErrorCode::RepoNotInitialized,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::UserNotFound { .. } => ErrorCode::NotFound,
            AppError::TooManyMatches { .. } => ErrorCode::TooManyMatches,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Core(core) => ErrorCode::from(core),
        }
    }

    /// Returns structured details for errors that benefit from extra context.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::RepoNotInitialized { path } => Some(serde_json::json!({
                "path": path,
            })),
            AppError::UserNotFound { query, .. } => Some(serde_json::json!({
                "query": query,
            })),
            AppError::TooManyMatches { query, matches, .. } => Some(serde_json::json!({
                "query": query,
                "matches": matches,
            })),
            AppError::Core(CoreError::TooManyMatches { query, matches }) => {
                Some(serde_json::json!({
                    "query": query,
                    "matches": matches,
                }))
            }
            _ => None,
        }
    }
}
