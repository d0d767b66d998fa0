//! Crate-wide error type. Every layer returns `AppResult`; `main` prints the
//! error and exits with status 1.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // punch / directory errors
    #[error("Employee not found for code '{0}': try again or see your supervisor")]
    NotFound(String),

    #[error("Duplicate punch: already '{action}' for this job")]
    DuplicatePunch { action: String },

    #[error("Validation error: {0}")]
    Validation(String),

    // io
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // database-related
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // parsing errors
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // config errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),

    // generic fallback
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
