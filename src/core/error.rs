//! Error types for the photo sorting tool
//!
//! This module defines the error types used throughout the application.

use thiserror::Error;

/// Main error type for the photo sorting tool
#[derive(Error, Debug)]
pub enum SortError {
    /// The workbook has no settings sheet with the configured name
    #[error("Settings sheet '{0}' not found in the workbook")]
    SettingsSheetMissing(String),

    /// The settings sheet contains no recognized setting rows
    #[error("No settings data found in the settings sheet")]
    EmptySettings,

    /// The workbook has no data worksheet
    #[error("The workbook contains no data worksheet")]
    NoDataSheet,

    /// Failed to open or read the workbook
    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    /// A size label has no destination folder mapping
    #[error("No folder mapped for size label '{0}'")]
    UnmappedSize(String),

    /// A distributable column has no destination folder template
    #[error("No destination folder configured for column {0}")]
    MissingTemplate(usize),

    /// General I/O error
    #[error("IO error: {0}")]
    IoError(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SortError>;

impl From<std::io::Error> for SortError {
    fn from(err: std::io::Error) -> Self {
        SortError::IoError(err.to_string())
    }
}

impl From<calamine::Error> for SortError {
    fn from(err: calamine::Error) -> Self {
        SortError::Workbook(err.to_string())
    }
}
