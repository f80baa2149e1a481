//! Error types for the inspector.

use q3bsp_format::{BspError, EntityParseError};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Map file does not exist
    #[error("Map file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Path exists but is not a regular file
    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
}

/// Errors raised while loading a map and writing a report.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Loading or reading the map failed
    #[error(transparent)]
    Map(#[from] BspError),

    /// Entity text could not be parsed
    #[error("Invalid entity text: {0}")]
    Entities(#[from] EntityParseError),

    /// Writing the report failed
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for inspector operations
pub type Result<T> = std::result::Result<T, InspectError>;
