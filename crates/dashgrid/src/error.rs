//! Error handling for the dashgrid CLI.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for CLI operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that end the process with a non-zero status.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Engine failures: bad configuration or a store that could not be written.
    #[error("Dashboard error: {0}")]
    Engine(#[from] dashgrid_engine::Error),
    /// Configuration parsing or validation errors.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),
}
