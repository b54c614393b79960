//! Error types for sxplot operations.
//!
//! This module provides the main error type [`SxplotError`] which wraps
//! the error conditions that can occur while locating, reading and plotting
//! Touchstone files.

use std::{io, path::PathBuf};

use thiserror::Error;

use sxplot_touchstone::{NetworkError, ParseError};

/// The main error type for sxplot operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text and path of the file that
/// failed to read, so the diagnostics' spans can be rendered against it.
#[derive(Debug, Error)]
pub enum SxplotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a readable directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("No Touchstone file matches `{fragment}`")]
    FileNotFound { fragment: String },

    #[error("{}: {err}", .path.display())]
    Parse {
        err: ParseError,
        src: String,
        path: PathBuf,
    },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for SxplotError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl SxplotError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(
        err: ParseError,
        src: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::Parse {
            err,
            src: src.into(),
            path: path.into(),
        }
    }
}
