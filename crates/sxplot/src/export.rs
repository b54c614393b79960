//! Export functionality for sxplot figures.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a finished [`Figure`] to an output format. It is the final stage
//! of the plotting pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Touchstone Files
//!     ↓ locate + parse
//! Networks
//!     ↓ plot (Canvas calls)
//! Figure
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`SxplotError::Export`] at the crate
//! boundary.
//!
//! [`SxplotError::Export`]: crate::SxplotError::Export

/// SVG export backend.
pub mod svg;

use crate::figure::Figure;

/// Abstraction for figure export backends.
pub trait Exporter {
    /// Exports a figure to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the figure cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_figure(&mut self, figure: &Figure) -> Result<(), Error>;
}

/// Errors that can occur during figure export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
