//! Diagnostics reported while reading Touchstone sources.
//!
//! Problems are reported as [`Diagnostic`]s, each with a severity, an
//! optional [`ErrorCode`], labelled source spans and optional help. A read
//! keeps going after the first problem, so one [`ParseError`] lists every
//! malformed line of a file.
//!
//! ```
//! # use sxplot_touchstone::error::{Diagnostic, ErrorCode};
//! # use sxplot_touchstone::Span;
//! let diag = Diagnostic::error("incomplete data record")
//!     .with_code(ErrorCode::E101)
//!     .with_label(Span::new(120..164), "record ends here")
//!     .with_secondary_label(Span::new(0..18), "port count implied here")
//!     .with_help("a 2-port record holds 9 values");
//! ```

mod code;
mod diagnostic;

use std::fmt;

use log::warn;

pub use code::ErrorCode;
pub use diagnostic::{Diagnostic, Label, Severity};

/// A Touchstone source that could not be read.
///
/// Holds every diagnostic of the failed pass, warnings included, in source
/// order.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    /// The first diagnostic, followed by a count of the rest.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.diagnostics.first() else {
            return f.write_str("unreadable Touchstone source");
        };
        write!(f, "{first}")?;
        match self.diagnostics.len() - 1 {
            0 => Ok(()),
            rest => write!(f, " (+{rest} more)"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        vec![diagnostic].into()
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

/// Diagnostics gathered during one pass over a source.
///
/// Warnings are logged as they arrive and only surface again if an error
/// fails the pass.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_warning() {
            warn!(diagnostic:%; "Touchstone warning");
        }
        self.diagnostics.push(diagnostic);
    }

    /// Fails the pass regardless of what was emitted.
    pub(crate) fn into_error(self) -> ParseError {
        self.diagnostics.into()
    }

    /// `Err` with everything collected if any error was emitted.
    pub(crate) fn finish(self) -> Result<(), ParseError> {
        if self.diagnostics.iter().any(|d| d.severity().is_error()) {
            Err(self.diagnostics.into())
        } else {
            Ok(())
        }
    }
}
