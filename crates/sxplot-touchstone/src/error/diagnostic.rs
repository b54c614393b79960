use std::fmt;

use crate::{error::ErrorCode, span::Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The file cannot be read into a network.
    Error,
    /// Something was skipped; the network is still built.
    Warning,
}

impl Severity {
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    pub fn is_warning(self) -> bool {
        self == Severity::Warning
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Text attached to a span of the source.
///
/// The primary label marks the offending text. Secondary labels point at
/// context, such as the option line that chose the data format.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    span: Span,
    message: String,
    primary: bool,
}

impl Label {
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }
}

/// One problem found in a Touchstone source.
///
/// Rendered by the CLI as:
///
/// ```text
/// error[E004]: unsupported parameter type `Z`
///   --> amp.s2p:3:7
///    |
///  3 | # GHz Z RI R 50
///    |       ^ only S-parameters can be plotted
///    |
///    = help: export the measurement as S-parameters
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// ```
    /// # use sxplot_touchstone::error::{Diagnostic, ErrorCode};
    /// # use sxplot_touchstone::Span;
    /// let diag = Diagnostic::error("unknown option `QHz`")
    ///     .with_code(ErrorCode::E003)
    ///     .with_label(Span::new(2..5), "not an option")
    ///     .with_help("did you mean `GHz`?");
    /// assert_eq!(diag.to_string(), "error[E003]: unknown option `QHz`");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Error, message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message.into())
    }

    fn with_severity(severity: Severity, message: String) -> Self {
        Self {
            severity,
            code: None,
            message,
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message.into(), true)
    }

    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message.into(), false)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn push_label(mut self, span: Span, message: String, primary: bool) -> Self {
        self.labels.push(Label {
            span,
            message,
            primary,
        });
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{code}]: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
