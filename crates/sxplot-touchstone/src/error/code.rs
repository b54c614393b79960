//! Diagnostic codes.
//!
//! `E0xx` codes concern lexing and the option line, `E1xx` the network data
//! records and `E2xx` the file structure (port count and keywords).

use std::fmt;

macro_rules! error_codes {
    ($($(#[$doc:meta])* $code:ident => $description:literal,)*) => {
        /// Identifies the kind of problem a [`Diagnostic`](super::Diagnostic) reports.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $($(#[$doc])* $code,)*
        }

        impl ErrorCode {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$code => stringify!($code),)*
                }
            }

            /// Short description, used as the default primary label.
            pub fn description(self) -> &'static str {
                match self {
                    $(Self::$code => $description,)*
                }
            }
        }
    };
}

error_codes! {
    /// A character with no meaning on its line.
    E001 => "unexpected character",
    /// A `[` keyword not closed on the same line.
    E002 => "unterminated keyword",
    /// An option line word that is no frequency unit, parameter type, data
    /// format or `R`.
    E003 => "unknown option",
    /// `Y`, `Z`, `H` or `G` data; only scattering parameters are read.
    E004 => "unsupported parameter type",
    /// `R` without a number after it.
    E005 => "missing reference impedance",
    /// A second option line; only the first one counts.
    E006 => "duplicate option line",
    /// Something other than a number in the data section.
    E100 => "unexpected token in network data",
    /// The file ends in the middle of a frequency point.
    E101 => "incomplete data record",
    /// Neither `[Number of Ports]` nor the `.sNp` extension gives a usable
    /// port count.
    E200 => "unknown port count",
    /// `[Number of Ports]` not followed by a positive integer, or by one too
    /// large to hold a record.
    E201 => "invalid number of ports",
    /// `[Two-Port Data Order]` not followed by `12_21` or `21_12`.
    E202 => "invalid two-port data order",
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
