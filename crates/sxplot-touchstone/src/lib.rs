//! # sxplot Touchstone reader
//!
//! Reads Touchstone (`.sNp`) files into a [`Network`]: one scattering
//! matrix per frequency point, with frequencies stored in Hz.
//!
//! Supported input:
//! - Touchstone 1.x option lines `# <unit> <parameter> <format> R <ohms>`,
//!   with the defaults `GHz S MA R 50`
//! - `RI`, `MA` and `DB` data formats
//! - Data records wrapped over any number of lines
//! - The 2-port column order `11 21 12 22` and row-major order otherwise
//! - 2-port noise parameter blocks, which are skipped
//! - The Touchstone 2.0 keywords `[Number of Ports]`,
//!   `[Two-Port Data Order]`, `[Noise Data]` and `[End]`; other keywords
//!   are ignored
//!
//! ## Usage
//!
//! ```
//! # use sxplot_touchstone::{parse, ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = "\
//! ! thru line
//! ## MHz S DB R 50
//! 100 -30 0 -0.5 -10 -0.5 -10 -30 0
//! 200 -28 0 -0.7 -20 -0.7 -20 -28 0
//! ";
//!
//!     let network = parse(source, Some(2))?;
//!     assert_eq!(network.ports(), 2);
//!     assert_eq!(network.frequencies_hz(), &[100.0e6, 200.0e6]);
//!     assert_eq!(network.comments(), &["thru line".to_string()]);
//!     Ok(())
//! }
//! ```

pub mod error;
mod lexer;
mod network;
mod options;
mod parser;
mod span;
mod tokens;

use std::path::Path;

use log::{info, trace};

pub use error::ParseError;
pub use network::{Network, NetworkError, Trace};
pub use options::{DataFormat, OptionLine, TwoPortOrder};
pub use span::Span;

/// Parse Touchstone source text into a [`Network`].
///
/// `ports` is the port count implied by the file name (see
/// [`ports_from_path`]). It may be `None` when the source declares
/// `[Number of Ports]` itself.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic found in the source.
pub fn parse(source: &str, ports: Option<usize>) -> Result<Network, ParseError> {
    info!(ports:?; "Parsing Touchstone data");

    let tokens = lexer::tokenize(source)?;
    trace!(tokens_count = tokens.len(); "Tokenized");

    parser::build_network(&tokens, ports)
}

/// Returns the port count encoded in a `.sNp` extension, e.g. `4` for
/// `coupler.s4p`. The extension is matched case-insensitively.
///
/// # Examples
///
/// ```
/// use sxplot_touchstone::ports_from_path;
///
/// assert_eq!(ports_from_path("data/amp.s2p"), Some(2));
/// assert_eq!(ports_from_path("COUPLER.S4P"), Some(4));
/// assert_eq!(ports_from_path("notes.txt"), None);
/// ```
pub fn ports_from_path(path: impl AsRef<Path>) -> Option<usize> {
    let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
    let digits = extension.strip_prefix('s')?.strip_suffix('p')?;
    digits.parse().ok().filter(|ports: &usize| *ports > 0)
}
