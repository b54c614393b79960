//! Visual definitions for figure elements.
//!
//! - [`StrokeDefinition`] and friends describe how lines are stroked (traces,
//!   grid lines, axis frame, legend border).
//! - [`TextDefinition`] and [`Text`] describe and measure text (tick labels,
//!   axis labels, titles, legend entries).

mod stroke;
mod text;

pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};
