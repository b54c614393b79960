//! Color handling for sxplot figures
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the [`Palette`] that hands out trace colors in
//! draw order.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// The ten-color cycle used for traces when no palette is configured.
const DEFAULT_CYCLE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Wrapper around the `DynamicColor` type from the color crate
/// This provides convenience methods for working with colors in sxplot
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use sxplot_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sxplot_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color, between
    /// 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

/// An ordered, cycling list of trace colors.
///
/// The n-th trace drawn on a figure gets `palette.color_for(n)`; once the
/// list is exhausted it starts over from the first color.
///
/// # Examples
///
/// ```
/// use sxplot_core::color::{Color, Palette};
///
/// let palette = Palette::new(vec![Color::new("red").unwrap(), Color::new("blue").unwrap()])
///     .unwrap();
/// assert_eq!(palette.color_for(0), palette.color_for(2));
/// assert_ne!(palette.color_for(0), palette.color_for(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette from a non-empty list of colors.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self, String> {
        if colors.is_empty() {
            return Err("palette must contain at least one color".to_string());
        }
        Ok(Self { colors })
    }

    /// Parses a palette from CSS color strings.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first string that is not a valid color,
    /// or if the list is empty.
    pub fn from_strs<S: AsRef<str>>(colors: &[S]) -> Result<Self, String> {
        let colors = colors
            .iter()
            .map(|color| Color::new(color.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Returns the color for the trace drawn at `index`.
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Returns the number of distinct colors before the cycle repeats.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; a palette holds at least one color.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_strs(&DEFAULT_CYCLE).expect("default cycle holds valid CSS colors")
    }
}
