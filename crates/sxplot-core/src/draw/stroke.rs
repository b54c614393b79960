//! Line strokes for traces, grid lines, the plot frame and the legend.
//!
//! A [`StrokeDefinition`] is turned into SVG attributes by
//! [`apply_stroke!`](crate::apply_stroke!):
//!
//! | Property | SVG attribute |
//! |----------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` (omitted when solid) |
//! | `cap` | `stroke-linecap` |
//! | `join` | `stroke-linejoin` |
//!
//! # Example
//!
//! ```
//! use sxplot_core::draw::{StrokeCap, StrokeDefinition, StrokeJoin};
//! use sxplot_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let trace = StrokeDefinition::solid(Color::new("#1f77b4").unwrap(), 1.5)
//!     .with_join(StrokeJoin::Round)
//!     .with_cap(StrokeCap::Round);
//!
//! let line = svg_element::Polyline::new().set("points", "0,0 10,10").set("fill", "none");
//! let line = sxplot_core::apply_stroke!(line, &trace);
//! assert!(line.to_string().contains("stroke-linejoin=\"round\""));
//! ```

use std::str::FromStr;

use crate::color::Color;

/// Dash pattern of a line.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// `5,5`
    Dashed,
    /// `2,3`
    Dotted,
    /// Any other SVG dasharray, e.g. `"4,2"`.
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    /// Parses `solid`, `dashed` or `dotted`; anything made of numbers,
    /// commas and spaces is taken as a dasharray.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            pattern
                if !pattern.is_empty()
                    && pattern
                        .chars()
                        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ' ')) =>
            {
                Ok(Self::Custom(pattern.to_string()))
            }
            other => Err(format!(
                "invalid line style `{other}`: expected solid, dashed, dotted or a dash pattern"
            )),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray for this style, or `None` for solid lines.
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// How line endpoints are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// How corners between line segments are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// Color, width and pattern of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// A solid line with butt caps and miter joins.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }

    pub fn dotted(color: Color, width: f32) -> Self {
        Self::solid(color, width).with_style(StrokeStyle::Dotted)
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = join;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }
}

impl Default for StrokeDefinition {
    /// One pixel, solid black.
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Sets every stroke attribute of `$stroke` on an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke: &$crate::draw::StrokeDefinition = $stroke;
        let mut elem = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
            .set("stroke-linecap", stroke.cap().to_svg_value())
            .set("stroke-linejoin", stroke.join().to_svg_value());

        if let Some(dasharray) = stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_default_stroke() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color(), Color::default());
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
    }

    #[test]
    fn test_builders() {
        let red = Color::new("red").unwrap();
        let stroke = StrokeDefinition::solid(red, 2.0)
            .with_style(StrokeStyle::Dashed)
            .with_cap(StrokeCap::Square)
            .with_join(StrokeJoin::Bevel);

        assert_eq!(stroke.color(), red);
        assert_eq!(*stroke.style(), StrokeStyle::Dashed);
        assert_eq!(stroke.cap(), StrokeCap::Square);
        assert_eq!(stroke.join(), StrokeJoin::Bevel);
        assert_eq!(*StrokeDefinition::dotted(red, 1.0).style(), StrokeStyle::Dotted);
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("dotted".parse::<StrokeStyle>(), Ok(StrokeStyle::Dotted));
        assert_eq!(" dashed ".parse::<StrokeStyle>(), Ok(StrokeStyle::Dashed));
        assert_eq!(
            "4,2".parse::<StrokeStyle>(),
            Ok(StrokeStyle::Custom("4,2".to_string()))
        );
        assert!("wavy".parse::<StrokeStyle>().is_err());
        assert!("".parse::<StrokeStyle>().is_err());
    }

    #[test]
    fn test_style_dasharray() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value().as_deref(), Some("5,5"));
        assert_eq!(StrokeStyle::Dotted.to_svg_value().as_deref(), Some("2,3"));
    }

    #[test]
    fn test_apply_stroke_sets_dasharray_only_for_patterns() {
        let solid = StrokeDefinition::solid(Color::default(), 1.0);
        let line = apply_stroke!(svg_element::Line::new(), &solid).to_string();
        assert!(line.contains("stroke-width"));
        assert!(!line.contains("stroke-dasharray"));

        let dotted = StrokeDefinition::dotted(Color::default(), 1.0);
        let line = apply_stroke!(svg_element::Line::new(), &dotted).to_string();
        assert!(line.contains("stroke-dasharray=\"2,3\""));
    }
}
