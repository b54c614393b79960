//! Figure-space geometry for laying out a plot.
//!
//! Coordinates are SVG pixels: the origin is the top-left corner of the
//! figure and y grows downward. Data values grow upward, so the plot area's
//! [`Bounds::max_y`] is where the y axis minimum is drawn.
//!
//! ```text
//!   (0,0) ────────► +x
//!     │  ┌ margins ──────────┐
//!     │  │   plot area       │
//!     ▼  └───────────────────┘
//!    +y
//! ```

/// A position on the figure.
///
/// ```
/// # use sxplot_core::geometry::Point;
/// let tick = Point::new(80.0, 440.0);
/// assert_eq!(tick.x(), 80.0);
/// assert_eq!(tick.y(), 440.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }
}

/// Extent of a figure, a text run or the legend box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// The larger width and the larger height of the two; used to find the
    /// widest tick label or legend entry.
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }
}

/// An axis-aligned rectangle, such as the page or the plot area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Moves every side inward by its inset.
    ///
    /// When the insets on one axis add up to more than the available space,
    /// that axis collapses onto its center.
    ///
    /// ```
    /// # use sxplot_core::geometry::{Bounds, Insets, Point, Size};
    /// let page = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(640.0, 480.0));
    /// let plot = page.shrink(Insets::new(48.0, 24.0, 56.0, 72.0));
    /// assert_eq!(plot.min_x(), 72.0);
    /// assert_eq!(plot.min_y(), 48.0);
    /// assert_eq!(plot.width(), 544.0);
    /// assert_eq!(plot.height(), 376.0);
    /// ```
    pub fn shrink(&self, insets: Insets) -> Self {
        let center = self.center();

        let (min_x, max_x) = collapse_if_crossed(
            self.min_x + insets.left,
            self.max_x - insets.right,
            center.x,
        );
        let (min_y, max_y) = collapse_if_crossed(
            self.min_y + insets.top,
            self.max_y - insets.bottom,
            center.y,
        );

        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Whether `point` lies inside or on the edge.
    pub fn contains(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}

fn collapse_if_crossed(min: f32, max: f32, center: f32) -> (f32, f32) {
    if min > max { (center, center) } else { (min, max) }
}

/// Space on each side of a rectangle: figure margins or text padding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Sides in CSS order: top, right, bottom, left.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_max_and_padding() {
        let widest = Size::new(30.0, 10.0).max(Size::new(20.0, 12.0));
        assert_eq!(widest, Size::new(30.0, 12.0));

        let padded = Size::new(10.0, 20.0).add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(padded, Size::new(16.0, 24.0));
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0));
        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn test_shrink_collapses_when_margins_overflow() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 100.0));
        let shrunk = bounds.shrink(Insets::new(10.0, 20.0, 10.0, 20.0));

        assert_eq!(shrunk.width(), 0.0);
        assert_eq!(shrunk.min_x(), 5.0);
        assert_eq!(shrunk.height(), 80.0);
    }

    #[test]
    fn test_contains_includes_edges() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        assert!(bounds.contains(Point::new(0.0, 0.0)));
        assert!(bounds.contains(Point::new(10.0, 5.0)));
        assert!(!bounds.contains(Point::new(10.5, 5.0)));
    }
}
