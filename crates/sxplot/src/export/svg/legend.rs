//! The legend box drawn in the upper-right corner of the plot area.

use svg::node::element as svg_element;

use sxplot_core::{
    apply_stroke,
    color::Color,
    draw::{StrokeDefinition, Text, TextAnchor, TextDefinition},
    geometry::{Bounds, Point, Size},
};

/// Gap between the legend box and the plot frame.
const OFFSET: f32 = 8.0;
const INNER_PADDING: f32 = 6.0;
const SAMPLE_LENGTH: f32 = 20.0;
const SAMPLE_GAP: f32 = 6.0;
const ROW_SPACING: f32 = 2.0;

/// Renders one row per entry: a line sample in the entry's color followed
/// by its label.
pub(super) fn render(
    entries: &[(&str, Color)],
    plot: Bounds,
    text: &TextDefinition,
    line_width: f32,
) -> svg_element::Group {
    let label_size = entries
        .iter()
        .map(|(label, _)| Text::new(text, label).calculate_size())
        .fold(Size::default(), Size::max);
    let row_height = label_size.height() + ROW_SPACING;

    let box_size = Size::new(
        INNER_PADDING * 2.0 + SAMPLE_LENGTH + SAMPLE_GAP + label_size.width(),
        INNER_PADDING * 2.0 + row_height * entries.len() as f32,
    );
    let top_left = Point::new(
        plot.max_x() - OFFSET - box_size.width(),
        plot.min_y() + OFFSET,
    );

    let frame_stroke = StrokeDefinition::solid(Color::default().with_alpha(0.3), 0.8);
    let frame = svg_element::Rectangle::new()
        .set("x", top_left.x())
        .set("y", top_left.y())
        .set("width", box_size.width())
        .set("height", box_size.height())
        .set("rx", 2.0)
        .set("fill", "white")
        .set("fill-opacity", 0.8);

    let mut group = svg_element::Group::new()
        .set("class", "legend")
        .add(apply_stroke!(frame, &frame_stroke));

    for (row, (label, color)) in entries.iter().enumerate() {
        let center_y = top_left.y() + INNER_PADDING + row_height * (row as f32 + 0.5);
        let sample_start = top_left.x() + INNER_PADDING;

        let sample_stroke = StrokeDefinition::solid(*color, line_width);
        let sample = svg_element::Line::new()
            .set("x1", sample_start)
            .set("y1", center_y)
            .set("x2", sample_start + SAMPLE_LENGTH)
            .set("y2", center_y);
        group = group.add(apply_stroke!(sample, &sample_stroke));

        group = group.add(Text::new(text, label).render(
            Point::new(sample_start + SAMPLE_LENGTH + SAMPLE_GAP, center_y),
            TextAnchor::Start,
            None,
        ));
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_sample_per_entry() {
        let plot = Bounds::new_from_top_left(Point::new(50.0, 40.0), Size::new(500.0, 300.0));
        let red = Color::new("red").unwrap();
        let blue = Color::new("blue").unwrap();

        let group = render(&[("S₂₁", red), ("S₁₂", blue)], plot, &TextDefinition::new(), 1.5);
        let svg = group.to_string();

        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains("S₂₁"));
        assert!(svg.contains("S₁₂"));
    }
}
