//! SVG rendering of figures.
//!
//! [`SvgBuilder`] resolves a [`StyleConfig`] into an [`Svg`] exporter, which
//! lays out the plot area, axes, curves and legend of a [`Figure`].

mod axes;
mod legend;

use std::{fs::File, io::Write, path::PathBuf};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use sxplot_core::{
    apply_stroke,
    color::Color,
    draw::{StrokeCap, StrokeDefinition, StrokeJoin, Text, TextAnchor, TextDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

use crate::{config::StyleConfig, export, figure::Figure};

use axes::{Axis, data_range};

const PLOT_CLIP_ID: &str = "plot-area";

/// Margins around the plot area when the figure is not tight.
const FIXED_MARGINS: Insets = Insets::new(48.0, 24.0, 56.0, 72.0);

/// Space between adjacent annotations, and between annotations and the edge.
const PADDING: f32 = 8.0;

const TICK_LENGTH: f32 = 4.0;

const TICK_LABEL_GAP: f32 = 2.0;

/// Builder for [`Svg`] exporters.
pub struct SvgBuilder {
    file_name: PathBuf,
    style: StyleConfig,
    size: Size,
}

impl SvgBuilder {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            style: StyleConfig::default(),
            size: Size::new(640.0, 480.0),
        }
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Resolves the style into an exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let background = self
            .style
            .background_color()
            .map_err(export::Error::Render)?;
        let grid_color = self.style.grid_color().map_err(export::Error::Render)?;
        let grid_style = self.style.grid_style().map_err(export::Error::Render)?;

        let text_color = self.style.text_color().map_err(export::Error::Render)?;

        let mut text = TextDefinition::new();
        text.set_font_family(self.style.font_family());
        text.set_font_size(self.style.font_size());
        text.set_color(text_color);

        let mut label_text = text.clone();
        label_text.set_font_size(self.style.font_size() + 1);

        let mut title_text = text.clone();
        title_text.set_font_size(self.style.font_size() + 3);

        // Gap between tick labels and tick marks
        let mut tick_text = text.clone();
        tick_text.set_padding(Insets::new(0.0, TICK_LABEL_GAP, 0.0, TICK_LABEL_GAP));

        Ok(Svg {
            file_name: self.file_name,
            size: self.size,
            background,
            frame_stroke: StrokeDefinition::solid(Color::default(), 1.0),
            grid_stroke: StrokeDefinition::solid(grid_color, 0.8).with_style(grid_style),
            line_width: self.style.line_width(),
            tick_text,
            legend_text: text,
            label_text,
            title_text,
        })
    }
}

/// SVG exporter for a single figure.
pub struct Svg {
    file_name: PathBuf,
    size: Size,
    background: Option<Color>,
    frame_stroke: StrokeDefinition,
    grid_stroke: StrokeDefinition,
    line_width: f32,
    tick_text: TextDefinition,
    legend_text: TextDefinition,
    label_text: TextDefinition,
    title_text: TextDefinition,
}

impl Svg {
    /// Renders the figure into an SVG document.
    pub fn render(&self, figure: &Figure) -> Document {
        let curves = figure.curves();
        let x_axis = Axis::covering(data_range(
            curves.iter().flat_map(|c| c.points().iter().map(|p| p.0)),
        ));
        let y_axis = Axis::covering(data_range(
            curves.iter().flat_map(|c| c.points().iter().map(|p| p.1)),
        ));

        let margins = if figure.is_tight() {
            self.tight_margins(figure, &x_axis, &y_axis)
        } else {
            FIXED_MARGINS
        };
        let page = Bounds::new_from_top_left(Point::new(0.0, 0.0), self.size);
        let plot = page.shrink(margins);
        debug!(margins:?, plot:?; "Plot area laid out");

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.size.width(), self.size.height()),
            )
            .set("width", self.size.width())
            .set("height", self.size.height());

        if let Some(background) = self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", &background),
            );
        }

        doc = doc.add(self.create_clip_path(PLOT_CLIP_ID, plot));

        if figure.grid_enabled() {
            doc = doc.add(self.render_grid(plot, &x_axis, &y_axis));
        }
        doc = doc.add(self.render_curves(figure, plot, &x_axis, &y_axis));
        doc = doc.add(self.render_frame(plot));
        doc = doc.add(self.render_ticks(plot, &x_axis, &y_axis));
        doc = self.add_labels(doc, figure, page, plot);

        let entries = figure.legend_entries();
        if !entries.is_empty() {
            doc = doc.add(legend::render(
                &entries,
                plot,
                &self.legend_text,
                self.line_width,
            ));
        }

        doc
    }

    /// Writes an SVG document to the exporter's file.
    pub fn write_document(&self, doc: &Document) -> Result<(), export::Error> {
        info!(file_name:? = self.file_name; "Creating SVG file");
        let mut f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name:? = self.file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&mut f, "{doc}") {
            error!(file_name:? = self.file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }

    fn tight_margins(&self, figure: &Figure, x_axis: &Axis, y_axis: &Axis) -> Insets {
        let measure = |definition: &TextDefinition, content: &str| {
            Text::new(definition, content).calculate_size()
        };

        let y_tick_width = y_axis
            .ticks()
            .iter()
            .map(|tick| measure(&self.tick_text, &y_axis.tick_label(*tick)).width())
            .fold(0.0, f32::max);
        let x_tick = x_axis
            .ticks()
            .iter()
            .map(|tick| measure(&self.tick_text, &x_axis.tick_label(*tick)))
            .fold(Size::default(), Size::max);

        let x_label = figure
            .x_label()
            .map_or(0.0, |label| measure(&self.label_text, label).height() + PADDING);
        // Rotated, so its height takes horizontal space
        let y_label = figure
            .y_label()
            .map_or(0.0, |label| measure(&self.label_text, label).height() + PADDING);
        let title = figure
            .title()
            .map_or(0.0, |title| measure(&self.title_text, title).height() + PADDING);

        Insets::new(
            PADDING + title.max(x_tick.height() / 2.0),
            PADDING + x_tick.width() / 2.0,
            PADDING + TICK_LENGTH + PADDING / 2.0 + x_tick.height() + x_label,
            PADDING + TICK_LENGTH + PADDING / 2.0 + y_tick_width + y_label,
        )
    }

    fn create_clip_path(&self, clip_id: &str, bounds: Bounds) -> svg_element::Definitions {
        let clip_rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height());

        let clip_path = svg_element::ClipPath::new()
            .set("id", clip_id)
            .add(clip_rect);

        svg_element::Definitions::new().add(clip_path)
    }

    fn render_grid(&self, plot: Bounds, x_axis: &Axis, y_axis: &Axis) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "grid");

        for &tick in x_axis.ticks() {
            let x = x_position(plot, x_axis, tick);
            let line = svg_element::Line::new()
                .set("x1", x)
                .set("y1", plot.min_y())
                .set("x2", x)
                .set("y2", plot.max_y());
            group = group.add(apply_stroke!(line, &self.grid_stroke));
        }
        for &tick in y_axis.ticks() {
            let y = y_position(plot, y_axis, tick);
            let line = svg_element::Line::new()
                .set("x1", plot.min_x())
                .set("y1", y)
                .set("x2", plot.max_x())
                .set("y2", y);
            group = group.add(apply_stroke!(line, &self.grid_stroke));
        }

        group
    }

    /// One polyline per curve; points that are not finite are left out.
    fn render_curves(
        &self,
        figure: &Figure,
        plot: Bounds,
        x_axis: &Axis,
        y_axis: &Axis,
    ) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("class", "curves")
            .set("clip-path", format!("url(#{PLOT_CLIP_ID})"));

        for curve in figure.curves() {
            let points: Vec<String> = curve
                .points()
                .iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|&(x, y)| {
                    format!(
                        "{},{}",
                        x_position(plot, x_axis, x),
                        y_position(plot, y_axis, y)
                    )
                })
                .collect();

            let stroke = StrokeDefinition::solid(curve.color(), self.line_width)
                .with_join(StrokeJoin::Round)
                .with_cap(StrokeCap::Round);
            let polyline = svg_element::Polyline::new()
                .set("points", points.join(" "))
                .set("fill", "none");
            group = group.add(apply_stroke!(polyline, &stroke));
        }

        group
    }

    fn render_frame(&self, plot: Bounds) -> svg_element::Rectangle {
        let frame = svg_element::Rectangle::new()
            .set("x", plot.min_x())
            .set("y", plot.min_y())
            .set("width", plot.width())
            .set("height", plot.height())
            .set("fill", "none");
        apply_stroke!(frame, &self.frame_stroke)
    }

    fn render_ticks(&self, plot: Bounds, x_axis: &Axis, y_axis: &Axis) -> svg_element::Group {
        let mut group = svg_element::Group::new().set("class", "ticks");

        let label_y = plot.max_y() + TICK_LENGTH + PADDING / 2.0;
        for &tick in x_axis.ticks() {
            let x = x_position(plot, x_axis, tick);
            let mark = svg_element::Line::new()
                .set("x1", x)
                .set("y1", plot.max_y())
                .set("x2", x)
                .set("y2", plot.max_y() + TICK_LENGTH);
            group = group.add(apply_stroke!(mark, &self.frame_stroke));

            let label = x_axis.tick_label(tick);
            let text = Text::new(&self.tick_text, &label);
            let half_height = text.calculate_size().height() / 2.0;
            group = group.add(text.render(
                Point::new(x, label_y + half_height),
                TextAnchor::Middle,
                None,
            ));
        }

        let label_x = plot.min_x() - TICK_LENGTH - PADDING / 2.0;
        for &tick in y_axis.ticks() {
            let y = y_position(plot, y_axis, tick);
            let mark = svg_element::Line::new()
                .set("x1", plot.min_x() - TICK_LENGTH)
                .set("y1", y)
                .set("x2", plot.min_x())
                .set("y2", y);
            group = group.add(apply_stroke!(mark, &self.frame_stroke));

            let label = y_axis.tick_label(tick);
            group = group.add(Text::new(&self.tick_text, &label).render(
                Point::new(label_x, y),
                TextAnchor::End,
                None,
            ));
        }

        group
    }

    /// Axis labels hug the page edges; the title is centered above the plot.
    fn add_labels(&self, mut doc: Document, figure: &Figure, page: Bounds, plot: Bounds) -> Document {
        if let Some(label) = figure.x_label() {
            let text = Text::new(&self.label_text, label);
            let height = text.calculate_size().height();
            doc = doc.add(text.render(
                Point::new(plot.center().x(), page.max_y() - PADDING - height / 2.0),
                TextAnchor::Middle,
                None,
            ));
        }

        if let Some(label) = figure.y_label() {
            let text = Text::new(&self.label_text, label);
            let height = text.calculate_size().height();
            doc = doc.add(text.render(
                Point::new(page.min_x() + PADDING + height / 2.0, plot.center().y()),
                TextAnchor::Middle,
                Some(-90.0),
            ));
        }

        if let Some(title) = figure.title() {
            let text = Text::new(&self.title_text, title);
            let height = text.calculate_size().height();
            doc = doc.add(text.render(
                Point::new(plot.center().x(), (plot.min_y() - height / 2.0 - PADDING / 2.0).max(height / 2.0)),
                TextAnchor::Middle,
                None,
            ));
        }

        doc
    }
}

fn x_position(plot: Bounds, axis: &Axis, value: f64) -> f32 {
    plot.min_x() + (axis.fraction(value) as f32) * plot.width()
}

fn y_position(plot: Bounds, axis: &Axis, value: f64) -> f32 {
    plot.max_y() - (axis.fraction(value) as f32) * plot.height()
}

impl export::Exporter for Svg {
    fn export_figure(&mut self, figure: &Figure) -> Result<(), export::Error> {
        let doc = self.render(figure);
        debug!("SVG document rendered");

        self.write_document(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Canvas;

    fn sample_figure() -> Figure {
        let mut figure = Figure::new("unused.svg");
        figure.set_x_label("Frequency (MHz)");
        figure.set_y_label("Magnitude (dB)");
        figure.draw_curve(&[(100.0, -0.5), (200.0, -0.7), (300.0, -1.1)], "S₂₁");
        figure.draw_curve(&[(100.0, -20.0), (200.0, f64::NEG_INFINITY), (300.0, -22.0)], "S₃₁");
        figure
    }

    fn render(figure: &Figure) -> String {
        SvgBuilder::new("unused.svg")
            .build()
            .unwrap()
            .render(figure)
            .to_string()
    }

    #[test]
    fn test_one_polyline_per_curve() {
        let svg = render(&sample_figure());
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(!svg.contains("inf"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_labels_and_title() {
        let mut figure = sample_figure();
        figure.set_title("Directional coupler S parameters");
        let svg = render(&figure);

        assert!(svg.contains("Frequency (MHz)"));
        assert!(svg.contains("Magnitude (dB)"));
        assert!(svg.contains("Directional coupler S parameters"));
        assert!(svg.contains("rotate(-90"));
    }

    #[test]
    fn test_grid_only_when_enabled() {
        let mut figure = sample_figure();
        assert!(!render(&figure).contains("class=\"grid\""));

        figure.enable_grid(true);
        let svg = render(&figure);
        assert!(svg.contains("class=\"grid\""));
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_legend_lists_entries() {
        let svg = render(&sample_figure());
        assert!(svg.contains("class=\"legend\""));
        assert!(svg.contains("S₂₁"));
        assert!(svg.contains("S₃₁"));
    }

    #[test]
    fn test_empty_figure_still_has_axes() {
        let svg = render(&Figure::new("unused.svg"));
        assert!(svg.contains("class=\"ticks\""));
        assert!(svg.contains("0.2"));
        assert!(!svg.contains("<polyline"));
        assert!(!svg.contains("class=\"legend\""));
    }

    #[test]
    fn test_curves_are_clipped() {
        let svg = render(&sample_figure());
        assert!(svg.contains("<clipPath id=\"plot-area\""));
        assert!(svg.contains("url(#plot-area)"));
    }

    #[test]
    fn test_background_and_invalid_colors() {
        let style: StyleConfig = toml::from_str(r##"background_color = "#fafafa""##).unwrap();
        let svg = SvgBuilder::new("unused.svg")
            .with_style(&style)
            .build()
            .unwrap()
            .render(&Figure::new("unused.svg"))
            .to_string();
        assert!(svg.contains("width=\"100%\""));

        let style: StyleConfig = toml::from_str(r#"grid_color = "nope""#).unwrap();
        assert!(matches!(
            SvgBuilder::new("unused.svg").with_style(&style).build(),
            Err(export::Error::Render(_))
        ));
    }

    #[test]
    fn test_tight_layout_changes_margins() {
        let figure = sample_figure();
        let mut tight = figure.clone();
        tight.tight_layout();

        let svg = SvgBuilder::new("unused.svg").build().unwrap();
        let x_axis = Axis::covering(Some((100.0, 300.0)));
        let y_axis = Axis::covering(Some((-22.0, -0.5)));
        let margins = svg.tight_margins(&tight, &x_axis, &y_axis);

        assert!(margins.left() > PADDING);
        assert!(margins.bottom() > PADDING + TICK_LENGTH);
        assert_ne!(render(&figure), render(&tight));
    }
}
