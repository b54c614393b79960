//! Plotting surfaces.
//!
//! [`Canvas`] is the narrow interface the plotter draws through. [`Figure`]
//! is the built-in implementation: it collects curves and annotations and
//! writes them out as an SVG file when shown.

use std::path::{Path, PathBuf};

use log::{debug, info};

use sxplot_core::{
    color::{Color, Palette},
    geometry::Size,
};

use crate::{
    SxplotError,
    config::{AppConfig, StyleConfig},
    export::{Exporter, svg::SvgBuilder},
};

/// A surface curves and annotations are drawn on.
///
/// Calls are plain pass-throughs: the caller decides the order, and
/// implementations keep the last value set for every label.
pub trait Canvas {
    /// Draws one curve of `(x, y)` points with its legend label.
    fn draw_curve(&mut self, points: &[(f64, f64)], label: &str);

    fn set_x_label(&mut self, label: &str);

    fn set_y_label(&mut self, label: &str);

    fn set_title(&mut self, title: &str);

    /// Replaces the legend labels of the curves drawn so far, in draw order.
    fn set_legend_labels(&mut self, labels: &[String]);

    fn enable_grid(&mut self, enabled: bool);

    /// Sizes margins to the annotations instead of using fixed ones.
    fn tight_layout(&mut self);

    /// Presents the finished figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be rendered or written.
    fn show(&mut self) -> Result<(), SxplotError>;
}

/// A curve drawn on a [`Figure`].
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    label: String,
    points: Vec<(f64, f64)>,
    color: Color,
}

impl Curve {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// The built-in [`Canvas`], exported to SVG by [`Canvas::show`].
///
/// Curve colors are taken from the style palette in draw order.
///
/// # Examples
///
/// ```
/// use sxplot::figure::{Canvas, Figure};
///
/// let mut figure = Figure::new("out.svg");
/// figure.set_x_label("Frequency (MHz)");
/// figure.draw_curve(&[(1.0, -3.0), (2.0, -6.0)], "S₂₁");
/// figure.draw_curve(&[(1.0, -20.0), (2.0, -18.0)], "S₁₁");
///
/// assert_eq!(figure.curves().len(), 2);
/// assert_ne!(figure.curves()[0].color(), figure.curves()[1].color());
/// assert_eq!(figure.legend_entries().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Figure {
    curves: Vec<Curve>,
    x_label: Option<String>,
    y_label: Option<String>,
    title: Option<String>,
    legend_override: Option<Vec<String>>,
    grid: bool,
    tight: bool,
    size: Size,
    style: StyleConfig,
    palette: Palette,
    output: PathBuf,
}

impl Figure {
    /// Creates an empty 640×480 figure with the default style.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            curves: Vec::new(),
            x_label: None,
            y_label: None,
            title: None,
            legend_override: None,
            grid: false,
            tight: false,
            size: Size::new(640.0, 480.0),
            style: StyleConfig::default(),
            palette: Palette::default(),
            output: output.into(),
        }
    }

    /// Creates an empty figure sized and styled from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SxplotError::Config`] if the configured palette is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, SxplotError> {
        let figure = config.figure();
        Ok(Self::new(figure.output())
            .with_size(Size::new(figure.width(), figure.height()))
            .with_style(config.style())?)
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Applies `style`, resolving its palette for the curves drawn from now on.
    ///
    /// # Errors
    ///
    /// Returns [`SxplotError::Config`] if the palette is invalid.
    pub fn with_style(mut self, style: &StyleConfig) -> Result<Self, SxplotError> {
        self.palette = style.palette().map_err(SxplotError::Config)?;
        self.style = style.clone();
        Ok(self)
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn grid_enabled(&self) -> bool {
        self.grid
    }

    pub fn is_tight(&self) -> bool {
        self.tight
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns the labels and colors listed in the legend, in draw order.
    ///
    /// With a legend override, the n-th override label names the n-th curve;
    /// surplus labels are ignored and curves past the end of the list are
    /// left out. Without one, every curve with a non-empty label is listed.
    pub fn legend_entries(&self) -> Vec<(&str, Color)> {
        match &self.legend_override {
            Some(labels) => self
                .curves
                .iter()
                .zip(labels)
                .map(|(curve, label)| (label.as_str(), curve.color))
                .collect(),
            None => self
                .curves
                .iter()
                .filter(|curve| !curve.label.is_empty())
                .map(|curve| (curve.label.as_str(), curve.color))
                .collect(),
        }
    }

    /// Renders the figure to an SVG string without writing it.
    ///
    /// # Errors
    ///
    /// Returns [`SxplotError::Export`] if the style cannot be resolved.
    pub fn render_svg(&self) -> Result<String, SxplotError> {
        let svg = SvgBuilder::new(&self.output)
            .with_style(&self.style)
            .with_size(self.size)
            .build()?;
        Ok(svg.render(self).to_string())
    }
}

impl Canvas for Figure {
    fn draw_curve(&mut self, points: &[(f64, f64)], label: &str) {
        let color = self.palette.color_for(self.curves.len());
        debug!(label, points = points.len(), color:% = color; "Curve drawn");
        self.curves.push(Curve {
            label: label.to_string(),
            points: points.to_vec(),
            color,
        });
    }

    fn set_x_label(&mut self, label: &str) {
        self.x_label = Some(label.to_string());
    }

    fn set_y_label(&mut self, label: &str) {
        self.y_label = Some(label.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_legend_labels(&mut self, labels: &[String]) {
        self.legend_override = Some(labels.to_vec());
    }

    fn enable_grid(&mut self, enabled: bool) {
        self.grid = enabled;
    }

    fn tight_layout(&mut self) {
        self.tight = true;
    }

    fn show(&mut self) -> Result<(), SxplotError> {
        info!(output:? = self.output, curves = self.curves.len(); "Exporting figure");
        let mut svg = SvgBuilder::new(&self.output)
            .with_style(&self.style)
            .with_size(self.size)
            .build()?;
        svg.export_figure(self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure_with_curves(labels: &[&str]) -> Figure {
        let mut figure = Figure::new("unused.svg");
        for (i, label) in labels.iter().enumerate() {
            figure.draw_curve(&[(0.0, i as f64), (1.0, i as f64)], label);
        }
        figure
    }

    #[test]
    fn test_colors_follow_palette_cycle() {
        let style: StyleConfig = toml::from_str(r#"palette = ["red", "blue"]"#).unwrap();
        let mut figure = Figure::new("unused.svg").with_style(&style).unwrap();
        for _ in 0..3 {
            figure.draw_curve(&[], "x");
        }

        let red = Color::new("red").unwrap();
        let blue = Color::new("blue").unwrap();
        let colors: Vec<_> = figure.curves().iter().map(Curve::color).collect();
        assert_eq!(colors, vec![red, blue, red]);
    }

    #[test]
    fn test_invalid_palette_is_a_config_error() {
        let style: StyleConfig = toml::from_str(r#"palette = ["nope"]"#).unwrap();
        let result = Figure::new("unused.svg").with_style(&style);
        assert!(matches!(result, Err(SxplotError::Config(_))));
    }

    #[test]
    fn test_legend_defaults_to_curve_labels() {
        let figure = figure_with_curves(&["S₁₂", "", "S₂₁"]);
        let labels: Vec<_> = figure.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["S₁₂", "S₂₁"]);
    }

    #[test]
    fn test_legend_override_replaces_in_order() {
        let mut figure = figure_with_curves(&["a", "b", "c"]);
        figure.set_legend_labels(&["A".to_string(), "B".to_string()]);

        let entries = figure.legend_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("A", figure.curves()[0].color()));
        assert_eq!(entries[1], ("B", figure.curves()[1].color()));
    }

    #[test]
    fn test_legend_override_surplus_labels_ignored() {
        let mut figure = figure_with_curves(&["a"]);
        let labels: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        figure.set_legend_labels(&labels);

        let labels: Vec<_> = figure.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["A"]);
    }

    #[test]
    fn test_annotations_keep_last_value() {
        let mut figure = Figure::new("unused.svg");
        figure.set_x_label("Frequency (Hz)");
        figure.set_x_label("Frequency (GHz)");
        figure.set_title("Thru");
        figure.enable_grid(true);
        figure.tight_layout();

        assert_eq!(figure.x_label(), Some("Frequency (GHz)"));
        assert_eq!(figure.y_label(), None);
        assert_eq!(figure.title(), Some("Thru"));
        assert!(figure.grid_enabled());
        assert!(figure.is_tight());
    }

    #[test]
    fn test_show_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("figure.svg");

        let mut figure = Figure::new(&output);
        figure.draw_curve(&[(1.0, -1.0), (2.0, -2.0)], "S₂₁");
        figure.show().unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("<svg"));
        assert!(written.contains("<polyline"));
    }

    #[test]
    fn test_show_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut figure = Figure::new(dir.path().join("missing").join("figure.svg"));
        assert!(matches!(figure.show(), Err(SxplotError::Export(_))));
    }
}
