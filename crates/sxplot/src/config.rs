//! Configuration types for sxplot figures.
//!
//! All types implement [`serde::Deserialize`] so a whole plotting session can
//! be described in a TOML file; every field is optional and falls back to
//! the defaults documented on its accessor.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`DiscoveryConfig`] - Where to look for Touchstone files.
//! - [`SelectionConfig`] - Which file to pick and which parameters to plot from it.
//! - [`FigureConfig`] - Figure size, labels, legend and output path.
//! - [`StyleConfig`] - Colors, line width and fonts.
//!
//! # Example
//!
//! ```
//! # use sxplot::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.discovery().filter(), ".s2p");
//! assert_eq!(config.figure().y_axis_label(), "Magnitude (dB)");
//! assert!(config.style().palette().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use sxplot_core::{
    catalog::{FrequencyUnit, SParameter},
    color::{Color, Palette},
    draw::StrokeStyle,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    discovery: DiscoveryConfig,

    /// One entry per file to plot, in draw order.
    #[serde(default)]
    selection: Vec<SelectionConfig>,

    #[serde(default)]
    figure: FigureConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(
        discovery: DiscoveryConfig,
        selection: Vec<SelectionConfig>,
        figure: FigureConfig,
        style: StyleConfig,
    ) -> Self {
        Self {
            discovery,
            selection,
            figure,
            style,
        }
    }

    pub fn discovery(&self) -> &DiscoveryConfig {
        &self.discovery
    }

    pub fn discovery_mut(&mut self) -> &mut DiscoveryConfig {
        &mut self.discovery
    }

    pub fn selection(&self) -> &[SelectionConfig] {
        &self.selection
    }

    /// Replaces the file selection.
    pub fn set_selection(&mut self, selection: Vec<SelectionConfig>) {
        self.selection = selection;
    }

    pub fn figure(&self) -> &FigureConfig {
        &self.figure
    }

    pub fn figure_mut(&mut self) -> &mut FigureConfig {
        &mut self.figure
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Where Touchstone files are discovered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    directory: PathBuf,
    filter: String,
}

impl DiscoveryConfig {
    /// Directory searched (non-recursively). Defaults to the working directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Substring a file name must contain. Defaults to `.s2p`.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            filter: ".s2p".to_string(),
        }
    }
}

/// A file picked from the discovered set, with the parameters to draw.
///
/// ```toml
/// [[selection]]
/// fragment = "p1 - 1, p2 -2"
/// parameters = ["S12", "S21"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectionConfig {
    fragment: String,
    parameters: Vec<SParameter>,
}

impl SelectionConfig {
    pub fn new(fragment: impl Into<String>, parameters: Vec<SParameter>) -> Self {
        Self {
            fragment: fragment.into(),
            parameters,
        }
    }

    /// Substring of the path that identifies the file.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn parameters(&self) -> &[SParameter] {
        &self.parameters
    }
}

/// Figure-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    width: f32,
    height: f32,
    title: Option<String>,
    legend: Option<Vec<String>>,
    y_axis_label: String,
    frequency_unit: FrequencyUnit,
    output: PathBuf,
}

impl FigureConfig {
    /// Width in pixels. Defaults to 640.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height in pixels. Defaults to 480.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Legend labels replacing the per-trace defaults, in draw order.
    pub fn legend(&self) -> Option<&[String]> {
        self.legend.as_deref()
    }

    /// Defaults to `Magnitude (dB)`.
    pub fn y_axis_label(&self) -> &str {
        &self.y_axis_label
    }

    /// Unit of the frequency axis. Defaults to Hz.
    pub fn frequency_unit(&self) -> FrequencyUnit {
        self.frequency_unit
    }

    /// Path the SVG is written to. Defaults to `sxplot.svg`.
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_legend(&mut self, legend: Vec<String>) {
        self.legend = Some(legend);
    }

    pub fn set_y_axis_label(&mut self, label: impl Into<String>) {
        self.y_axis_label = label.into();
    }

    pub fn set_frequency_unit(&mut self, unit: FrequencyUnit) {
        self.frequency_unit = unit;
    }

    pub fn set_output(&mut self, output: impl Into<PathBuf>) {
        self.output = output.into();
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            title: None,
            legend: None,
            y_axis_label: "Magnitude (dB)".to_string(),
            frequency_unit: FrequencyUnit::Hz,
            output: PathBuf::from("sxplot.svg"),
        }
    }
}

/// Visual styling of rendered figures.
///
/// Colors are kept as strings until used, so an invalid color is reported
/// when the figure is built rather than when the file is loaded.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    palette: Option<Vec<String>>,
    line_width: Option<f32>,
    font_family: Option<String>,
    font_size: Option<u16>,
    grid_color: Option<String>,
    grid_style: Option<String>,
    text_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the trace color cycle; the ten-color default when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or holds an invalid color.
    pub fn palette(&self) -> Result<Palette, String> {
        match &self.palette {
            Some(colors) => {
                Palette::from_strs(colors).map_err(|err| format!("Invalid palette in config: {err}"))
            }
            None => Ok(Palette::default()),
        }
    }

    /// Returns the grid line color, light grey when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid [`Color`].
    pub fn grid_color(&self) -> Result<Color, String> {
        Color::new(self.grid_color.as_deref().unwrap_or("#b0b0b0"))
            .map_err(|err| format!("Invalid grid color in config: {err}"))
    }

    /// Returns the grid line pattern: `solid`, `dashed`, `dotted` or an
    /// SVG dasharray such as `"4,2"`. Dotted when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured pattern cannot be parsed.
    pub fn grid_style(&self) -> Result<StrokeStyle, String> {
        match &self.grid_style {
            Some(style) => style
                .parse()
                .map_err(|err| format!("Invalid grid style in config: {err}")),
            None => Ok(StrokeStyle::Dotted),
        }
    }

    /// Returns the color of labels, ticks, title and legend text, black when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid [`Color`].
    pub fn text_color(&self) -> Result<Color, String> {
        match &self.text_color {
            Some(color) => {
                Color::new(color).map_err(|err| format!("Invalid text color in config: {err}"))
            }
            None => Ok(Color::default()),
        }
    }

    /// Trace line width in pixels. Defaults to 1.5.
    pub fn line_width(&self) -> f32 {
        self.line_width.unwrap_or(1.5)
    }

    /// Defaults to `sans-serif`.
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or("sans-serif")
    }

    /// Font size in points. Defaults to 10.
    pub fn font_size(&self) -> u16 {
        self.font_size.unwrap_or(10)
    }
}
