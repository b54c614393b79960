//! sxplot - Plot S-parameters from Touchstone files onto one figure.
//!
//! Discovery, selection, plotting and SVG rendering for Touchstone (`.sNp`)
//! measurements. Any number of parameters from any number of files are drawn
//! onto a shared figure with a common frequency axis.

pub mod config;
pub mod figure;
pub mod locator;
pub mod plotter;

mod error;
mod export;
mod plot_spec;
mod render;

pub use sxplot_core::{catalog, color};

pub use error::SxplotError;
pub use plot_spec::PlotSpec;
pub use plotter::{PlotOptions, Plotter};

use log::{debug, info, trace};

use config::AppConfig;
use figure::Figure;

/// Builder for locating, plotting and rendering Touchstone files.
///
/// This drives the whole pipeline from an [`AppConfig`]: the discovery
/// section names the directory and filter, every selection entry picks one
/// file and its parameters, and the figure and style sections shape the
/// output.
///
/// # Examples
///
/// ```rust,no_run
/// use sxplot::{PlotBuilder, config::AppConfig};
///
/// let builder = PlotBuilder::new(AppConfig::default());
///
/// // Resolve the configured selection against the files on disk
/// let spec = builder.plot_spec()
///     .expect("Failed to locate files");
///
/// // Draw every trace onto a configured figure
/// let mut figure = builder.build_figure(&spec)
///     .expect("Failed to plot");
///
/// // Render to an SVG string, or write the configured output file
/// let svg = figure.render_svg().expect("Failed to render");
/// builder.export(&mut figure).expect("Failed to write");
/// ```
#[derive(Default)]
pub struct PlotBuilder {
    config: AppConfig,
}

impl PlotBuilder {
    /// Create a new plot builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolve the configured selection into a [`PlotSpec`].
    ///
    /// The configured directory is searched once; every selection entry
    /// then picks the first discovered file whose path contains its
    /// fragment.
    ///
    /// # Errors
    ///
    /// Returns [`SxplotError::InvalidDirectory`] if the directory cannot be
    /// searched and [`SxplotError::FileNotFound`] for the first fragment
    /// that matches no file.
    pub fn plot_spec(&self) -> Result<PlotSpec, SxplotError> {
        let discovery = self.config.discovery();
        info!(
            directory:? = discovery.directory(),
            filter = discovery.filter();
            "Locating Touchstone files"
        );

        let candidates = locator::discover(discovery.directory(), discovery.filter())?;
        let mut spec = PlotSpec::new();
        for selection in self.config.selection() {
            let path = locator::select(&candidates, selection.fragment())?;
            spec.add(path, selection.parameters().iter().copied());
        }

        debug!(files = spec.len(), traces = spec.trace_count(); "Plot spec resolved");
        trace!(spec:?; "Plot spec");
        Ok(spec)
    }

    /// Draw `spec` onto a new figure and finish it with the configured
    /// title and legend.
    ///
    /// # Errors
    ///
    /// Returns `SxplotError` if the style is invalid or any file fails to
    /// load or plot.
    pub fn build_figure(&self, spec: &PlotSpec) -> Result<Figure, SxplotError> {
        let figure_config = self.config.figure();
        let mut figure = Figure::from_config(&self.config)?;

        let plotter = Plotter::new(PlotOptions::new(
            figure_config.y_axis_label(),
            figure_config.frequency_unit(),
            false,
        ));
        plotter.plot_many(&mut figure, spec, figure_config.frequency_unit())?;

        if let Some(title) = figure_config.title() {
            Plotter::set_title(&mut figure, title);
        }
        if let Some(labels) = figure_config.legend() {
            Plotter::override_legend(&mut figure, labels);
        }

        info!(curves = figure.curves().len(); "Figure built");
        Ok(figure)
    }

    /// Write the figure to its output file.
    ///
    /// # Errors
    ///
    /// Returns [`SxplotError::Export`] if the SVG cannot be written.
    pub fn export(&self, figure: &mut Figure) -> Result<(), SxplotError> {
        Plotter::render_to_screen(figure)
    }

    /// Run the whole pipeline and write the configured output file.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage.
    pub fn run(&self) -> Result<Figure, SxplotError> {
        let spec = self.plot_spec()?;
        let mut figure = self.build_figure(&spec)?;
        self.export(&mut figure)?;
        Ok(figure)
    }
}
