//! Plotting Touchstone files onto a [`Canvas`].
//!
//! [`Plotter::plot_one`] draws a single parameter of a single file, setting
//! the axis labels for the chosen frequency unit. [`Plotter::plot_many`]
//! draws a whole [`PlotSpec`] onto one canvas and finishes the figure with a
//! tight layout and a grid. Title and legend are left to the caller.

use std::{fs, path::Path};

use log::{debug, error, info};

use sxplot_core::catalog::{FrequencyUnit, SParameter};
use sxplot_touchstone::{self as touchstone, Network};

use crate::{PlotSpec, SxplotError, figure::Canvas, render::render_trace};

/// Per-call settings of [`Plotter::plot_one`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    y_axis_label: String,
    frequency_unit: FrequencyUnit,
    show: bool,
}

impl PlotOptions {
    pub fn new(y_axis_label: impl Into<String>, frequency_unit: FrequencyUnit, show: bool) -> Self {
        Self {
            y_axis_label: y_axis_label.into(),
            frequency_unit,
            show,
        }
    }

    pub fn y_axis_label(&self) -> &str {
        &self.y_axis_label
    }

    pub fn frequency_unit(&self) -> FrequencyUnit {
        self.frequency_unit
    }

    /// Whether the canvas is shown right after the trace is drawn.
    pub fn show(&self) -> bool {
        self.show
    }

    pub fn with_frequency_unit(mut self, unit: FrequencyUnit) -> Self {
        self.frequency_unit = unit;
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }
}

impl Default for PlotOptions {
    /// `Magnitude (dB)` over Hz, not shown.
    fn default() -> Self {
        Self::new("Magnitude (dB)", FrequencyUnit::Hz, false)
    }
}

/// Draws Touchstone data onto a canvas.
///
/// # Examples
///
/// ```no_run
/// use sxplot::{PlotSpec, Plotter, figure::Figure};
/// use sxplot_core::catalog::{FrequencyUnit, SParameter};
///
/// let mut spec = PlotSpec::new();
/// spec.add("thru.s2p", [SParameter::S12, SParameter::S21]);
/// spec.add("coupled.s2p", [SParameter::S31]);
///
/// let plotter = Plotter::default();
/// let mut figure = Figure::new("coupler.svg");
/// plotter.plot_many(&mut figure, &spec, FrequencyUnit::MHz)?;
/// Plotter::set_title(&mut figure, "Directional coupler S parameters");
/// Plotter::render_to_screen(&mut figure)?;
/// # Ok::<(), sxplot::SxplotError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Plotter {
    options: PlotOptions,
}

impl Plotter {
    /// Creates a plotter whose defaults are `options`.
    pub fn new(options: PlotOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Draws parameter `id` of the file at `path` onto `canvas`.
    ///
    /// The x label is set to `Frequency (<unit>)` and the y label to the
    /// option's label before the curve is drawn. The canvas is shown
    /// afterwards when `options.show()` is set.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or if `id` is out of
    /// range for the file's port count.
    pub fn plot_one(
        &self,
        canvas: &mut impl Canvas,
        path: &Path,
        id: SParameter,
        label: &str,
        options: &PlotOptions,
    ) -> Result<(), SxplotError> {
        let unit = options.frequency_unit();
        let mut network = load_network(path)?;
        network.set_frequency_unit(unit.unit_text().alias())?;

        canvas.set_x_label(&format!("Frequency ({})", unit.unit_text().canonical()));
        canvas.set_y_label(options.y_axis_label());
        render_trace(canvas, &network, id, label)?;

        if options.show() {
            canvas.show()?;
        }
        Ok(())
    }

    /// [`Plotter::plot_one`] with this plotter's default options.
    pub fn plot_one_default(
        &self,
        canvas: &mut impl Canvas,
        path: &Path,
        id: SParameter,
        label: &str,
    ) -> Result<(), SxplotError> {
        self.plot_one(canvas, path, id, label, &self.options)
    }

    /// Draws every parameter of every file in `spec`, in order, with the
    /// frequency axis in `unit`, then applies a tight layout and the grid.
    ///
    /// Each curve is labelled with its parameter's legend text. The canvas
    /// is not shown, and title and legend are not touched.
    ///
    /// # Errors
    ///
    /// The first file that fails aborts the whole batch.
    pub fn plot_many(
        &self,
        canvas: &mut impl Canvas,
        spec: &PlotSpec,
        unit: FrequencyUnit,
    ) -> Result<(), SxplotError> {
        info!(files = spec.len(), traces = spec.trace_count(), unit:% = unit; "Plotting traces");

        let options = self.options.clone().with_frequency_unit(unit).with_show(false);
        for (path, ids) in spec.iter() {
            for &id in ids {
                self.plot_one(canvas, path, id, id.legend_text(), &options)
                    .inspect_err(|err| {
                        error!(path:? = path, parameter:% = id, err:% = err; "Failed to plot trace");
                    })?;
            }
        }

        canvas.tight_layout();
        canvas.enable_grid(true);
        Ok(())
    }

    pub fn set_title(canvas: &mut impl Canvas, title: &str) {
        canvas.set_title(title);
    }

    /// Relabels the curves drawn so far, in draw order.
    pub fn override_legend(canvas: &mut impl Canvas, labels: &[String]) {
        canvas.set_legend_labels(labels);
    }

    pub fn render_to_screen(canvas: &mut impl Canvas) -> Result<(), SxplotError> {
        canvas.show()
    }
}

/// Reads and parses one Touchstone file, naming the network after it.
fn load_network(path: &Path) -> Result<Network, SxplotError> {
    debug!(path:? = path; "Loading network");
    let source = fs::read_to_string(path)?;

    let mut network = touchstone::parse(&source, touchstone::ports_from_path(path))
        .map_err(|err| SxplotError::new_parse_error(err, source.as_str(), path))?;
    if let Some(stem) = path.file_stem() {
        network.set_name(stem.to_string_lossy());
    }

    debug!(
        path:? = path,
        ports = network.ports(),
        points = network.len();
        "Network loaded"
    );
    Ok(network)
}
