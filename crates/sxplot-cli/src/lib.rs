//! CLI logic for the sxplot Touchstone plotting tool.
//!
//! Loads the configuration, layers the command-line overrides on top and
//! drives the [`PlotBuilder`] pipeline.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::{info, warn};

use sxplot::{PlotBuilder, SxplotError};

/// Run the sxplot CLI application
///
/// Every configured selection is resolved against the files in the
/// directory, drawn onto one figure and written to the output SVG.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SxplotError` for:
/// - Configuration loading errors
/// - Directory and file lookup errors
/// - Touchstone parsing errors
/// - Parameters outside a network's port range
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), SxplotError> {
    info!(
        directory:? = args.directory,
        config:? = args.config;
        "Plotting Touchstone files"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    args.apply_to(&mut app_config);

    if app_config.selection().is_empty() {
        warn!("No selection given, the figure will be empty");
    }

    let builder = PlotBuilder::new(app_config);
    let figure = builder.run()?;

    info!(
        output_file:? = figure.output(),
        curves = figure.curves().len();
        "SVG exported successfully"
    );

    Ok(())
}
