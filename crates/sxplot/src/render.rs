//! Drawing a single S-parameter of a network.

use log::debug;

use sxplot_core::catalog::SParameter;
use sxplot_touchstone::Network;

use crate::{SxplotError, figure::Canvas};

/// Draws the dB magnitude of `id` over frequency onto `canvas`.
///
/// The frequency axis is in the network's display unit.
///
/// # Errors
///
/// Returns [`SxplotError::Network`] if `id` names a port the network does
/// not have.
pub(crate) fn render_trace(
    canvas: &mut impl Canvas,
    network: &Network,
    id: SParameter,
    label: &str,
) -> Result<(), SxplotError> {
    let (row, col) = id.indices();
    let trace = network.trace_db(row, col)?;
    debug!(
        network:? = network.name(),
        parameter:% = id,
        output_port = id.output_port(),
        input_port = id.input_port(),
        points = trace.len(),
        unit:% = trace.unit();
        "Rendering trace"
    );

    canvas.draw_curve(trace.points(), label);
    Ok(())
}
