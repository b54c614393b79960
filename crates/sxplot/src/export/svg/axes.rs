//! Axis ranges, tick placement and tick labels.

/// Number of tick intervals aimed for on each axis.
const TARGET_INTERVALS: f64 = 6.0;

/// Fraction of the data span added on each side of the data.
const RANGE_MARGIN: f64 = 0.05;

/// Values at or above this magnitude get scientific tick labels.
const SCIENTIFIC_THRESHOLD: f64 = 1.0e6;

/// Returns the smallest and largest finite value, or `None` if there is none.
pub(super) fn data_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Rounds `raw` up to the nearest step of the form 1, 2 or 5 × 10ⁿ.
pub(super) fn nice_step(raw: f64) -> f64 {
    let base = 10f64.powf(raw.log10().floor());
    let fraction = raw / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// A linear axis with its ticks.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Axis {
    min: f64,
    max: f64,
    step: f64,
    ticks: Vec<f64>,
}

impl Axis {
    /// Builds an axis showing `range` with a small margin on both sides.
    ///
    /// Without data the axis spans `0..1`; a single value is widened
    /// around itself.
    pub(super) fn covering(range: Option<(f64, f64)>) -> Self {
        let (min, max) = match range {
            None => (0.0, 1.0),
            Some((min, max)) if min == max => {
                let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
                (min - pad, max + pad)
            }
            Some((min, max)) => {
                let margin = (max - min) * RANGE_MARGIN;
                (min - margin, max + margin)
            }
        };

        let step = nice_step((max - min) / TARGET_INTERVALS);
        let first = (min / step).ceil() as i64;
        let last = (max / step).floor() as i64;
        let ticks = (first..=last).map(|k| k as f64 * step).collect();

        Self {
            min,
            max,
            step,
            ticks,
        }
    }

    pub(super) fn min(&self) -> f64 {
        self.min
    }

    pub(super) fn max(&self) -> f64 {
        self.max
    }

    pub(super) fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    /// Position of `value` along the axis, 0 at `min` and 1 at `max`.
    pub(super) fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// Formats a tick value with as many decimals as the step needs.
    pub(super) fn tick_label(&self, value: f64) -> String {
        let magnitude = self.min.abs().max(self.max.abs());
        let step_exponent = self.step.log10().floor();

        if magnitude >= SCIENTIFIC_THRESHOLD {
            let digits = (magnitude.log10().floor() - step_exponent).max(0.0) as usize;
            return format!("{value:.digits$e}");
        }

        let decimals = (-step_exponent).max(0.0) as usize;
        format!("{value:.decimals$}")
    }
}
