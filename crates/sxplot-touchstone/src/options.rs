//! Option line settings: `# <unit> <parameter> <format> R <impedance>`.

use std::fmt;

use num_complex::Complex64;

use sxplot_core::catalog::FrequencyUnit;

/// How each parameter value pair of a data record is encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataFormat {
    /// Real and imaginary part
    RealImaginary,
    /// Linear magnitude and angle in degrees
    #[default]
    MagnitudeAngle,
    /// Magnitude in dB and angle in degrees
    DecibelAngle,
}

impl DataFormat {
    /// Matches an option-line word, ignoring case.
    pub fn from_option(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "ri" => Some(Self::RealImaginary),
            "ma" => Some(Self::MagnitudeAngle),
            "db" => Some(Self::DecibelAngle),
            _ => None,
        }
    }

    /// Decodes one value pair into a complex number.
    pub fn decode(self, a: f64, b: f64) -> Complex64 {
        match self {
            Self::RealImaginary => Complex64::new(a, b),
            Self::MagnitudeAngle => Complex64::from_polar(a, b.to_radians()),
            Self::DecibelAngle => Complex64::from_polar(10f64.powf(a / 20.0), b.to_radians()),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::RealImaginary => "RI",
            Self::MagnitudeAngle => "MA",
            Self::DecibelAngle => "DB",
        };
        write!(f, "{text}")
    }
}

/// Column order of 2-port records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TwoPortOrder {
    /// `S11 S21 S12 S22`, the only order Touchstone 1.x knows
    #[default]
    Order21_12,
    /// `S11 S12 S21 S22`, row-major like every other port count
    Order12_21,
}

impl TwoPortOrder {
    pub fn from_keyword_value(value: &str) -> Option<Self> {
        match value {
            "21_12" => Some(Self::Order21_12),
            "12_21" => Some(Self::Order12_21),
            _ => None,
        }
    }
}

/// Settings from the option line, with the Touchstone defaults
/// `GHz S MA R 50` for anything the line leaves out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionLine {
    pub unit: FrequencyUnit,
    pub format: DataFormat,
    pub reference_impedance: f64,
}

impl Default for OptionLine {
    fn default() -> Self {
        Self {
            unit: FrequencyUnit::GHz,
            format: DataFormat::default(),
            reference_impedance: 50.0,
        }
    }
}

/// Maps the `k`-th value pair of a record to its zero-based `(row, col)`.
pub(crate) fn matrix_position(k: usize, ports: usize, order: TwoPortOrder) -> (usize, usize) {
    if ports == 2 && order == TwoPortOrder::Order21_12 {
        (k % 2, k / 2)
    } else {
        (k / ports, k % ports)
    }
}
