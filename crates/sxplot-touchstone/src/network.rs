//! The network model produced by the reader.

use num_complex::Complex64;
use thiserror::Error;

use sxplot_core::catalog::FrequencyUnit;

/// Errors raised when querying or reconfiguring a [`Network`].
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("unknown frequency unit `{0}`")]
    UnknownUnit(String),

    #[error("S{}{} is out of range for a {ports}-port network", .row + 1, .col + 1)]
    PortOutOfRange { row: usize, col: usize, ports: usize },

    #[error("expected {expected} matrix entries per frequency point, found {found}")]
    MatrixShape { expected: usize, found: usize },

    #[error("a {0}-port matrix does not fit in memory")]
    TooManyPorts(usize),
}

/// A magnitude trace over frequency, ready for plotting.
///
/// Frequencies are expressed in [`Trace::unit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    points: Vec<(f64, f64)>,
    unit: FrequencyUnit,
}

impl Trace {
    /// `(frequency, value)` pairs in ascending frequency order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A multi-port network measurement: an S-matrix per frequency point.
///
/// Frequencies are stored in Hz; the display unit only affects the
/// frequency axis of traces extracted with [`Network::trace_db`].
///
/// # Examples
///
/// ```
/// use num_complex::Complex64;
/// use sxplot_touchstone::Network;
///
/// let mut network = Network::new(
///     1,
///     50.0,
///     vec![1.0e9, 2.0e9],
///     vec![vec![Complex64::new(0.1, 0.0)], vec![Complex64::new(0.01, 0.0)]],
/// )
/// .unwrap();
///
/// network.set_frequency_unit("mhz").unwrap();
/// let trace = network.trace_db(0, 0).unwrap();
/// assert_eq!(trace.points()[0].0, 1000.0);
/// assert!((trace.points()[1].1 + 40.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    name: Option<String>,
    comments: Vec<String>,
    ports: usize,
    reference_impedance: f64,
    frequencies: Vec<f64>,
    /// One row-major `ports × ports` matrix per frequency point
    matrices: Vec<Vec<Complex64>>,
    display_unit: FrequencyUnit,
}

impl Network {
    /// Creates a network from frequencies in Hz and matching row-major
    /// S-matrices.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::MatrixShape`] if the number of matrices does
    /// not match the number of frequencies, or a matrix does not hold
    /// `ports²` entries, and [`NetworkError::TooManyPorts`] if `ports²`
    /// overflows.
    pub fn new(
        ports: usize,
        reference_impedance: f64,
        frequencies: Vec<f64>,
        matrices: Vec<Vec<Complex64>>,
    ) -> Result<Self, NetworkError> {
        if matrices.len() != frequencies.len() {
            return Err(NetworkError::MatrixShape {
                expected: frequencies.len(),
                found: matrices.len(),
            });
        }
        let entries = ports
            .checked_mul(ports)
            .ok_or(NetworkError::TooManyPorts(ports))?;
        if let Some(matrix) = matrices.iter().find(|m| m.len() != entries) {
            return Err(NetworkError::MatrixShape {
                expected: entries,
                found: matrix.len(),
            });
        }

        Ok(Self {
            name: None,
            comments: Vec::new(),
            ports,
            reference_impedance,
            frequencies,
            matrices,
            display_unit: FrequencyUnit::Hz,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Comment lines of the source file, without the leading `!`.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub(crate) fn set_comments(&mut self, comments: Vec<String>) {
        self.comments = comments;
    }

    pub fn ports(&self) -> usize {
        self.ports
    }

    pub fn reference_impedance(&self) -> f64 {
        self.reference_impedance
    }

    /// Frequency points in Hz.
    pub fn frequencies_hz(&self) -> &[f64] {
        &self.frequencies
    }

    /// Frequency points in the display unit.
    pub fn frequencies(&self) -> Vec<f64> {
        let multiplier = self.display_unit.multiplier();
        self.frequencies.iter().map(|f| f / multiplier).collect()
    }

    /// Number of frequency points.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Returns `S[row][col]` at frequency point `index`, zero-based.
    pub fn s(&self, index: usize, row: usize, col: usize) -> Option<Complex64> {
        if row >= self.ports || col >= self.ports {
            return None;
        }
        self.matrices
            .get(index)
            .map(|matrix| matrix[row * self.ports + col])
    }

    pub fn frequency_unit(&self) -> FrequencyUnit {
        self.display_unit
    }

    /// Sets the display unit from its lowercase alias, e.g. `"ghz"`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::UnknownUnit`] for anything that is not the
    /// exact alias of a [`FrequencyUnit`].
    pub fn set_frequency_unit(&mut self, alias: &str) -> Result<(), NetworkError> {
        self.display_unit = FrequencyUnit::from_alias(alias)
            .ok_or_else(|| NetworkError::UnknownUnit(alias.to_string()))?;
        Ok(())
    }

    /// Extracts `20·log10|S[row][col]|` over frequency in the display unit.
    ///
    /// A zero magnitude yields negative infinity; callers decide how to draw
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::PortOutOfRange`] if `row` or `col` is not a
    /// port of this network.
    pub fn trace_db(&self, row: usize, col: usize) -> Result<Trace, NetworkError> {
        if row >= self.ports || col >= self.ports {
            return Err(NetworkError::PortOutOfRange {
                row,
                col,
                ports: self.ports,
            });
        }

        let index = row * self.ports + col;
        let points = self
            .frequencies()
            .into_iter()
            .zip(&self.matrices)
            .map(|(f, matrix)| (f, 20.0 * matrix[index].norm().log10()))
            .collect();

        Ok(Trace {
            points,
            unit: self.display_unit,
        })
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn two_port() -> Network {
        let matrix = |s21: f64| {
            vec![
                Complex64::new(0.5, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(s21, 0.0),
                Complex64::new(0.5, 0.0),
            ]
        };
        Network::new(2, 50.0, vec![1.0e6, 2.0e6], vec![matrix(1.0), matrix(0.1)]).unwrap()
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        let err = Network::new(1, 50.0, vec![1.0, 2.0], vec![vec![Complex64::default()]]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::MatrixShape {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_wrong_matrix_size() {
        let err = Network::new(2, 50.0, vec![1.0], vec![vec![Complex64::default(); 3]]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::MatrixShape {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_new_rejects_overflowing_port_count() {
        let ports = 1 << (usize::BITS / 2 + 1);
        let err = Network::new(ports, 50.0, Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(err, NetworkError::TooManyPorts(ports));
    }

    #[test]
    fn test_display_unit_defaults_to_hz() {
        let network = two_port();
        assert_eq!(network.frequency_unit(), FrequencyUnit::Hz);
        assert_eq!(network.frequencies(), vec![1.0e6, 2.0e6]);
    }

    #[test]
    fn test_set_frequency_unit_scales_axis() {
        let mut network = two_port();
        network.set_frequency_unit("mhz").unwrap();
        assert_eq!(network.frequency_unit(), FrequencyUnit::MHz);
        assert_eq!(network.frequencies(), vec![1.0, 2.0]);
        assert_eq!(network.frequencies_hz(), &[1.0e6, 2.0e6]);
    }

    #[test]
    fn test_set_frequency_unit_rejects_canonical_spelling() {
        let mut network = two_port();
        let err = network.set_frequency_unit("MHz").unwrap_err();
        assert_eq!(err, NetworkError::UnknownUnit("MHz".to_string()));
        assert_eq!(network.frequency_unit(), FrequencyUnit::Hz);
    }

    #[test]
    fn test_trace_db_uses_row_and_column() {
        let mut network = two_port();
        network.set_frequency_unit("mhz").unwrap();

        let s21 = network.trace_db(1, 0).unwrap();
        assert_eq!(s21.unit(), FrequencyUnit::MHz);
        assert_eq!(s21.len(), 2);
        assert_approx_eq!(f64, s21.points()[0].1, 0.0, epsilon = 1e-12);
        assert_approx_eq!(f64, s21.points()[1].1, -20.0, epsilon = 1e-12);

        let s12 = network.trace_db(0, 1).unwrap();
        assert!(s12.points()[0].1.is_infinite());
    }

    #[test]
    fn test_trace_db_out_of_range() {
        let network = two_port();
        let err = network.trace_db(2, 0).unwrap_err();
        assert_eq!(
            err,
            NetworkError::PortOutOfRange {
                row: 2,
                col: 0,
                ports: 2
            }
        );
        assert_eq!(err.to_string(), "S31 is out of range for a 2-port network");
    }

    #[test]
    fn test_s_accessor() {
        let network = two_port();
        assert_eq!(network.s(1, 1, 0), Some(Complex64::new(0.1, 0.0)));
        assert_eq!(network.s(5, 0, 0), None);
        assert_eq!(network.s(0, 0, 2), None);
    }
}
