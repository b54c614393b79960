//! Scattering-parameter and frequency-unit catalog.
//!
//! This module defines the two closed identifier sets used throughout sxplot
//! and the lookup tables attached to them.
//!
//! # Overview
//!
//! - [`SParameter`]: The 16 scattering parameters of networks with up to four
//!   ports, named `S<output><input>`.
//! - [`FrequencyUnit`]: The five frequency units a figure axis can use.
//! - [`UnitText`]: The display string and lowercase alias of a unit.
//!
//! # Tables
//!
//! Every per-variant value lives in a fixed-size array indexed by the variant
//! discriminant. `ALL` lists the variants in discriminant order and shares the
//! tables' length; a new variant needs an entry in `ALL` and in every table.
//!
//! | Table | Indexed by | Value |
//! |-------|------------|-------|
//! | `S_PARAMETER_NAMES` | [`SParameter`] | `"S21"` |
//! | `S_PARAMETER_LEGENDS` | [`SParameter`] | `"S₂₁"` |
//! | `UNIT_TEXT` | [`FrequencyUnit`] | `("MHz", "mhz")` |
//! | `UNIT_MULTIPLIERS` | [`FrequencyUnit`] | `1e6` |
//!
//! # Example
//!
//! ```
//! use sxplot_core::catalog::{FrequencyUnit, SParameter};
//!
//! let id: SParameter = "s21".parse().unwrap();
//! assert_eq!(id, SParameter::S21);
//! assert_eq!(id.indices(), (1, 0));
//! assert_eq!(id.legend_text(), "S₂₁");
//!
//! let unit = FrequencyUnit::MHz;
//! assert_eq!(unit.unit_text().canonical(), "MHz");
//! assert_eq!(unit.unit_text().alias(), "mhz");
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Number of ports covered by the catalog.
pub const MAX_PORTS: usize = 4;

const S_PARAMETER_COUNT: usize = MAX_PORTS * MAX_PORTS;
const FREQUENCY_UNIT_COUNT: usize = 5;

const S_PARAMETER_NAMES: [&str; S_PARAMETER_COUNT] = [
    "S11", "S12", "S13", "S14", //
    "S21", "S22", "S23", "S24", //
    "S31", "S32", "S33", "S34", //
    "S41", "S42", "S43", "S44",
];

const S_PARAMETER_LEGENDS: [&str; S_PARAMETER_COUNT] = [
    "S₁₁", "S₁₂", "S₁₃", "S₁₄", //
    "S₂₁", "S₂₂", "S₂₃", "S₂₄", //
    "S₃₁", "S₃₂", "S₃₃", "S₃₄", //
    "S₄₁", "S₄₂", "S₄₃", "S₄₄",
];

const UNIT_TEXT: [UnitText; FREQUENCY_UNIT_COUNT] = [
    UnitText::new("Hz", "hz"),
    UnitText::new("kHz", "khz"),
    UnitText::new("MHz", "mhz"),
    UnitText::new("GHz", "ghz"),
    UnitText::new("THz", "thz"),
];

const UNIT_MULTIPLIERS: [f64; FREQUENCY_UNIT_COUNT] = [1.0, 1e3, 1e6, 1e9, 1e12];

// =============================================================================
// Scattering parameters
// =============================================================================

/// Identifier of one scattering parameter of a network with up to four ports.
///
/// `Sij` is the response at port `i` to a stimulus at port `j`. Variants are
/// declared row-major (output port first), which fixes their discriminants to
/// `0..16`; the lookup tables rely on that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
#[repr(u8)]
pub enum SParameter {
    S11,
    S12,
    S13,
    S14,
    S21,
    S22,
    S23,
    S24,
    S31,
    S32,
    S33,
    S34,
    S41,
    S42,
    S43,
    S44,
}

impl SParameter {
    /// Every parameter in declaration (row-major) order.
    pub const ALL: [SParameter; S_PARAMETER_COUNT] = [
        Self::S11,
        Self::S12,
        Self::S13,
        Self::S14,
        Self::S21,
        Self::S22,
        Self::S23,
        Self::S24,
        Self::S31,
        Self::S32,
        Self::S33,
        Self::S34,
        Self::S41,
        Self::S42,
        Self::S43,
        Self::S44,
    ];

    /// Returns the parameter for a 1-based (output, input) port pair.
    ///
    /// Returns `None` when either port is outside `1..=4`.
    pub fn from_ports(output: usize, input: usize) -> Option<Self> {
        if !(1..=MAX_PORTS).contains(&output) || !(1..=MAX_PORTS).contains(&input) {
            return None;
        }
        Some(Self::ALL[(output - 1) * MAX_PORTS + (input - 1)])
    }

    /// Returns the legend text shown for this parameter, e.g. `S₂₁`.
    pub fn legend_text(self) -> &'static str {
        S_PARAMETER_LEGENDS[self.index()]
    }

    /// Returns the zero-based `(row, column)` of this parameter in an
    /// S-matrix.
    pub fn indices(self) -> (usize, usize) {
        let index = self.index();
        (index / MAX_PORTS, index % MAX_PORTS)
    }

    /// Returns the 1-based port the response is measured at.
    pub fn output_port(self) -> usize {
        self.indices().0 + 1
    }

    /// Returns the 1-based port the stimulus is applied to.
    pub fn input_port(self) -> usize {
        self.indices().1 + 1
    }

    /// Returns the plain name of this parameter, e.g. `S21`.
    pub fn as_str(self) -> &'static str {
        S_PARAMETER_NAMES[self.index()]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SParameter {
    type Err = String;

    /// Parses `S<output><input>` with single-digit ports, in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid S-parameter `{s}`, expected S11 through S44");

        let digits = s.trim().strip_prefix(['S', 's']).ok_or_else(invalid)?;
        let mut ports = digits.chars().map(|c| c.to_digit(10));
        match (ports.next(), ports.next(), ports.next()) {
            (Some(Some(output)), Some(Some(input)), None) => {
                Self::from_ports(output as usize, input as usize).ok_or_else(invalid)
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for SParameter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Frequency units
// =============================================================================

/// Display and alias strings of a [`FrequencyUnit`].
///
/// The canonical string is what figures print (`"MHz"`); the alias is its
/// lowercase form accepted by [`FrequencyUnit::from_alias`] and by network
/// unit setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitText {
    canonical: &'static str,
    alias: &'static str,
}

impl UnitText {
    const fn new(canonical: &'static str, alias: &'static str) -> Self {
        Self { canonical, alias }
    }

    /// Returns the display unit string, e.g. `"MHz"`.
    pub fn canonical(&self) -> &'static str {
        self.canonical
    }

    /// Returns the lowercase unit string, e.g. `"mhz"`.
    pub fn alias(&self) -> &'static str {
        self.alias
    }
}

/// Unit used for the frequency axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
#[repr(u8)]
pub enum FrequencyUnit {
    #[default]
    Hz,
    KHz,
    MHz,
    GHz,
    THz,
}

impl FrequencyUnit {
    /// Every unit in ascending order of magnitude.
    pub const ALL: [FrequencyUnit; FREQUENCY_UNIT_COUNT] =
        [Self::Hz, Self::KHz, Self::MHz, Self::GHz, Self::THz];

    /// Returns the canonical and alias strings for this unit.
    pub fn unit_text(self) -> UnitText {
        UNIT_TEXT[self as usize]
    }

    /// Returns how many hertz one of this unit is.
    pub fn multiplier(self) -> f64 {
        UNIT_MULTIPLIERS[self as usize]
    }

    /// Looks a unit up by its lowercase alias (`"hz"`, `"khz"`, ...).
    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.unit_text().alias() == alias)
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit_text().canonical())
    }
}

impl FromStr for FrequencyUnit {
    type Err = String;

    /// Parses a unit case-insensitively, so `"MHz"`, `"mhz"` and `"MHZ"`
    /// all name [`FrequencyUnit::MHz`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(&s.trim().to_ascii_lowercase()).ok_or_else(|| {
            format!("invalid frequency unit `{s}`, valid values: Hz, kHz, MHz, GHz, THz")
        })
    }
}

impl TryFrom<String> for FrequencyUnit {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_legend_text_non_empty_and_distinct() {
        let legends: HashSet<&str> = SParameter::ALL.iter().map(|id| id.legend_text()).collect();
        assert_eq!(legends.len(), 16);
        assert!(legends.iter().all(|legend| !legend.is_empty()));
    }

    #[test]
    fn test_indices_follow_row_major_order() {
        // The i-th identifier (1-based) lives at row ceil(i / 4), column ((i - 1) mod 4) + 1.
        for (position, id) in SParameter::ALL.iter().enumerate() {
            let i = position + 1;
            let expected_row = i.div_ceil(4);
            let expected_col = ((i - 1) % 4) + 1;
            assert_eq!(id.output_port(), expected_row, "{id}");
            assert_eq!(id.input_port(), expected_col, "{id}");
            assert_eq!(id.indices(), (expected_row - 1, expected_col - 1), "{id}");
        }
    }

    #[test]
    fn test_indices_distinct() {
        let pairs: HashSet<(usize, usize)> = SParameter::ALL.iter().map(|id| id.indices()).collect();
        assert_eq!(pairs.len(), 16);
    }

    #[test]
    fn test_legend_matches_name_digits() {
        assert_eq!(SParameter::S11.legend_text(), "S₁₁");
        assert_eq!(SParameter::S21.legend_text(), "S₂₁");
        assert_eq!(SParameter::S12.legend_text(), "S₁₂");
        assert_eq!(SParameter::S44.legend_text(), "S₄₄");
    }

    #[test]
    fn test_s_parameter_from_str() {
        assert_eq!("S21".parse::<SParameter>().unwrap(), SParameter::S21);
        assert_eq!("s34".parse::<SParameter>().unwrap(), SParameter::S34);
        assert_eq!(" S11 ".parse::<SParameter>().unwrap(), SParameter::S11);

        assert!("S".parse::<SParameter>().is_err());
        assert!("S211".parse::<SParameter>().is_err());
        assert!("S2x".parse::<SParameter>().is_err());
        assert!("S01".parse::<SParameter>().is_err());
        let result = "S51".parse::<SParameter>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid S-parameter"));
    }

    #[test]
    fn test_s_parameter_display_round_trips() {
        for id in SParameter::ALL {
            assert_eq!(id.to_string().parse::<SParameter>().unwrap(), id);
        }
    }

    #[test]
    fn test_from_ports() {
        assert_eq!(SParameter::from_ports(2, 1), Some(SParameter::S21));
        assert_eq!(SParameter::from_ports(4, 3), Some(SParameter::S43));
        assert_eq!(SParameter::from_ports(0, 1), None);
        assert_eq!(SParameter::from_ports(1, 5), None);
    }

    #[test]
    fn test_all_is_in_discriminant_order() {
        for (position, id) in SParameter::ALL.iter().enumerate() {
            assert_eq!(*id as usize, position, "{id}");
        }
        for (position, unit) in FrequencyUnit::ALL.iter().enumerate() {
            assert_eq!(*unit as usize, position, "{unit}");
        }
    }

    #[test]
    fn test_unit_alias_is_lowercase_canonical() {
        for unit in FrequencyUnit::ALL {
            let text = unit.unit_text();
            assert!(!text.canonical().is_empty());
            assert_eq!(text.alias(), text.canonical().to_lowercase());
        }
    }

    #[test]
    fn test_unit_text_values() {
        assert_eq!(FrequencyUnit::Hz.unit_text().canonical(), "Hz");
        assert_eq!(FrequencyUnit::KHz.unit_text().canonical(), "kHz");
        assert_eq!(FrequencyUnit::MHz.unit_text().canonical(), "MHz");
        assert_eq!(FrequencyUnit::GHz.unit_text().alias(), "ghz");
        assert_eq!(FrequencyUnit::THz.unit_text().alias(), "thz");
    }

    #[test]
    fn test_unit_multipliers_ascend() {
        let multipliers: Vec<f64> = FrequencyUnit::ALL.iter().map(|u| u.multiplier()).collect();
        assert_eq!(multipliers, vec![1.0, 1e3, 1e6, 1e9, 1e12]);
    }

    #[test]
    fn test_frequency_unit_from_str() {
        assert_eq!("MHz".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::MHz);
        assert_eq!("mhz".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::MHz);
        assert_eq!("KHZ".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::KHz);

        let result = "furlong".parse::<FrequencyUnit>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid frequency unit"));
    }

    #[test]
    fn test_from_alias_requires_lowercase() {
        assert_eq!(FrequencyUnit::from_alias("ghz"), Some(FrequencyUnit::GHz));
        assert_eq!(FrequencyUnit::from_alias("GHz"), None);
    }

    #[test]
    fn test_default_unit_is_hz() {
        assert_eq!(FrequencyUnit::default(), FrequencyUnit::Hz);
    }

    #[test]
    fn test_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Selection {
            parameters: Vec<SParameter>,
            unit: FrequencyUnit,
        }

        let selection: Selection =
            toml::from_str(r#"parameters = ["S21", "s12"]
unit = "MHz""#)
                .expect("valid selection");
        assert_eq!(selection.parameters, vec![SParameter::S21, SParameter::S12]);
        assert_eq!(selection.unit, FrequencyUnit::MHz);

        let invalid = toml::from_str::<Selection>(r#"parameters = ["S99"]
unit = "Hz""#);
        assert!(invalid.is_err());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn from_ports_inverts_port_accessors(output in 1usize..=4, input in 1usize..=4) {
            let id = SParameter::from_ports(output, input).expect("ports in range");
            prop_assert_eq!(id.output_port(), output);
            prop_assert_eq!(id.input_port(), input);
        }

        #[test]
        fn unit_parse_ignores_case(index in 0usize..5, upper in proptest::bool::ANY) {
            let unit = FrequencyUnit::ALL[index];
            let text = if upper {
                unit.unit_text().canonical().to_uppercase()
            } else {
                unit.unit_text().alias().to_string()
            };
            prop_assert_eq!(text.parse::<FrequencyUnit>().unwrap(), unit);
        }
    }
}
