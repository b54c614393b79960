//! Command-line argument definitions for the sxplot CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every plotting option may also come from the
//! configuration file; values given here take precedence.

use clap::Parser;

use sxplot::{
    catalog::{FrequencyUnit, SParameter},
    config::{AppConfig, SelectionConfig},
};

/// Plot S-parameters of Touchstone files onto one figure
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory searched for Touchstone files
    #[arg(help = "Directory to search, defaults to the configured one")]
    pub directory: Option<String>,

    /// Substring every candidate file name must contain
    #[arg(short, long)]
    pub filter: Option<String>,

    /// File to plot and its parameters, e.g. "p1 - 1, p2 -2=S12,S21"
    #[arg(short, long = "select", value_name = "FRAGMENT=PARAMS", value_parser = parse_selection)]
    pub select: Vec<SelectionConfig>,

    /// Frequency axis unit (Hz, kHz, MHz, GHz, THz)
    #[arg(short, long)]
    pub unit: Option<FrequencyUnit>,

    /// Figure title
    #[arg(long)]
    pub title: Option<String>,

    /// Legend label replacing the default one, in draw order (repeatable)
    #[arg(long)]
    pub legend: Vec<String>,

    /// Y axis label
    #[arg(long)]
    pub y_label: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Overrides `config` with every value given on the command line.
    ///
    /// Selections given here replace the configured ones as a whole.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(directory) = &self.directory {
            config.discovery_mut().set_directory(directory);
        }
        if let Some(filter) = &self.filter {
            config.discovery_mut().set_filter(filter);
        }
        if !self.select.is_empty() {
            config.set_selection(self.select.clone());
        }

        let figure = config.figure_mut();
        if let Some(unit) = self.unit {
            figure.set_frequency_unit(unit);
        }
        if let Some(title) = &self.title {
            figure.set_title(title);
        }
        if !self.legend.is_empty() {
            figure.set_legend(self.legend.clone());
        }
        if let Some(label) = &self.y_label {
            figure.set_y_axis_label(label);
        }
        if let Some(output) = &self.output {
            figure.set_output(output);
        }
    }
}

/// Parses `FRAGMENT=S21,S12`. The last `=` separates the parameters, so
/// the fragment itself may contain one.
fn parse_selection(value: &str) -> Result<SelectionConfig, String> {
    let (fragment, parameters) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected FRAGMENT=PARAMS, got `{value}`"))?;

    let parameters = parameters
        .split(',')
        .map(str::parse::<SParameter>)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SelectionConfig::new(fragment, parameters))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection("p1 - 1, p2 -2=S12,s21"),
            Ok(SelectionConfig::new(
                "p1 - 1, p2 -2",
                vec![SParameter::S12, SParameter::S21]
            ))
        );
        assert_eq!(
            parse_selection("a=b=S31"),
            Ok(SelectionConfig::new("a=b", vec![SParameter::S31]))
        );
        assert!(parse_selection("no-parameters").is_err());
        assert!(parse_selection("x=S51").is_err());
        assert!(parse_selection("x=").is_err());
    }

    #[test]
    fn test_parse_command_line() {
        let args = Args::try_parse_from([
            "sxplot",
            "measurements",
            "-s",
            "thru=S12,S21",
            "--select",
            "coupled=S21",
            "-u",
            "mhz",
            "--legend",
            "A",
            "--legend",
            "B",
        ])
        .unwrap();

        assert_eq!(args.directory.as_deref(), Some("measurements"));
        assert_eq!(args.select.len(), 2);
        assert_eq!(args.unit, Some(FrequencyUnit::MHz));
        assert_eq!(args.legend, vec!["A", "B"]);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_invalid_unit_is_rejected() {
        assert!(Args::try_parse_from(["sxplot", "-u", "parsec"]).is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let mut config: AppConfig = toml::from_str(
            r#"
            [discovery]
            directory = "from-config"
            filter = ".s4p"

            [[selection]]
            fragment = "kept?"
            parameters = ["S11"]

            [figure]
            title = "Configured"
            "#,
        )
        .unwrap();

        let args = Args::try_parse_from(["sxplot", "-o", "out.svg", "--title", "Given"]).unwrap();
        args.apply_to(&mut config);

        assert_eq!(config.discovery().directory(), Path::new("from-config"));
        assert_eq!(config.discovery().filter(), ".s4p");
        assert_eq!(config.selection().len(), 1);
        assert_eq!(config.figure().title(), Some("Given"));
        assert_eq!(config.figure().output(), Path::new("out.svg"));

        let args = Args::try_parse_from(["sxplot", "elsewhere", "-s", "x=S21"]).unwrap();
        args.apply_to(&mut config);
        assert_eq!(config.discovery().directory(), Path::new("elsewhere"));
        assert_eq!(config.selection()[0].fragment(), "x");
    }
}
