use std::{fs, path::Path};

use sxplot::{PlotBuilder, SxplotError, config::AppConfig, figure::Canvas};
use sxplot_core::catalog::SParameter;
use tempfile::TempDir;

const THRU: &str = "\
! thru path
# MHz S DB R 50
100 -30 0 -0.5 -10 -0.5 -10 -30 0
200 -28 0 -0.7 -20 -0.7 -20 -28 0
300 -26 0 -0.9 -30 -0.9 -30 -26 0
";

const COUPLED: &str = "\
# MHz S DB R 50
100 -25 0 -20.1 90 -20.1 90 -25 0
200 -24 0 -20.3 80 -20.3 80 -24 0
300 -23 0 -20.6 70 -20.6 70 -23 0
";

fn measurement_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("p1 - 1, p2 -2.s2p"), THRU).unwrap();
    fs::write(dir.path().join("p1 - 1, p2 -3.s2p"), COUPLED).unwrap();
    fs::write(dir.path().join("readme.txt"), "not touchstone").unwrap();
    dir
}

fn config(dir: &Path, extra: &str) -> AppConfig {
    let source = format!(
        r#"
        [discovery]
        directory = "{}"

        [[selection]]
        fragment = "p1 - 1, p2 -2"
        parameters = ["S12", "S21"]

        [[selection]]
        fragment = "p1 - 1, p2 -3"
        parameters = ["S21"]

        {extra}
        "#,
        dir.display().to_string().replace('\\', "/")
    );
    toml::from_str(&source).unwrap()
}

#[test]
fn test_plot_spec_follows_selection_order() {
    let dir = measurement_dir();
    let builder = PlotBuilder::new(config(dir.path(), ""));

    let spec = builder.plot_spec().unwrap();
    let entries: Vec<_> = spec
        .iter()
        .map(|(path, ids)| (path.file_name().unwrap().to_string_lossy().into_owned(), ids.to_vec()))
        .collect();

    assert_eq!(
        entries,
        vec![
            (
                "p1 - 1, p2 -2.s2p".to_string(),
                vec![SParameter::S12, SParameter::S21]
            ),
            ("p1 - 1, p2 -3.s2p".to_string(), vec![SParameter::S21]),
        ]
    );
}

#[test]
fn test_build_figure_applies_title_and_legend() {
    let dir = measurement_dir();
    let builder = PlotBuilder::new(config(
        dir.path(),
        r#"
        [figure]
        title = "Directional coupler S parameters"
        legend = ["S12", "S21", "S31"]
        frequency_unit = "MHz"
        "#,
    ));

    let spec = builder.plot_spec().unwrap();
    let figure = builder.build_figure(&spec).unwrap();

    assert_eq!(figure.curves().len(), 3);
    assert_eq!(figure.x_label(), Some("Frequency (MHz)"));
    assert_eq!(figure.y_label(), Some("Magnitude (dB)"));
    assert_eq!(figure.title(), Some("Directional coupler S parameters"));
    assert!(figure.grid_enabled());
    assert!(figure.is_tight());

    let legend: Vec<_> = figure.legend_entries().into_iter().map(|(l, _)| l).collect();
    assert_eq!(legend, vec!["S12", "S21", "S31"]);

    // Frequencies are in MHz and the first S12 point is -0.5 dB
    let first = figure.curves()[0].points()[0];
    assert!((first.0 - 100.0).abs() < 1e-9);
    assert!((first.1 + 0.5).abs() < 1e-9);
}

#[test]
fn test_default_legend_uses_parameter_text() {
    let dir = measurement_dir();
    let builder = PlotBuilder::new(config(dir.path(), ""));

    let figure = builder.build_figure(&builder.plot_spec().unwrap()).unwrap();
    let legend: Vec<_> = figure.legend_entries().into_iter().map(|(l, _)| l).collect();
    assert_eq!(
        legend,
        vec![
            SParameter::S12.legend_text(),
            SParameter::S21.legend_text(),
            SParameter::S21.legend_text()
        ]
    );
}

#[test]
fn test_run_writes_output() {
    let dir = measurement_dir();
    let output = dir.path().join("coupler.svg");
    let builder = PlotBuilder::new(config(
        dir.path(),
        &format!(
            "[figure]\noutput = \"{}\"\ntitle = \"Coupler\"",
            output.display().to_string().replace('\\', "/")
        ),
    ));

    let mut figure = builder.run().unwrap();
    let svg = fs::read_to_string(&output).unwrap();
    assert_eq!(svg.matches("<polyline").count(), 3);
    assert!(svg.contains("Coupler"));
    assert!(svg.contains("Frequency (Hz)"));

    figure.set_title("Changed");
    assert!(figure.render_svg().unwrap().contains("Changed"));
}

#[test]
fn test_unknown_fragment() {
    let dir = measurement_dir();
    let mut config = config(dir.path(), "");
    let mut selection = config.selection().to_vec();
    selection.push(sxplot::config::SelectionConfig::new("p1 - 2", vec![SParameter::S21]));
    config.set_selection(selection);

    let err = PlotBuilder::new(config).plot_spec().unwrap_err();
    assert!(matches!(err, SxplotError::FileNotFound { ref fragment } if fragment == "p1 - 2"));
}

#[test]
fn test_missing_directory() {
    let dir = measurement_dir();
    let missing = dir.path().join("nope");
    let builder = PlotBuilder::new(config(&missing, ""));

    assert!(matches!(
        builder.plot_spec(),
        Err(SxplotError::InvalidDirectory(path)) if path == missing
    ));
}

#[test]
fn test_port_out_of_range_aborts() {
    let dir = measurement_dir();
    let mut config = config(dir.path(), "");
    config.set_selection(vec![sxplot::config::SelectionConfig::new(
        "p1 - 1, p2 -3",
        vec![SParameter::S31],
    )]);
    let builder = PlotBuilder::new(config);

    let spec = builder.plot_spec().unwrap();
    let err = builder.build_figure(&spec).unwrap_err();
    assert!(matches!(err, SxplotError::Network(_)));
    assert_eq!(err.to_string(), "Network error: S31 is out of range for a 2-port network");
}
