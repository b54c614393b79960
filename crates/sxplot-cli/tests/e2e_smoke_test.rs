use std::{fs, path::PathBuf};

use tempfile::tempdir;

use sxplot::SxplotError;
use sxplot_cli::{Args, run};

/// The bundled demos live at the workspace root
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn coupler_args(output: PathBuf) -> Args {
    let demos = demos_path();
    Args {
        directory: Some(demos.join("coupler").to_string_lossy().to_string()),
        filter: None,
        select: Vec::new(),
        unit: None,
        title: None,
        legend: Vec::new(),
        y_label: None,
        output: Some(output.to_string_lossy().to_string()),
        config: Some(demos.join("coupler.toml").to_string_lossy().to_string()),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_coupler_demo() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("coupler.svg");

    let args = coupler_args(output.clone());
    if let Err(e) = run(&args) {
        panic!("coupler demo failed: {e}");
    }

    let svg = fs::read_to_string(&output).expect("Output was not written");
    assert_eq!(svg.matches("<polyline").count(), 6);
    assert!(svg.contains("Directional coupler S parameters"));
    assert!(svg.contains("Frequency (MHz)"));
    assert!(svg.contains("S₄₂"));
}

#[test]
fn e2e_smoke_test_command_line_selection() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("through.svg");

    let mut args = coupler_args(output.clone());
    args.config = None;
    args.select = vec![sxplot::config::SelectionConfig::new(
        "p1 - 1, p2 -2",
        vec![
            sxplot::catalog::SParameter::S11,
            sxplot::catalog::SParameter::S21,
        ],
    )];
    args.title = Some("Through".to_string());

    run(&args).expect("through plot failed");

    let svg = fs::read_to_string(&output).expect("Output was not written");
    assert!(svg.contains("Through"));
    assert!(svg.contains("Frequency (Hz)"));
}

#[test]
fn e2e_smoke_test_failures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut args = coupler_args(temp_dir.path().join("missing.svg"));
    args.select = vec![sxplot::config::SelectionConfig::new(
        "p1 - 3",
        vec![sxplot::catalog::SParameter::S21],
    )];
    assert!(matches!(
        run(&args),
        Err(SxplotError::FileNotFound { ref fragment }) if fragment == "p1 - 3"
    ));
    assert!(!temp_dir.path().join("missing.svg").exists());

    let mut args = coupler_args(temp_dir.path().join("bad.svg"));
    args.directory = Some(temp_dir.path().join("nowhere").to_string_lossy().to_string());
    assert!(matches!(run(&args), Err(SxplotError::InvalidDirectory(_))));

    let mut args = coupler_args(temp_dir.path().join("bad.svg"));
    args.config = Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string());
    assert!(matches!(run(&args), Err(SxplotError::Config(_))));
}
