#![cfg(feature = "cli")]
use std::process::{Command, Output};
use std::str;

use air_quality::providers::google_rest::API_KEY_ENV;
use serde_json::Value;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_air-quality"))
        .args(args)
        .env_remove(API_KEY_ENV)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run air-quality binary")
}

fn error_report(output: &Output) -> Value {
    let stdout = str::from_utf8(&output.stdout).unwrap();
    serde_json::from_str(stdout.trim()).unwrap_or_else(|e| {
        panic!("expected a JSON error report on stdout, got {stdout:?}: {e}")
    })
}

#[test]
fn missing_api_key_is_a_config_error() {
    let output = run_cli(&["current"]);
    assert!(!output.status.success());

    let report = error_report(&output);
    assert_eq!(report["kind"], "config");
    assert!(
        report["message"].as_str().unwrap().contains(API_KEY_ENV),
        "message should name the variable: {report}"
    );
}

#[test]
fn invalid_settings_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("air_quality.toml");
    std::fs::write(&path, "supported_countries = [\"usa\"]\n").unwrap();

    let output = run_cli(&["--config", path.to_str().unwrap(), "chart", "--range", "week"]);
    assert!(!output.status.success());

    let report = error_report(&output);
    assert_eq!(report["kind"], "config");
    assert!(report["message"].as_str().unwrap().contains("usa"));
}

#[test]
fn unknown_subcommand_is_rejected_by_argument_parsing() {
    let output = run_cli(&["forecast"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}
