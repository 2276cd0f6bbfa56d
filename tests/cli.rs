//! CLI integration tests

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn voltflow() -> Command {
    cargo_bin_cmd!("voltflow")
}

fn conveyor() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join("conveyor.vf")
}

fn temp_diagram(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_cli_help() {
    voltflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn test_cli_version() {
    voltflow()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_simulate_initial_state() {
    voltflow()
        .arg("simulate")
        .arg(conveyor())
        .assert()
        .success()
        .stdout(predicate::str::contains("+24V"))
        .stdout(predicate::str::contains("-Q1"))
        .stdout(predicate::str::contains("-M1").not());
}

#[test]
fn test_simulate_with_toggle_runs_motor() {
    voltflow()
        .arg("simulate")
        .arg(conveyor())
        .arg("--toggle=-B1")
        .assert()
        .success()
        .stdout(predicate::str::contains("-K1"))
        .stdout(predicate::str::contains("-H1"))
        .stdout(predicate::str::contains("-M1"));
}

#[test]
fn test_simulate_toggles_apply_in_order() {
    // Tripping the emergency stop after the sensor drops everything again
    voltflow()
        .arg("simulate")
        .arg(conveyor())
        .arg("--toggle=-B1")
        .arg("--toggle=-S0")
        .assert()
        .success()
        .stdout(predicate::str::contains("-M1").not());
}

#[test]
fn test_simulate_json_filtered_by_class() {
    voltflow()
        .args(["simulate", "--json", "--class", "400VAC", "--toggle=-B1"])
        .arg(conveyor())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"designation\": \"-M1\""))
        .stdout(predicate::str::contains("+24V").not());
}

#[test]
fn test_explain_blocked_contactor() {
    voltflow()
        .arg("explain")
        .arg(conveyor())
        .arg("--")
        .arg("-K1")
        .assert()
        .success()
        .stdout(predicate::str::contains("DE-ENERGIZED"))
        .stdout(predicate::str::contains("BLOCKED at -B1"));
}

#[test]
fn test_explain_after_toggle() {
    voltflow()
        .arg("explain")
        .arg(conveyor())
        .arg("--toggle=-B1")
        .arg("--")
        .arg("-K1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: ENERGIZED"))
        .stdout(predicate::str::contains("BLOCKED").not());
}

#[test]
fn test_explain_unknown_designation() {
    voltflow()
        .arg("explain")
        .arg(conveyor())
        .arg("--")
        .arg("-X9")
        .assert()
        .success()
        .stdout(predicate::str::contains("Component '-X9' not found"));
}

#[test]
fn test_trace_contactor() {
    voltflow()
        .arg("trace")
        .arg(conveyor())
        .arg("--")
        .arg("-K1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Coil circuit: +24V -> -S0 -> -B1 -> -K1"))
        .stdout(predicate::str::contains("Contact supply: L1 -> -Q1 -> -K1"))
        .stdout(predicate::str::contains("Contact load: -K1 -> -M1"));
}

#[test]
fn test_validate_clean_diagram() {
    voltflow()
        .arg("validate")
        .arg(conveyor())
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found"));
}

#[test]
fn test_validate_reports_dangling_wire() {
    let file = temp_diagram(
        ".vf",
        "SOURCE P1 +24V 24VDC\nLAMP H1 -H1 24VDC\n.wire W1 24VDC P1 H1\n.wire W2 24VDC H1 X9\n",
    );

    voltflow()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("warning:"))
        .stdout(predicate::str::contains("X9"));
}

#[test]
fn test_json_diagram() {
    let file = temp_diagram(
        ".json",
        r#"{
            "components": [
                {"id": "P1", "designation": "+24V", "type": "POWER_SOURCE_LOW", "voltage_rating": "24VDC"},
                {"id": "S1", "designation": "-B1", "type": "SENSOR_PROXIMITY", "voltage_rating": "24VDC", "state": "ON"},
                {"id": "K1", "designation": "-K1", "type": "CONTACTOR", "voltage_rating": "24VDC"}
            ],
            "wires": [
                {"id": "W1", "voltage_level": "24VDC", "from_component_id": "P1", "to_component_id": "S1"},
                {"id": "W2", "voltage_level": "24VDC", "from_component_id": "S1", "to_component_id": "K1"}
            ]
        }"#,
    );

    voltflow()
        .arg("simulate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("-K1"))
        .stdout(predicate::str::contains("3 of 3 components energized"));
}

#[test]
fn test_extra_control_class() {
    let file = temp_diagram(
        ".vf",
        "SOURCE P1 +36V 36VDC\nLAMP H1 -H1 36VDC\n.wire W1 36VDC P1 H1\n",
    );

    voltflow()
        .args(["validate", "--control-class", "36VDC"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found"));
}

#[test]
fn test_conflicting_classes_rejected() {
    voltflow()
        .args(["simulate", "--power-class", "24VDC"])
        .arg(conveyor())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_missing_file() {
    voltflow()
        .arg("simulate")
        .arg("does-not-exist.vf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read diagram file"));
}

#[test]
fn test_parse_error() {
    let file = temp_diagram(".vf", "BOGUS X1 -X1 24VDC\n");

    voltflow()
        .arg("simulate")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown component kind 'BOGUS'"));
}
