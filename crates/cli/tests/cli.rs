use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let aircraft = dir.join("aircraft.toml");
    fs::write(
        &aircraft,
        r#"
name = "C172 Skyhawk"
fuel_flow = 9.5

[cruise_speed]
value = 110.0
unit = "kt"

[descent]
distance_nm = 12.0
fuel_used = 1.6

[descent.speed]
value = 120.0
unit = "kt"
"#,
    )
    .expect("aircraft catalog");

    let plan = dir.join("plan.yaml");
    fs::write(
        &plan,
        r#"
name: Test hop
aircraft: C172 Skyhawk
departure_time: "0900"
legs:
  - true_heading_deg: 90.0
    distance_nm: 55.0
    magnetic_variation_deg: 2.0
    wind:
      direction_deg: 0.0
      speed:
        value: 0.0
        unit: kt
    waypoints:
      - name: MIDPOINT
        distance_nm: 28.0
"#,
    )
    .expect("plan manifest");

    (plan, aircraft)
}

#[test]
fn plan_flight_prints_a_navigation_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (plan, aircraft) = write_fixtures(dir.path());

    Command::cargo_bin("plan_flight")
        .expect("binary")
        .args(["--plan", plan.to_str().unwrap(), "--aircraft", aircraft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Flight Plan: Test hop (C172 Skyhawk) ==="))
        .stdout(predicate::str::contains("Leg 1"))
        .stdout(predicate::str::contains("MIDPOINT"))
        .stdout(predicate::str::contains("Landed"));
}

#[test]
fn plan_flight_writes_csv_and_json_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (plan, aircraft) = write_fixtures(dir.path());
    let csv_path = dir.path().join("navlog.csv");
    let json_path = dir.path().join("plan.json");

    Command::cargo_bin("plan_flight")
        .expect("binary")
        .args([
            "--plan",
            plan.to_str().unwrap(),
            "--aircraft",
            aircraft.to_str().unwrap(),
            "--output",
            csv_path.to_str().unwrap(),
            "--json",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let csv = fs::read_to_string(&csv_path).expect("csv artifact");
    assert!(csv.starts_with("leg,name,distance_nm"));
    assert!(csv.contains("MIDPOINT"));

    let json = fs::read_to_string(&json_path).expect("json artifact");
    assert!(json.contains("\"Test hop\""));
    assert!(json.contains("\"itineraries\""));
}

#[test]
fn unknown_aircraft_fails_with_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (plan, aircraft) = write_fixtures(dir.path());

    Command::cargo_bin("plan_flight")
        .expect("binary")
        .args([
            "--plan",
            plan.to_str().unwrap(),
            "--aircraft",
            aircraft.to_str().unwrap(),
            "--aircraft-name",
            "Spitfire",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in catalog"));
}

#[test]
fn invalid_departure_time_fails_fast() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (plan, aircraft) = write_fixtures(dir.path());

    Command::cargo_bin("plan_flight")
        .expect("binary")
        .args([
            "--plan",
            plan.to_str().unwrap(),
            "--aircraft",
            aircraft.to_str().unwrap(),
            "--departure",
            "2575",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}
