//! End-to-end tests of the `fleet-tools` binary.

use std::path::Path;
use std::process::Command;

use fleet_core::ai::TacticalReport;
use fleet_core::navigation::NavigationPath;
use fleet_core::strategy::StrategyBand;
use fleet_tools::batch::BatchResults;
use fleet_tools::report::ScenarioReport;

const STRAIT: &str = r#"(
    name: "Strait",
    environment: Static((wind_effect: 0.9, terrain_effect: 0.9)),
    fleet: (id: (1), name: "Home", position: (x: 100.0, y: 0.0), ships: [
        (id: (1), attack_power: 60.0, health: 100.0, max_health: 100.0),
        (id: (2), attack_power: 40.0, health: 100.0, max_health: 100.0),
    ]),
    enemy: (id: (2), name: "Raiders", position: (x: 600.0, y: 0.0), ships: [
        (id: (10), attack_power: 20.0, health: 50.0, max_health: 100.0),
        (id: (11), attack_power: 30.0, health: 25.0, max_health: 100.0),
        (id: (12), attack_power: 10.0, health: 100.0, max_health: 100.0),
    ]),
    destination: (x: 500.0, y: 300.0),
)"#;

fn fleet_tools(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_fleet-tools"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should run")
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn assess_prints_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "strait.ron", STRAIT);

    let output = fleet_tools(&["assess", &scenario]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: ScenarioReport = serde_json::from_slice(&output.stdout).unwrap();
    let TacticalReport {
        band,
        engage,
        retreat,
        targets,
        ..
    } = report.tactical;
    assert_eq!(band, StrategyBand::Overwhelming);
    assert!(engage);
    assert!(!retreat);
    // Scores: 10, 22.5, 0 -> ship 11 first, capped at two targets.
    let ids: Vec<u32> = targets.iter().map(|id| id.0).collect();
    assert_eq!(ids, vec![11, 10]);

    let route = report.route.expect("scenario has a destination");
    assert!(route.complete);
}

#[test]
fn assess_applies_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "strait.ron", STRAIT);
    let config = write(dir.path(), "timid.ron", "(engage_power_ratio: 100.0)");

    let output = fleet_tools(&["assess", &scenario, "--config", &config, "--pretty"]);
    assert!(output.status.success());
    let report: ScenarioReport = serde_json::from_slice(&output.stdout).unwrap();
    assert!(!report.tactical.engage);
}

#[test]
fn assess_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "strait.ron", STRAIT);
    let config = write(dir.path(), "bad.ron", "(average_ship_speed: 0.0)");

    let output = fleet_tools(&["assess", &scenario, "--config", &config]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn assess_missing_scenario_fails() {
    let output = fleet_tools(&["assess", "/nonexistent/strait.ron"]);
    assert!(!output.status.success());
}

#[test]
fn path_accepts_negative_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "strait.ron", STRAIT);

    let output = fleet_tools(&["path", &scenario, "--to", "-300,150", "--planner", "lattice"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let path: NavigationPath = serde_json::from_slice(&output.stdout).unwrap();
    assert!(path.complete);
    assert_eq!(path.waypoints.first().map(|p| (p.x, p.y)), Some((100.0, 0.0)));
    assert_eq!(path.waypoints.last().map(|p| (p.x, p.y)), Some((-300.0, 150.0)));
}

#[test]
fn path_rejects_malformed_point() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write(dir.path(), "strait.ron", STRAIT);

    let output = fleet_tools(&["path", &scenario, "--to", "north"]);
    assert!(!output.status.success());
}

#[test]
fn batch_writes_results_file() {
    let dir = tempfile::tempdir().unwrap();
    let scenarios = dir.path().join("scenarios");
    std::fs::create_dir(&scenarios).unwrap();
    write(&scenarios, "a.ron", STRAIT);
    write(&scenarios, "b.ron", "(name: \"Broken\"");
    let out = dir.path().join("results.json");

    let output = fleet_tools(&[
        "batch",
        &scenarios.to_string_lossy(),
        "--output",
        &out.to_string_lossy(),
    ]);
    assert!(output.status.success());

    let results = BatchResults::load(&out).unwrap();
    assert_eq!(results.reports.len(), 1);
    assert_eq!(results.reports[0].scenario, "Strait");
    assert_eq!(results.errors.len(), 1);
}
