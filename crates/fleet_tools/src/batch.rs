//! Batch scenario assessment.
//!
//! Assesses every scenario in a directory in parallel using rayon. Each
//! scenario gets its own engine, so no state is shared between tasks.
//! Files that fail to load are recorded and skipped.

use std::path::{Path, PathBuf};
use std::time::Instant;

use fleet_core::config::FleetAiConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::report::{assess_scenario, PlannerKind, ScenarioReport};
use crate::scenario::Scenario;

/// Scenario that could not be assessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchError {
    /// File that failed.
    pub path: PathBuf,
    /// Error message
    pub message: String,
}

/// Results from a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Reports in file name order.
    pub reports: Vec<ScenarioReport>,
    /// Errors encountered
    pub errors: Vec<BatchError>,
    /// Total runtime
    pub duration_seconds: f64,
}

impl BatchResults {
    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// All `.ron` files directly inside `dir`, sorted by name.
pub fn scenario_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();
    Ok(files)
}

/// Assess every scenario in `dir`.
///
/// Only listing the directory can fail; per-file problems end up in
/// [`BatchResults::errors`].
pub fn run_batch(dir: &Path, config: &FleetAiConfig, planner: PlannerKind) -> Result<BatchResults> {
    let start = Instant::now();
    let files = scenario_files(dir)?;
    info!(dir = %dir.display(), scenarios = files.len(), "Starting batch assessment");

    let outcomes: Vec<std::result::Result<ScenarioReport, BatchError>> = files
        .par_iter()
        .map(|path| {
            Scenario::load(path)
                .map(|scenario| assess_scenario(&scenario, config, planner))
                .map_err(|e| {
                    warn!(path = %path.display(), error = %e, "Skipping scenario");
                    BatchError {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })
        })
        .collect();

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(error) => errors.push(error),
        }
    }

    let duration_seconds = start.elapsed().as_secs_f64();
    info!(
        assessed = reports.len(),
        failed = errors.len(),
        duration_seconds,
        "Batch complete"
    );

    Ok(BatchResults {
        reports,
        errors,
        duration_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"(
        name: "NAME",
        fleet: (id: (1), position: (x: 100.0, y: 0.0), ships: [
            (id: (1), attack_power: 50.0, health: 100.0, max_health: 100.0),
        ]),
        enemy: (id: (2), position: (x: 600.0, y: 0.0), ships: [
            (id: (10), attack_power: 10.0, health: 50.0, max_health: 100.0),
        ]),
    )"#;

    #[test]
    fn test_batch_collects_reports_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.ron"), SCENARIO.replace("NAME", "Bravo")).unwrap();
        std::fs::write(dir.path().join("a.ron"), SCENARIO.replace("NAME", "Alpha")).unwrap();
        std::fs::write(dir.path().join("broken.ron"), "(name: ").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let results = run_batch(dir.path(), &FleetAiConfig::default(), PlannerKind::Greedy).unwrap();

        let names: Vec<&str> = results.reports.iter().map(|r| r.scenario.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo"]);
        assert_eq!(results.errors.len(), 1);
        assert!(results.errors[0].path.ends_with("broken.ron"));
    }

    #[test]
    fn test_results_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.ron"), SCENARIO.replace("NAME", "One")).unwrap();
        let results = run_batch(dir.path(), &FleetAiConfig::default(), PlannerKind::Lattice).unwrap();

        let out = dir.path().join("out").join("results.json");
        results.save(&out).unwrap();
        let loaded = BatchResults::load(&out).unwrap();
        assert_eq!(loaded.reports, results.reports);
        assert!(loaded.errors.is_empty());
    }

    #[test]
    fn test_missing_directory_fails() {
        assert!(run_batch(
            Path::new("/nonexistent/scenarios"),
            &FleetAiConfig::default(),
            PlannerKind::Greedy
        )
        .is_err());
    }
}
