//! Determinism testing utilities.
//!
//! Provides a harness for verifying that tactical decisions are identical
//! given identical inputs.
//!
//! # Testing Strategy
//!
//! Fleet decisions feed lockstep simulations, so every client must reach
//! the same answer. Sources of divergence include:
//!
//! - **`HashMap` iteration order**: the memo caches are keyed lookups only
//!   and are never iterated.
//!
//! - **Sort stability**: target ranking uses a stable sort with a total
//!   order on scores, so ties always keep enumeration order.
//!
//! - **Search tie-breaking**: the lattice planner breaks equal priorities
//!   on lattice coordinates, never on heap insertion order.
//!
//! The harness runs a scenario several times, serializes the outcome to
//! RON and hashes the text, so any visible difference in a report shows
//! up as a hash mismatch.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use serde::Serialize;
use tracing::warn;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of ticks evaluated per run.
    pub ticks: u64,
}

impl DeterminismResult {
    fn from_hashes(hashes: Vec<u64>, ticks: u64) -> Self {
        let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);
        if !is_deterministic {
            warn!(runs = hashes.len(), ticks, "Runs diverged");
        }
        Self {
            is_deterministic,
            hashes,
            ticks,
        }
    }

    /// Get all unique hashes (should be 1 for deterministic decisions).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Decisions are non-deterministic!\n\
                 Runs: {}\n\
                 Ticks: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.ticks,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Hash the RON rendering of a value.
///
/// # Panics
///
/// Panics if the value cannot be serialized to RON.
#[must_use]
pub fn hash_serialized<T: Serialize + ?Sized>(value: &T) -> u64 {
    let text = ron::to_string(value).expect("value should serialize to RON");
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Run a scenario multiple times and verify every run ends the same.
///
/// # Arguments
///
/// * `runs` - Number of times to run the scenario
/// * `ticks` - Number of ticks per run
/// * `setup` - Creates the initial state
/// * `step` - Advances the state by one tick and returns that tick's outcome
///
/// Every tick's outcome is folded into the run hash.
///
/// # Example
///
/// ```
/// use fleet_core::ai::FleetAi;
/// use fleet_core::environment::StaticEnvironment;
/// use fleet_test_utils::determinism::verify_determinism;
/// use fleet_test_utils::fixtures::{fleet_with_power, pos};
///
/// let own = fleet_with_power(1, pos(0.0, 0.0), 100.0);
/// let enemy = fleet_with_power(2, pos(500.0, 0.0), 40.0);
///
/// let result = verify_determinism(
///     3,
///     10,
///     || FleetAi::new(StaticEnvironment::default()),
///     |ai| {
///         ai.update(0.1);
///         ai.assess(&own, &enemy)
///     },
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<S, T, Setup, Step>(
    runs: usize,
    ticks: u64,
    setup: Setup,
    step: Step,
) -> DeterminismResult
where
    T: Serialize,
    Setup: Fn() -> S,
    Step: Fn(&mut S) -> T,
{
    let hashes = (0..runs)
        .map(|_| {
            let mut state = setup();
            let mut hasher = DefaultHasher::new();
            for _ in 0..ticks {
                hash_serialized(&step(&mut state)).hash(&mut hasher);
            }
            hasher.finish()
        })
        .collect();

    DeterminismResult::from_hashes(hashes, ticks)
}

/// Like [`verify_determinism`], but each run happens on its own thread.
///
/// # Panics
///
/// Panics if a worker thread panics.
pub fn verify_parallel_determinism<S, T, Setup, Step>(
    runs: usize,
    ticks: u64,
    setup: Setup,
    step: Step,
) -> DeterminismResult
where
    T: Serialize,
    Setup: Fn() -> S + Sync,
    Step: Fn(&mut S) -> T + Sync,
{
    let hashes = thread::scope(|scope| {
        let handles: Vec<_> = (0..runs)
            .map(|_| {
                scope.spawn(|| {
                    let mut state = setup();
                    let mut hasher = DefaultHasher::new();
                    for _ in 0..ticks {
                        hash_serialized(&step(&mut state)).hash(&mut hasher);
                    }
                    hasher.finish()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("determinism worker panicked"))
            .collect()
    });

    DeterminismResult::from_hashes(hashes, ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_runs_match() {
        let result = verify_determinism(4, 5, || 0u32, |n| {
            *n += 1;
            *n
        });
        assert!(result.is_deterministic);
        assert_eq!(result.unique_hashes().len(), 1);
    }

    #[test]
    fn test_divergent_runs_detected() {
        use std::sync::atomic::{AtomicU32, Ordering};
        let seed = AtomicU32::new(0);
        let result = verify_determinism(
            2,
            1,
            || seed.fetch_add(1, Ordering::Relaxed),
            |n| *n,
        );
        assert!(!result.is_deterministic);
        assert_eq!(result.unique_hashes().len(), 2);
    }

    #[test]
    fn test_parallel_runs_match() {
        let result = verify_parallel_determinism(4, 3, || vec![1.5f32, 2.5], |v| {
            v.push(v.len() as f32);
            v.clone()
        });
        result.assert_deterministic();
    }
}
