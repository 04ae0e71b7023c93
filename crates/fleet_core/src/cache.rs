//! Per-fleet memoization of tactical scalars.
//!
//! Entries are written on first lookup and only ever dropped by
//! [`MemoCache::clear`]. [`crate::ai::FleetAi::update`] clears every cache at
//! the start of each tick, so a cached value is never older than the current
//! tick but also does not follow changes to a fleet within the tick.

use std::collections::HashMap;

use tracing::trace;

use crate::fleet::FleetId;

/// Memoized `f32` values keyed by fleet.
#[derive(Debug, Clone, Default)]
pub struct MemoCache {
    label: &'static str,
    values: HashMap<FleetId, f32>,
}

impl MemoCache {
    /// Create an empty cache. `label` only shows up in logs.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            values: HashMap::new(),
        }
    }

    /// Cached value for `id`, if any.
    #[must_use]
    pub fn get(&self, id: FleetId) -> Option<f32> {
        self.values.get(&id).copied()
    }

    /// Cached value for `id`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, id: FleetId, compute: impl FnOnce() -> f32) -> f32 {
        if let Some(&value) = self.values.get(&id) {
            trace!(cache = self.label, fleet = id.0, "hit");
            return value;
        }
        let value = compute();
        trace!(cache = self.label, fleet = id.0, value, "miss");
        self.values.insert(id, value);
        value
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of cached fleets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computes_once_until_cleared() {
        let mut cache = MemoCache::new("test");
        let mut calls = 0;

        let first = cache.get_or_insert_with(FleetId(1), || {
            calls += 1;
            42.0
        });
        let second = cache.get_or_insert_with(FleetId(1), || {
            calls += 1;
            7.0
        });
        assert_eq!(first, 42.0);
        assert_eq!(second, 42.0);
        assert_eq!(calls, 1);
        assert_eq!(cache.get(FleetId(1)), Some(42.0));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_insert_with(FleetId(1), || 7.0), 7.0);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut cache = MemoCache::new("test");
        cache.get_or_insert_with(FleetId(1), || 1.0);
        cache.get_or_insert_with(FleetId(2), || 2.0);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(FleetId(2)), Some(2.0));
        assert_eq!(cache.get(FleetId(3)), None);
    }
}
