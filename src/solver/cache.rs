//! Caller-owned warm-start cache
//!
//! Batch callers solve many nearby characteristic equations, typically the
//! same branch deltas under slightly perturbed weights. A [`RootFinder`]
//! remembers the last root found for each key and hands it to
//! [`find_root`](crate::solver::find_root) as the Newton warm start. The cache
//! only changes the search path: a missing or stale entry still yields the
//! same root within `1e-6`.

use crate::solver::root::Root;
use crate::solver::roots::find_root_with;
use crate::solver::trace::{SolveEvent, SolveObserver};
use rustc_hash::FxHashMap;
use std::hash::Hash;
use tracing::trace;

/// Counters for a [`RootFinder`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub calls: u64,
    /// Solves answered by Newton from a cached root
    pub newton_hits: u64,
    /// Warm starts that were rejected and re-solved by Brent
    pub bracket_fallbacks: u64,
    pub infeasible: u64,
    pub divergent: u64,
}

/// Warm-start cache keyed by an opaque caller key
#[derive(Debug, Clone)]
pub struct RootFinder<K> {
    roots: FxHashMap<K, f64>,
    stats: SolveStats,
}

impl<K: Hash + Eq> Default for RootFinder<K> {
    fn default() -> Self {
        Self {
            roots: FxHashMap::default(),
            stats: SolveStats::default(),
        }
    }
}

impl<K: Hash + Eq> RootFinder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve `Σ r^(-d_j) = 1`, warm-starting from the root last stored under `key`.
    pub fn find_root(&mut self, key: K, deltas: &[f64]) -> Root {
        let warm_start = self.roots.get(&key).copied();
        let mut path = PathObserver::default();
        let root = find_root_with(deltas, warm_start, &mut path);

        self.stats.calls += 1;
        if path.newton && !path.rejected {
            self.stats.newton_hits += 1;
        }
        if path.rejected {
            self.stats.bracket_fallbacks += 1;
        }

        match root {
            Root::Finite(r) => {
                self.roots.insert(key, r);
            }
            Root::Infeasible => self.stats.infeasible += 1,
            Root::Divergent => self.stats.divergent += 1,
        }
        trace!(?warm_start, %root, "cached solve");
        root
    }

    /// The root stored under `key`, if any.
    pub fn cached(&self, key: &K) -> Option<f64> {
        self.roots.get(key).copied()
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Drop all cached roots. Counters are kept.
    pub fn clear(&mut self) {
        self.roots.clear();
    }
}

/// Records which solver path a single call took
#[derive(Default)]
struct PathObserver {
    newton: bool,
    rejected: bool,
}

impl SolveObserver for PathObserver {
    fn observe(&mut self, event: SolveEvent) {
        match event {
            SolveEvent::Newton { .. } => self.newton = true,
            SolveEvent::NewtonRejected { .. } => self.rejected = true,
            _ => {}
        }
    }
}
