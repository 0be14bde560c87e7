// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::config::PhysicsConfig;

/// Decides when camera travel warrants a new culling pass.
///
/// A pass is due once the accumulated travel since the previous pass exceeds
/// the distance threshold *and* the minimum interval has elapsed. The first
/// check after construction or [`RecomputeThrottle::force`] is always due.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RecomputeThrottle {
    distance: f64,
    interval_ms: u64,
    accumulated: f64,
    last_at: Option<u64>,
}

impl RecomputeThrottle {
    /// Creates a throttle using the recompute fields of `config`.
    #[must_use]
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            distance: config.recompute_distance,
            interval_ms: config.recompute_interval_ms,
            accumulated: 0.0,
            last_at: None,
        }
    }

    /// Adds `travel` pixels of camera movement.
    pub fn record(&mut self, travel: f64) {
        if travel.is_finite() && travel > 0.0 {
            self.accumulated += travel;
        }
    }

    /// Travel accumulated since the last pass.
    #[must_use]
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Makes the next [`RecomputeThrottle::poll`] due regardless of travel.
    pub fn force(&mut self) {
        self.last_at = None;
    }

    /// Returns `true` if a pass is due at `now`, and if so starts a new window.
    pub fn poll(&mut self, now: u64) -> bool {
        let due = match self.last_at {
            None => true,
            Some(last) => {
                self.accumulated > self.distance && now.saturating_sub(last) >= self.interval_ms
            }
        };
        if due {
            self.accumulated = 0.0;
            self.last_at = Some(now);
        }
        due
    }
}
