// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// Tuning constants for [`crate::Camera`] and [`crate::RecomputeThrottle`].
///
/// Every field has a default; partial configuration documents only override
/// the fields they name.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Input within this many milliseconds counts as "moving".
    pub move_threshold_ms: u64,
    /// L1 momentum magnitude at or below which momentum snaps to zero.
    pub stop_threshold: f64,
    /// Momentum decay per frame while still moving.
    pub damping: f64,
    /// Harsher decay once input has gone idle.
    pub idle_damping: f64,
    /// Lower edge of the target snap band; also the settle distance.
    pub snap_min: f64,
    /// Upper edge of the target snap band.
    pub snap_max: f64,
    /// Base fraction of the remaining gap covered per frame.
    pub base_smoothing: f64,
    /// Gap at which smoothing reaches twice its base value.
    pub catch_up_distance: f64,
    /// Scale from weighted drag samples to momentum.
    pub momentum_strength: f64,
    /// Weights of the velocity samples, newest first.
    pub sample_weights: [f64; 3],
    /// Camera travel, in pixels, that warrants a new culling pass.
    pub recompute_distance: f64,
    /// Minimum wall-clock spacing of culling passes.
    pub recompute_interval_ms: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            move_threshold_ms: 60,
            stop_threshold: 0.2,
            damping: 0.92,
            idle_damping: 0.5,
            snap_min: 0.1,
            snap_max: 2.0,
            base_smoothing: 0.02,
            catch_up_distance: 500.0,
            momentum_strength: 0.10,
            sample_weights: [0.5, 0.3333, 0.1667],
            recompute_distance: 200.0,
            recompute_interval_ms: 100,
        }
    }
}
