// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use drift_camera::PhysicsConfig;
use drift_event_state::gesture::GestureConfig;
use drift_focus::FocusConfig;
use drift_lattice::{ContentAssignment, DEFAULT_CULL_BUFFER, LayoutConfig, MAX_CULL_BUFFER};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Every tunable of a [`GridEngine`](crate::GridEngine).
///
/// Missing fields in a JSON document keep their defaults, so a config can
/// override a single constant:
///
/// ```
/// use drift_grid::GridConfig;
///
/// let config = GridConfig::from_json(r#"{ "physics": { "damping": 0.9 }, "seed": 3 }"#).unwrap();
/// assert_eq!(config.physics.damping, 0.9);
/// assert_eq!(config.physics.stop_threshold, 0.2);
/// assert_eq!(config.seed, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Camera physics.
    pub physics: PhysicsConfig,
    /// Tap/drag recognition.
    pub gesture: GestureConfig,
    /// Tile size presets.
    pub layout: LayoutConfig,
    /// Focus overlay timing and scale.
    pub focus: FocusConfig,
    /// Extra margin, in pixels, culled around the viewport.
    ///
    /// Must lie in `0.0..=MAX_CULL_BUFFER`.
    pub cull_buffer: f64,
    /// Delay after settling before video tiles start playing.
    pub video_upgrade_delay_ms: u64,
    /// Shuffle seed for content assignment.
    pub seed: u64,
    /// Content assignment strategy.
    pub assignment: ContentAssignment,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            gesture: GestureConfig::default(),
            layout: LayoutConfig::default(),
            focus: FocusConfig::default(),
            cull_buffer: DEFAULT_CULL_BUFFER,
            video_upgrade_delay_ms: 400,
            seed: 0,
            assignment: ContentAssignment::default(),
        }
    }
}

impl GridConfig {
    /// Parses a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks values that would make culling unbounded.
    pub fn validate(&self) -> Result<(), EngineError> {
        if (0.0..=MAX_CULL_BUFFER).contains(&self.cull_buffer) {
            Ok(())
        } else {
            Err(EngineError::CullBuffer(self.cull_buffer))
        }
    }
}
