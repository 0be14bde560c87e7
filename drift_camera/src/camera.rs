// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::config::PhysicsConfig;
use crate::velocity::VelocityTracker;

/// Result of one [`Camera::step`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    /// Distance the camera offset moved during this step.
    pub travel: f64,
    /// The camera is at rest: not dragging, no momentum, on target.
    pub settled: bool,
    /// `settled` became `true` during this step.
    pub became_settled: bool,
    /// Non-finite state was detected and discarded during this step.
    pub healed: bool,
}

/// Continuous 2D camera driven by drags and released momentum.
///
/// The camera keeps two offsets. Drag input moves the *target* offset 1:1;
/// every [`Camera::step`] eases the *camera* offset toward the target, with
/// faster catch-up for large gaps. Releasing a drag leaves behind momentum,
/// a weighted blend of the last few drag displacements, which keeps pushing
/// the target while input is recent and then dies off quickly.
///
/// Offsets are the translation applied to world content: a camera offset of
/// `(-100, 0)` shows the world 100 pixels to the right of the origin.
///
/// Time is supplied by the caller in milliseconds; the camera never reads a
/// clock.
#[derive(Clone, Debug)]
pub struct Camera {
    config: PhysicsConfig,
    camera_offset: Vec2,
    target_offset: Vec2,
    momentum: Vec2,
    velocity: VelocityTracker,
    dragging: bool,
    drag_anchor: Option<(Point, u64)>,
    last_move_at: Option<u64>,
    settled: bool,
}

impl Camera {
    /// Creates a camera at rest at the origin.
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            camera_offset: Vec2::ZERO,
            target_offset: Vec2::ZERO,
            momentum: Vec2::ZERO,
            velocity: VelocityTracker::new(),
            dragging: false,
            drag_anchor: None,
            last_move_at: None,
            settled: true,
        }
    }

    /// Tuning constants in use.
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Current (eased) camera offset.
    #[must_use]
    pub fn camera_offset(&self) -> Vec2 {
        self.camera_offset
    }

    /// Offset the camera is easing toward.
    #[must_use]
    pub fn target_offset(&self) -> Vec2 {
        self.target_offset
    }

    /// Residual momentum.
    #[must_use]
    pub fn momentum(&self) -> Vec2 {
        self.momentum
    }

    /// Drag displacement history.
    #[must_use]
    pub fn velocity(&self) -> &VelocityTracker {
        &self.velocity
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns `true` once the camera has come to exact rest.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Pointer position and time at which the current drag started.
    #[must_use]
    pub fn drag_anchor(&self) -> Option<(Point, u64)> {
        self.drag_anchor
    }

    /// Returns `true` if drag input arrived within the move threshold of `now`.
    #[must_use]
    pub fn is_moving(&self, now: u64) -> bool {
        self.last_move_at
            .is_some_and(|at| now.saturating_sub(at) <= self.config.move_threshold_ms)
    }

    /// Jumps to `offset` and stops all motion.
    pub fn jump_to(&mut self, offset: Vec2) {
        if !offset.is_finite() {
            log::warn!("ignoring non-finite camera jump");
            return;
        }
        self.camera_offset = offset;
        self.target_offset = offset;
        self.momentum = Vec2::ZERO;
        self.velocity.clear();
        self.settled = !self.dragging;
    }

    /// Starts a drag anchored at `anchor`.
    ///
    /// Existing momentum and sample history are kept so a grab can redirect
    /// a fling smoothly.
    pub fn begin_drag(&mut self, anchor: Point, now: u64) {
        log::debug!("camera drag start at {anchor:?}");
        self.dragging = true;
        self.settled = false;
        self.drag_anchor = Some((anchor, now));
    }

    /// Applies a drag displacement.
    ///
    /// The target follows the displacement exactly; momentum is recomputed
    /// from the updated sample history. Ignored when no drag is active or the
    /// displacement is not finite.
    pub fn drag_by(&mut self, delta: Vec2, now: u64) {
        if !self.dragging {
            return;
        }
        if !delta.is_finite() {
            log::warn!("discarding non-finite drag delta");
            return;
        }
        self.target_offset += delta;
        self.velocity.push(delta);
        self.momentum =
            self.velocity.weighted(&self.config.sample_weights) * self.config.momentum_strength;
        self.last_move_at = Some(now);
    }

    /// Ends the active drag.
    ///
    /// If the pointer had been still for longer than the move threshold the
    /// gesture is treated as already idle and momentum is dropped.
    pub fn end_drag(&mut self, now: u64) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.drag_anchor = None;
        if !self.is_moving(now) {
            self.momentum = Vec2::ZERO;
            self.velocity.clear();
        }
        log::debug!("camera drag end, momentum {:?}", self.momentum);
    }

    /// Advances the camera by one frame.
    pub fn step(&mut self, now: u64) -> StepOutcome {
        let cfg = self.config;
        let before = self.camera_offset;

        if !self.dragging {
            // L1 norm on purpose: cheap, and only compared to a threshold.
            let magnitude = self.momentum.x.abs() + self.momentum.y.abs();
            if magnitude > cfg.stop_threshold {
                if self.is_moving(now) {
                    self.target_offset += self.momentum;
                    self.momentum *= cfg.damping;
                } else {
                    self.momentum *= cfg.idle_damping;
                }
            } else {
                self.momentum = Vec2::ZERO;
                self.velocity.clear();
            }
        }

        let distance = (self.target_offset - self.camera_offset).length();
        if !self.dragging && distance > cfg.snap_min && distance < cfg.snap_max {
            self.target_offset = self.camera_offset;
        }

        let smoothing = cfg.base_smoothing * (1.0 + (distance / cfg.catch_up_distance).min(1.0));
        self.camera_offset += (self.target_offset - self.camera_offset) * smoothing;

        let healed = self.heal(before);

        let remaining = (self.target_offset - self.camera_offset).length();
        let at_rest = !self.dragging && self.momentum == Vec2::ZERO && remaining <= cfg.snap_min;
        if at_rest {
            self.target_offset = self.camera_offset;
        }
        let became_settled = at_rest && !self.settled;
        self.settled = at_rest;

        let travel = (self.camera_offset - before).length();
        if travel > 0.0 {
            log::trace!(
                "camera step: offset {:?} target {:?} momentum {:?}",
                self.camera_offset,
                self.target_offset,
                self.momentum
            );
        }
        StepOutcome {
            travel,
            settled: at_rest,
            became_settled,
            healed,
        }
    }

    /// Discards non-finite state, falling back to the last good offset.
    fn heal(&mut self, last_good: Vec2) -> bool {
        if self.camera_offset.is_finite()
            && self.target_offset.is_finite()
            && self.momentum.is_finite()
        {
            return false;
        }
        log::warn!("camera state became non-finite; discarding motion");
        if !self.camera_offset.is_finite() {
            self.camera_offset = last_good;
        }
        self.target_offset = self.camera_offset;
        self.momentum = Vec2::ZERO;
        self.velocity.clear();
        true
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}
