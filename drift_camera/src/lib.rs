// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drift Camera: a momentum camera for pannable, infinite surfaces.
//!
//! This crate provides a small, headless model of a 2D camera that is dragged
//! around by the user and keeps gliding after release. It only computes
//! numbers; callers apply [`Camera::camera_offset`] to whatever render surface
//! they own.
//!
//! - [`Camera`]: camera/target offsets, momentum, drag lifecycle, and a
//!   per-frame [`Camera::step`] that integrates momentum, eases the camera
//!   toward its target and reports when it has settled.
//! - [`VelocityTracker`]: the last three drag displacements, newest first.
//! - [`RecomputeThrottle`]: distance- and time-gated trigger for re-running
//!   viewport culling while the camera moves.
//! - [`PhysicsConfig`]: every tuning constant, with serde support.
//!
//! ## Minimal example
//!
//! ```rust
//! use drift_camera::{Camera, PhysicsConfig};
//! use kurbo::{Point, Vec2};
//!
//! let mut camera = Camera::new(PhysicsConfig::default());
//! camera.begin_drag(Point::new(400.0, 300.0), 0);
//! camera.drag_by(Vec2::new(-40.0, 0.0), 16);
//! camera.drag_by(Vec2::new(-40.0, 0.0), 32);
//! camera.end_drag(40);
//!
//! let mut frames = 0;
//! let mut now = 40;
//! while !camera.step(now).settled {
//!     now += 16;
//!     frames += 1;
//!     assert!(frames < 10_000);
//! }
//! assert!(camera.camera_offset().x < 0.0);
//! ```
//!
//! ## Settling
//!
//! Momentum at or below the stop threshold snaps to zero, and a camera that
//! is within a couple of pixels of its target snaps its target onto itself,
//! so motion always ends in exact rest after a bounded number of frames
//! instead of drifting asymptotically. Non-finite state from pathological
//! input is discarded during [`Camera::step`] rather than propagated.

mod camera;
mod config;
mod throttle;
mod velocity;

pub use camera::{Camera, StepOutcome};
pub use config::PhysicsConfig;
pub use throttle::RecomputeThrottle;
pub use velocity::{VELOCITY_SAMPLES, VelocityTracker};
