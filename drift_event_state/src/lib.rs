// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drift Event State: gesture state managers for pannable surfaces.
//!
//! This crate provides small, focused state machines that sit between raw
//! host input and the camera:
//!
//! - [`drag`]: track press position, per-move deltas, and furthest travel.
//! - [`gesture`]: recognize taps versus drags from a single pointer or
//!   touch, scale touch motion, and report when native scrolling and text
//!   selection should be suppressed.
//!
//! The crate does not assume any particular UI framework or event system.
//! Hosts translate their pointer/touch events into calls on
//! [`gesture::DragGesture`] and forward the resulting
//! [`gesture::GestureEvent`]s to the camera or to hit testing.
//!
//! ## Usage
//!
//! ```rust
//! use drift_event_state::gesture::{DragGesture, GestureEvent, PointerId, PointerKind};
//! use kurbo::Point;
//!
//! let mut gesture = DragGesture::default();
//! gesture.pointer_down(PointerId(7), PointerKind::Touch, Point::new(40.0, 40.0), 0);
//! match gesture.pointer_up(PointerId(7), 90) {
//!     Some(GestureEvent::Tap { pos, .. }) => assert_eq!(pos, Point::new(40.0, 40.0)),
//!     other => panic!("expected a tap, got {other:?}"),
//! }
//! ```

pub mod drag;
pub mod gesture;
