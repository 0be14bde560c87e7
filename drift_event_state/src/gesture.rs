// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag/tap recognition over pointer and touch input.
//!
//! [`DragGesture`] turns raw down/move/up events from a single pointer into
//! a uniform stream of [`GestureEvent`]s:
//!
//! - A press only becomes a drag once the pointer has travelled at least
//!   [`GestureConfig::tap_slop`] from the press point. At that moment a
//!   [`GestureEvent::DragStart`] is emitted, followed by the displacement
//!   accumulated so far.
//! - Releasing before that is a [`GestureEvent::Tap`] at the press point.
//! - Touch displacements are multiplied by [`GestureConfig::touch_multiplier`].
//! - While one pointer is tracked, every other pointer is ignored.
//!
//! ## Minimal example
//!
//! ```
//! use drift_event_state::gesture::{DragGesture, GestureEvent, PointerId, PointerKind};
//! use kurbo::{Point, Vec2};
//!
//! let mut g = DragGesture::default();
//! let id = PointerId(1);
//!
//! g.pointer_down(id, PointerKind::Mouse, Point::new(0.0, 0.0), 0);
//! assert!(g.pointer_move(id, Point::new(2.0, 0.0), 10).is_empty());
//! assert!(!g.suppress_native());
//!
//! let events = g.pointer_move(id, Point::new(8.0, 0.0), 20);
//! assert_eq!(
//!     events.as_slice(),
//!     &[
//!         GestureEvent::DragStart { anchor: Point::new(0.0, 0.0), time: 20 },
//!         GestureEvent::DragMove { delta: Vec2::new(8.0, 0.0), time: 20 },
//!     ]
//! );
//! assert!(g.suppress_native());
//! assert_eq!(g.pointer_up(id, 30), Some(GestureEvent::DragEnd { time: 30 }));
//! ```

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::drag::DragState;

/// Kind of device that produced an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or trackpad.
    Mouse,
    /// Finger on a touch screen.
    Touch,
    /// Stylus.
    Pen,
}

/// Host-assigned pointer identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i64);

/// Tuning for [`DragGesture`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Travel, in pixels, below which a press-release is a tap.
    pub tap_slop: f64,
    /// Scale applied to touch displacements.
    pub touch_multiplier: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop: 5.0,
            touch_multiplier: 1.8,
        }
    }
}

/// Normalized gesture output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureEvent {
    /// A press turned into a drag; `anchor` is the press position.
    DragStart {
        /// Where the pointer went down.
        anchor: Point,
        /// Host time in milliseconds.
        time: u64,
    },
    /// Scaled displacement since the previous drag event.
    DragMove {
        /// Displacement in pixels.
        delta: Vec2,
        /// Host time in milliseconds.
        time: u64,
    },
    /// The drag ended.
    DragEnd {
        /// Host time in milliseconds.
        time: u64,
    },
    /// Press and release without crossing the tap slop.
    Tap {
        /// Press position.
        pos: Point,
        /// Host time in milliseconds.
        time: u64,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Pressed,
    Dragging,
}

/// Single-pointer drag/tap recognizer.
#[derive(Clone, Debug)]
pub struct DragGesture {
    config: GestureConfig,
    phase: Phase,
    pointer: Option<(PointerId, PointerKind)>,
    drag: DragState,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl DragGesture {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            pointer: None,
            drag: DragState::default(),
        }
    }

    /// Tuning in use.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Returns `true` once the tracked press has become a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// Returns `true` while a pointer is tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Kind of the tracked pointer, if any.
    #[must_use]
    pub fn pointer_kind(&self) -> Option<PointerKind> {
        self.pointer.map(|(_, kind)| kind)
    }

    /// Whether the host should suppress native scrolling and selection.
    ///
    /// Only true for an actual drag, so simple taps still produce native
    /// click behavior.
    #[must_use]
    pub fn suppress_native(&self) -> bool {
        self.is_dragging()
    }

    /// Handles a pointer press.
    ///
    /// Ignored while another pointer is tracked or when `pos` is not finite.
    pub fn pointer_down(&mut self, id: PointerId, kind: PointerKind, pos: Point, _now: u64) {
        if self.pointer.is_some() || !pos.is_finite() {
            return;
        }
        self.pointer = Some((id, kind));
        self.phase = Phase::Pressed;
        self.drag.start(pos);
    }

    /// Handles pointer motion, returning any drag events it produced.
    pub fn pointer_move(
        &mut self,
        id: PointerId,
        pos: Point,
        now: u64,
    ) -> SmallVec<[GestureEvent; 2]> {
        let mut out = SmallVec::new();
        if !self.tracks(id) || !pos.is_finite() {
            return out;
        }
        match self.phase {
            Phase::Idle => {}
            Phase::Pressed => {
                let Some(anchor) = self.drag.start_pos else {
                    return out;
                };
                let _ = self.drag.update(pos);
                if self.drag.max_distance() >= self.config.tap_slop {
                    self.phase = Phase::Dragging;
                    log::debug!("press at {anchor:?} became a drag");
                    out.push(GestureEvent::DragStart { anchor, time: now });
                    out.push(GestureEvent::DragMove {
                        delta: self.scale(pos - anchor),
                        time: now,
                    });
                }
            }
            Phase::Dragging => {
                if let Some(delta) = self.drag.update(pos) {
                    out.push(GestureEvent::DragMove {
                        delta: self.scale(delta),
                        time: now,
                    });
                }
            }
        }
        out
    }

    /// Handles a pointer release.
    pub fn pointer_up(&mut self, id: PointerId, now: u64) -> Option<GestureEvent> {
        if !self.tracks(id) {
            return None;
        }
        let event = match self.phase {
            Phase::Idle => None,
            Phase::Pressed => self
                .drag
                .start_pos
                .map(|pos| GestureEvent::Tap { pos, time: now }),
            Phase::Dragging => Some(GestureEvent::DragEnd { time: now }),
        };
        self.reset();
        event
    }

    /// Handles a cancelled pointer; never produces a tap.
    pub fn pointer_cancel(&mut self, id: PointerId, now: u64) -> Option<GestureEvent> {
        if !self.tracks(id) {
            return None;
        }
        let event = self
            .is_dragging()
            .then_some(GestureEvent::DragEnd { time: now });
        self.reset();
        event
    }

    /// Forgets the tracked pointer without emitting anything.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.pointer = None;
        self.drag.end();
    }

    fn tracks(&self, id: PointerId) -> bool {
        self.pointer.is_some_and(|(tracked, _)| tracked == id)
    }

    fn scale(&self, delta: Vec2) -> Vec2 {
        match self.pointer_kind() {
            Some(PointerKind::Touch) => delta * self.config.touch_multiplier,
            _ => delta,
        }
    }
}
