// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: movement deltas, total offsets, and travel distance.
//!
//! ## Usage
//!
//! 1) Start tracking with [`DragState::start`] at the press position.
//! 2) On each move, call [`DragState::update`] to get the delta since the last update.
//! 3) Use [`DragState::max_distance`] to tell taps from drags on release.
//! 4) Reset with [`DragState::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use drift_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! let delta = drag.update(Point::new(13.0, 24.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (3.0, 4.0));
//! assert_eq!(drag.max_distance(), 5.0);
//!
//! // Coming back does not shrink the furthest travel.
//! drag.update(Point::new(10.0, 20.0));
//! assert_eq!(drag.max_distance(), 5.0);
//! ```

use kurbo::{Point, Vec2};

/// Tracks press position, last position and furthest travel of a drag.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Press position.
    pub start_pos: Option<Point>,
    /// Last recorded pointer position.
    pub last_pos: Option<Point>,
    max_distance: f64,
}

impl DragState {
    /// Starts tracking from `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.max_distance = 0.0;
    }

    /// Records `pos`, returning the delta since the previous position.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let start = self.start_pos?;
        self.max_distance = self.max_distance.max((pos - start).length());
        self.last_pos.replace(pos).map(|last| pos - last)
    }

    /// Offset of `current_pos` from the press position.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Furthest distance from the press position seen so far.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while tracking.
    pub fn is_active(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_state_yields_nothing() {
        let mut drag = DragState::default();
        assert!(!drag.is_active());
        assert_eq!(drag.update(Point::new(15.0, 25.0)), None);
        assert!(drag.last_pos.is_none());
        assert_eq!(drag.total_offset(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn incremental_deltas_and_total_offset() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));
        assert_eq!(drag.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(drag.update(Point::new(6.0, 5.0)), Some(Vec2::new(-2.0, -2.0)));
        assert_eq!(
            drag.total_offset(Point::new(6.0, 5.0)),
            Some(Vec2::new(6.0, 5.0))
        );
    }

    #[test]
    fn missing_last_position_is_recovered() {
        let mut drag = DragState {
            start_pos: Some(Point::new(10.0, 20.0)),
            last_pos: None,
            max_distance: 0.0,
        };
        assert_eq!(drag.update(Point::new(15.0, 25.0)), None);
        assert_eq!(drag.last_pos, Some(Point::new(15.0, 25.0)));
    }

    #[test]
    fn restart_and_end_reset_travel() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO);
        drag.update(Point::new(30.0, 40.0));
        assert_eq!(drag.max_distance(), 50.0);
        drag.start(Point::new(100.0, 100.0));
        assert_eq!(drag.max_distance(), 0.0);
        drag.end();
        assert!(!drag.is_active());
        assert_eq!(drag.max_distance(), 0.0);
    }
}
