// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drift Focus: zoom-to-focus state for a single tile.
//!
//! [`FocusController`] runs the cycle `Idle → Opening → Open → Closing → Idle`
//! for at most one tile at a time. It is driven entirely by the caller:
//!
//! 1) [`FocusController::click`] with the tile's current on-screen rect.
//! 2) [`FocusController::advance`] every frame with the host time and the
//!    camera's settled flag.
//! 3) [`FocusController::dismiss`] when the overlay is tapped.
//! 4) [`FocusController::retrack`] whenever the tile's true on-screen rect is
//!    re-measured, typically when the camera settles.
//!
//! Transitions are reported as [`FocusEvent`]s, and
//! [`FocusController::overlay_rect`] yields the animated rectangle the
//! overlay layer should draw the focused tile into.
//!
//! ## Minimal example
//!
//! ```
//! use drift_focus::{FocusConfig, FocusController, FocusEvent, FocusPhase};
//! use kurbo::Rect;
//!
//! let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
//! let mut focus: FocusController<u32> = FocusController::new(FocusConfig::default());
//!
//! assert_eq!(focus.click(7, Rect::new(100.0, 100.0, 300.0, 350.0), viewport, 0), Some(FocusEvent::Opening(7)));
//! // A second tile cannot take over while the first is active.
//! assert_eq!(focus.click(8, Rect::new(0.0, 0.0, 10.0, 10.0), viewport, 10), None);
//!
//! assert_eq!(focus.advance(500, true), Some(FocusEvent::Opened(7)));
//! // Dismissing while the grid still glides defers the close.
//! assert_eq!(focus.dismiss(600, false), Some(FocusEvent::CloseDeferred(7)));
//! assert_eq!(focus.advance(700, true), Some(FocusEvent::Closing(7)));
//! assert_eq!(focus.advance(1200, true), Some(FocusEvent::Closed(7)));
//! assert_eq!(focus.phase(), FocusPhase::Idle);
//! ```

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Tuning for [`FocusController`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Duration of the open and close animations.
    pub transition_ms: u64,
    /// Enlargement factor of the focused tile.
    pub scale: f64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            transition_ms: 500,
            scale: 2.0,
        }
    }
}

/// Phase of the focus cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusPhase {
    /// Nothing is focused.
    #[default]
    Idle,
    /// The tile is animating to its enlarged rect.
    Opening,
    /// The tile is shown enlarged.
    Open,
    /// The tile is animating back to its lattice position.
    Closing,
}

/// A focus transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FocusEvent<K> {
    /// The open animation started.
    Opening(K),
    /// The open animation finished.
    Opened(K),
    /// A dismiss arrived while the camera was moving; closing waits for settle.
    CloseDeferred(K),
    /// The close animation started.
    Closing(K),
    /// The close animation finished; focus is released.
    Closed(K),
}

/// Single-tile focus state machine.
#[derive(Clone, Debug)]
pub struct FocusController<K> {
    config: FocusConfig,
    phase: FocusPhase,
    focused: Option<K>,
    origin: Rect,
    viewport: Rect,
    phase_started_at: u64,
    close_deferred: bool,
}

impl<K: Copy + Eq + core::fmt::Debug> FocusController<K> {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: FocusConfig) -> Self {
        Self {
            config,
            phase: FocusPhase::Idle,
            focused: None,
            origin: Rect::ZERO,
            viewport: Rect::ZERO,
            phase_started_at: 0,
            close_deferred: false,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    /// Focused tile, if any.
    #[must_use]
    pub fn focused(&self) -> Option<K> {
        self.focused
    }

    /// Returns `true` unless idle.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != FocusPhase::Idle
    }

    /// Returns `true` while the overlay should swallow background input.
    #[must_use]
    pub fn blocks_input(&self) -> bool {
        matches!(self.phase, FocusPhase::Opening | FocusPhase::Open)
    }

    /// Returns `true` if a dismiss is waiting for the camera to settle.
    #[must_use]
    pub fn is_close_deferred(&self) -> bool {
        self.close_deferred
    }

    /// On-screen rect of the tile in the lattice, as last measured.
    #[must_use]
    pub fn origin_rect(&self) -> Rect {
        self.origin
    }

    /// Focuses `key`, whose tile currently occupies `origin` on screen.
    ///
    /// Ignored unless idle; clicks are never queued.
    pub fn click(&mut self, key: K, origin: Rect, viewport: Rect, now: u64) -> Option<FocusEvent<K>> {
        if self.phase != FocusPhase::Idle {
            return None;
        }
        self.focused = Some(key);
        self.origin = origin;
        self.viewport = viewport;
        self.close_deferred = false;
        Some(self.enter(FocusPhase::Opening, key, now))
    }

    /// Requests the focused tile to close.
    ///
    /// Only accepted while open. When the camera is not settled the close is
    /// deferred until a later [`FocusController::advance`] sees it settled.
    pub fn dismiss(&mut self, now: u64, settled: bool) -> Option<FocusEvent<K>> {
        if self.phase != FocusPhase::Open || self.close_deferred {
            return None;
        }
        let key = self.focused?;
        if settled {
            Some(self.enter(FocusPhase::Closing, key, now))
        } else {
            log::debug!("deferring close of {key:?} until the camera settles");
            self.close_deferred = true;
            Some(FocusEvent::CloseDeferred(key))
        }
    }

    /// Advances timed transitions.
    pub fn advance(&mut self, now: u64, settled: bool) -> Option<FocusEvent<K>> {
        let key = self.focused?;
        match self.phase {
            FocusPhase::Idle => None,
            FocusPhase::Opening if self.elapsed(now) >= self.config.transition_ms => {
                Some(self.enter(FocusPhase::Open, key, now))
            }
            FocusPhase::Open if self.close_deferred && settled => {
                self.close_deferred = false;
                Some(self.enter(FocusPhase::Closing, key, now))
            }
            FocusPhase::Closing if self.elapsed(now) >= self.config.transition_ms => {
                self.phase = FocusPhase::Idle;
                self.focused = None;
                log::debug!("focus on {key:?} released");
                Some(FocusEvent::Closed(key))
            }
            _ => None,
        }
    }

    /// Replaces the tile's on-screen rect with a fresh measurement.
    pub fn retrack(&mut self, origin: Rect) {
        if self.is_active() {
            self.origin = origin;
        }
    }

    /// Updates the viewport the enlarged tile is centered in.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Enlarged, viewport-centered rect of the focused tile.
    #[must_use]
    pub fn enlarged_rect(&self) -> Rect {
        let size = Size::new(
            self.origin.width() * self.config.scale,
            self.origin.height() * self.config.scale,
        );
        let center = self.viewport.center();
        Rect::from_center_size(center, size)
    }

    /// Animation progress of the current phase in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, now: u64) -> f64 {
        match self.phase {
            FocusPhase::Opening | FocusPhase::Closing => {
                if self.config.transition_ms == 0 {
                    return 1.0;
                }
                let t = self.elapsed(now) as f64 / self.config.transition_ms as f64;
                t.clamp(0.0, 1.0)
            }
            FocusPhase::Open => 1.0,
            FocusPhase::Idle => 0.0,
        }
    }

    /// Rect the overlay should draw the focused tile into at `now`.
    #[must_use]
    pub fn overlay_rect(&self, now: u64) -> Option<Rect> {
        let eased = ease_out_cubic(self.progress(now));
        match self.phase {
            FocusPhase::Idle => None,
            FocusPhase::Opening => Some(lerp_rect(self.origin, self.enlarged_rect(), eased)),
            FocusPhase::Open => Some(self.enlarged_rect()),
            FocusPhase::Closing => Some(lerp_rect(self.enlarged_rect(), self.origin, eased)),
        }
    }

    /// Drops focus immediately without emitting events.
    pub fn reset(&mut self) -> Option<K> {
        self.phase = FocusPhase::Idle;
        self.close_deferred = false;
        self.focused.take()
    }

    fn enter(&mut self, phase: FocusPhase, key: K, now: u64) -> FocusEvent<K> {
        log::debug!("focus {key:?}: {:?} -> {phase:?}", self.phase);
        self.phase = phase;
        self.phase_started_at = now;
        match phase {
            FocusPhase::Opening => FocusEvent::Opening(key),
            FocusPhase::Open => FocusEvent::Opened(key),
            FocusPhase::Closing => FocusEvent::Closing(key),
            FocusPhase::Idle => FocusEvent::Closed(key),
        }
    }

    fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.phase_started_at)
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn lerp_rect(from: Rect, to: Rect, t: f64) -> Rect {
    let lerp = |a: f64, b: f64| a + (b - a) * t;
    Rect::from_points(
        Point::new(lerp(from.x0, to.x0), lerp(from.y0, to.y0)),
        Point::new(lerp(from.x1, to.x1), lerp(from.y1, to.y1)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);
    const TILE: Rect = Rect::new(100.0, 100.0, 300.0, 350.0);

    fn opened() -> FocusController<u32> {
        let mut f = FocusController::new(FocusConfig::default());
        f.click(1, TILE, VIEW, 0);
        assert_eq!(f.advance(500, true), Some(FocusEvent::Opened(1)));
        f
    }

    #[test]
    fn opening_waits_for_the_full_transition() {
        let mut f = FocusController::new(FocusConfig::default());
        f.click(1_u32, TILE, VIEW, 100);
        assert_eq!(f.advance(599, true), None);
        assert_eq!(f.phase(), FocusPhase::Opening);
        assert_eq!(f.advance(600, true), Some(FocusEvent::Opened(1)));
    }

    #[test]
    fn clicks_are_ignored_while_not_idle() {
        let mut f = opened();
        assert_eq!(f.click(2, TILE, VIEW, 600), None);
        assert_eq!(f.click(1, TILE, VIEW, 600), None);
        assert_eq!(f.focused(), Some(1));
        f.dismiss(700, true);
        assert_eq!(f.click(2, TILE, VIEW, 800), None);
        assert_eq!(f.phase(), FocusPhase::Closing);
    }

    #[test]
    fn dismiss_is_only_accepted_when_open() {
        let mut f = FocusController::new(FocusConfig::default());
        assert_eq!(f.dismiss(0, true), None);
        f.click(3_u32, TILE, VIEW, 0);
        assert_eq!(f.dismiss(10, true), None);
        assert_eq!(f.phase(), FocusPhase::Opening);
    }

    #[test]
    fn immediate_close_when_settled() {
        let mut f = opened();
        assert_eq!(f.dismiss(600, true), Some(FocusEvent::Closing(1)));
        assert_eq!(f.advance(1_099, true), None);
        assert_eq!(f.advance(1_100, true), Some(FocusEvent::Closed(1)));
        assert!(!f.is_active());
        assert_eq!(f.focused(), None);
    }

    #[test]
    fn deferred_close_starts_on_settle() {
        let mut f = opened();
        assert_eq!(f.dismiss(600, false), Some(FocusEvent::CloseDeferred(1)));
        assert_eq!(f.dismiss(610, false), None);
        assert_eq!(f.advance(2_000, false), None);
        assert_eq!(f.phase(), FocusPhase::Open);
        assert_eq!(f.advance(2_100, true), Some(FocusEvent::Closing(1)));
        // The close duration counts from the settle, not from the dismiss.
        assert_eq!(f.advance(2_500, true), None);
        assert_eq!(f.advance(2_600, true), Some(FocusEvent::Closed(1)));
    }

    #[test]
    fn enlarged_rect_is_centered_and_scaled() {
        let f = opened();
        let big = f.enlarged_rect();
        assert_eq!(big.size(), Size::new(400.0, 500.0));
        assert_eq!(big.center(), VIEW.center());
        assert_eq!(f.overlay_rect(600), Some(big));
    }

    #[test]
    fn overlay_animates_from_the_retracked_origin() {
        let mut f = FocusController::new(FocusConfig::default());
        f.click(1_u32, TILE, VIEW, 0);
        assert_eq!(f.overlay_rect(0), Some(TILE));
        let moved = TILE + kurbo::Vec2::new(-40.0, 12.0);
        f.retrack(moved);
        assert_eq!(f.overlay_rect(0), Some(moved));
        f.advance(500, true);
        f.dismiss(500, true);
        assert_eq!(f.overlay_rect(1_000), Some(moved));
        let mid = f.overlay_rect(750).unwrap();
        assert!(mid.width() > moved.width() && mid.width() < f.enlarged_rect().width());
    }

    #[test]
    fn reset_drops_focus_silently() {
        let mut f = opened();
        assert_eq!(f.reset(), Some(1));
        assert_eq!(f.phase(), FocusPhase::Idle);
        assert_eq!(f.advance(10_000, true), None);
    }
}
