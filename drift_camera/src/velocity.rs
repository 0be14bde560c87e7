// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

/// Number of displacement samples kept.
pub const VELOCITY_SAMPLES: usize = 3;

/// Fixed-size history of per-event drag displacements, most recent first.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VelocityTracker {
    samples: [Vec2; VELOCITY_SAMPLES],
    len: usize,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new displacement, evicting the oldest when full.
    pub fn push(&mut self, delta: Vec2) {
        self.samples.copy_within(0..VELOCITY_SAMPLES - 1, 1);
        self.samples[0] = delta;
        self.len = (self.len + 1).min(VELOCITY_SAMPLES);
    }

    /// Forgets every sample.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Recorded samples, newest first.
    #[must_use]
    pub fn samples(&self) -> &[Vec2] {
        &self.samples[..self.len]
    }

    /// Number of recorded samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no sample has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Weighted sum of the samples; `weights[0]` applies to the newest.
    ///
    /// Missing samples contribute nothing.
    #[must_use]
    pub fn weighted(&self, weights: &[f64; VELOCITY_SAMPLES]) -> Vec2 {
        self.samples()
            .iter()
            .zip(weights)
            .fold(Vec2::ZERO, |acc, (sample, weight)| acc + *sample * *weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_most_recent_first() {
        let mut v = VelocityTracker::new();
        for i in 1..=4 {
            v.push(Vec2::new(f64::from(i), 0.0));
        }
        assert_eq!(v.len(), 3);
        let xs: Vec<f64> = v.samples().iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![4.0, 3.0, 2.0]);
    }

    #[test]
    fn weighted_ignores_missing_samples() {
        let mut v = VelocityTracker::new();
        v.push(Vec2::new(10.0, -4.0));
        let w = v.weighted(&[0.5, 0.3, 0.2]);
        assert_eq!(w, Vec2::new(5.0, -2.0));
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.weighted(&[0.5, 0.3, 0.2]), Vec2::ZERO);
    }
}
