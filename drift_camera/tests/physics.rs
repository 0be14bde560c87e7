// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `drift_camera` crate.
//!
//! These drive the camera through whole gestures and check the momentum
//! numbers, convergence to exact rest, and recompute throttling.

use drift_camera::{Camera, PhysicsConfig, RecomputeThrottle};
use kurbo::{Point, Vec2};

const FRAME_MS: u64 = 16;

fn fling(camera: &mut Camera, deltas: &[Vec2]) -> u64 {
    let mut now = 0;
    camera.begin_drag(Point::new(500.0, 400.0), now);
    for &delta in deltas {
        now += FRAME_MS;
        camera.drag_by(delta, now);
    }
    camera.end_drag(now);
    now
}

#[test]
fn three_equal_samples_give_momentum_ten() {
    let mut camera = Camera::default();
    let released = fling(&mut camera, &[Vec2::new(100.0, 0.0); 3]);
    let m = camera.momentum();
    assert!((m.x - 10.0).abs() < 1e-9, "momentum was {m:?}");
    assert_eq!(m.y, 0.0);

    // Frames inside the move window apply momentum to the target and damp it.
    let target_before = camera.target_offset();
    camera.step(released + 8);
    assert!((camera.momentum().x - 9.2).abs() < 1e-9);
    assert!((camera.target_offset().x - target_before.x - 10.0).abs() < 1e-9);

    camera.step(released + 24);
    assert!((camera.momentum().x - 9.2 * 0.92).abs() < 1e-9);
}

#[test]
fn momentum_decays_harshly_after_input_goes_idle() {
    let mut camera = Camera::default();
    let released = fling(&mut camera, &[Vec2::new(100.0, 0.0); 3]);
    let target = camera.target_offset();
    // Outside the 60ms window: halve without pushing the target.
    camera.step(released + 100);
    assert!((camera.momentum().x - 5.0).abs() < 1e-9);
    assert_eq!(camera.target_offset(), target);
}

#[test]
fn momentum_snaps_to_zero_at_the_stop_threshold() {
    let mut camera = Camera::default();
    let released = fling(&mut camera, &[Vec2::new(2.0, 0.0); 3]);
    // 2.0 * 0.1 = 0.2, exactly at the threshold.
    assert!((camera.momentum().x - 0.2).abs() < 1e-9);
    camera.step(released + 1);
    assert!(camera.momentum().x <= 0.2);
    let mut now = released + 1;
    for _ in 0..3 {
        now += FRAME_MS;
        camera.step(now);
    }
    assert_eq!(camera.momentum(), Vec2::ZERO);
}

#[test]
fn any_fling_reaches_exact_rest_in_bounded_frames() {
    for strength in [1.0, 40.0, 400.0, 4_000.0, 40_000.0] {
        for dir in [Vec2::new(1.0, 0.0), Vec2::new(-0.6, 0.8), Vec2::new(0.0, -1.0)] {
            let mut camera = Camera::default();
            let mut now = fling(&mut camera, &[dir * strength; 3]);
            let mut frames = 0;
            loop {
                now += FRAME_MS;
                let out = camera.step(now);
                frames += 1;
                if out.settled {
                    break;
                }
                assert!(frames < 5_000, "no rest after {frames} frames for {strength}");
            }
            assert_eq!(camera.momentum(), Vec2::ZERO);
            assert_eq!(camera.camera_offset(), camera.target_offset());
            // Holds rest afterwards.
            for _ in 0..10 {
                now += FRAME_MS;
                let out = camera.step(now);
                assert!(out.settled);
                assert!(!out.became_settled);
                assert_eq!(out.travel, 0.0);
            }
        }
    }
}

#[test]
fn settled_is_reported_once_per_rest() {
    let mut camera = Camera::default();
    let mut now = fling(&mut camera, &[Vec2::new(30.0, 30.0); 3]);
    let mut transitions = 0;
    for _ in 0..2_000 {
        now += FRAME_MS;
        if camera.step(now).became_settled {
            transitions += 1;
        }
    }
    assert_eq!(transitions, 1);
    assert!(camera.is_settled());
}

#[test]
fn dragging_is_never_settled() {
    let mut camera = Camera::default();
    camera.begin_drag(Point::ZERO, 0);
    for i in 1..100 {
        assert!(!camera.step(i * FRAME_MS).settled);
    }
}

#[test]
fn nan_drag_delta_is_discarded() {
    let mut camera = Camera::default();
    camera.begin_drag(Point::ZERO, 0);
    camera.drag_by(Vec2::new(f64::NAN, 3.0), 16);
    camera.drag_by(Vec2::new(f64::INFINITY, 0.0), 32);
    assert_eq!(camera.target_offset(), Vec2::ZERO);
    assert!(camera.velocity().is_empty());
}

#[test]
fn throttle_tracks_camera_travel() {
    let config = PhysicsConfig::default();
    let mut camera = Camera::new(config);
    let mut throttle = RecomputeThrottle::new(&config);
    assert!(throttle.poll(0));

    camera.begin_drag(Point::ZERO, 0);
    camera.drag_by(Vec2::new(-5_000.0, 0.0), 0);
    let mut passes = 0;
    let mut now = 0;
    for _ in 0..60 {
        now += FRAME_MS;
        throttle.record(camera.step(now).travel);
        if throttle.poll(now) {
            passes += 1;
        }
    }
    // 60 frames of 16ms fit at most ten 100ms windows.
    assert!(passes >= 1);
    assert!(passes <= 10);
}
