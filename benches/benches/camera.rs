// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use drift_camera::{Camera, RecomputeThrottle};
use kurbo::{Point, Vec2};

fn bench_camera(c: &mut Criterion) {
    let mut group = c.benchmark_group("drift_camera");

    group.bench_function("fling_to_rest", |b| {
        b.iter(|| {
            let mut camera = Camera::default();
            let mut throttle = RecomputeThrottle::new(camera.config());
            camera.begin_drag(Point::ZERO, 0);
            for i in 1..=3 {
                camera.drag_by(Vec2::new(-250.0, 90.0), i * 16);
            }
            camera.end_drag(48);
            let mut now = 48;
            let mut passes = 0_u32;
            loop {
                let out = camera.step(now);
                throttle.record(out.travel);
                if throttle.poll(now) {
                    passes += 1;
                }
                if out.settled {
                    break;
                }
                now += 16;
            }
            black_box((camera.camera_offset(), passes))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_camera);
criterion_main!(benches);
