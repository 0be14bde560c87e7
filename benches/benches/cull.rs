// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use drift_lattice::{
    Catalog, ContentAssignment, DEFAULT_CULL_BUFFER, LatticeCoord, TileDimensions, TileLattice,
    TileRecord, compute_visible,
};
use kurbo::{Size, Vec2};

fn lattice(assignment: ContentAssignment) -> TileLattice {
    let records = (0..64_u64)
        .map(|i| TileRecord::image(i, format!("media/{i}.jpg")))
        .collect();
    let catalog = Catalog::new(records).expect("non-empty catalog");
    let dims = TileDimensions::new(246.0, 307.0, 24.0).expect("valid dimensions");
    TileLattice::new(catalog, dims, assignment, 0xD21F_7000_0000_0001)
}

fn bench_cull(c: &mut Criterion) {
    let mut group = c.benchmark_group("drift_cull");
    group.sample_size(50);

    for &(w, h) in &[(1280.0, 720.0), (1920.0, 1080.0), (3840.0, 2160.0)] {
        let viewport = Size::new(w, h);

        group.bench_function(format!("cold({w}x{h})"), |b| {
            b.iter_batched(
                || lattice(ContentAssignment::Sequential),
                |mut lattice| {
                    let visible =
                        compute_visible(&mut lattice, Vec2::ZERO, viewport, DEFAULT_CULL_BUFFER);
                    black_box(visible);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("warm({w}x{h})"), |b| {
            let mut lattice = lattice(ContentAssignment::Sequential);
            let _ = compute_visible(&mut lattice, Vec2::ZERO, viewport, DEFAULT_CULL_BUFFER);
            b.iter(|| {
                black_box(compute_visible(
                    &mut lattice,
                    Vec2::ZERO,
                    viewport,
                    DEFAULT_CULL_BUFFER,
                ))
            });
        });

        // A long pan keeps resolving fresh slots.
        group.bench_function(format!("pan_200_steps({w}x{h})"), |b| {
            b.iter_batched(
                || lattice(ContentAssignment::Sequential),
                |mut lattice| {
                    for step in 0..200 {
                        let offset = Vec2::new(-f64::from(step) * 37.0, f64::from(step) * 11.0);
                        black_box(compute_visible(
                            &mut lattice,
                            offset,
                            viewport,
                            DEFAULT_CULL_BUFFER,
                        ));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("drift_resolve");

    for assignment in [ContentAssignment::Sequential, ContentAssignment::Hashed] {
        group.bench_function(format!("{assignment:?}_64x64"), |b| {
            b.iter_batched(
                || lattice(assignment),
                |mut lattice| {
                    for row in -32..32 {
                        for col in -32..32 {
                            black_box(lattice.resolve(LatticeCoord::new(col, row)));
                        }
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cull, bench_resolve);
criterion_main!(benches);
