// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless grid tour.
//!
//! Loads a small catalog, preloads it through a fake loader, then flings the
//! grid, focuses the tile under the middle of the screen and dismisses it
//! again, printing what the render surface receives along the way.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p drift_demos --bin headless_tour`

use drift_event_state::gesture::{PointerId, PointerKind};
use drift_grid::{GridEngine, RecordingSurface, RenderSurface, Viewport};
use drift_preload::{AssetLoader, AssetRequest, LoadError};
use kurbo::Point;

const CATALOG: &str = r#"[
    { "id": 1, "title": "Harbor at dawn", "author": "M. Ito", "mediaUrl": "media/harbor.jpg" },
    { "id": 2, "title": "Salt flats", "mediaUrl": "media/salt.jpg" },
    { "id": 3, "title": "Night tram", "mediaUrl": "media/tram.mp4", "type": "video", "thumbnailUrl": "media/tram.jpg" },
    { "id": 4, "title": "Moss", "mediaUrl": "media/moss.jpg" },
    { "id": 5, "title": "Broken link", "mediaUrl": "media/missing.jpg" },
    { "id": "loop", "mediaUrl": "media/loop.mp4", "type": "video" }
]"#;

const FRAME_MS: u64 = 16;

struct FakeLoader;

impl AssetLoader for FakeLoader {
    fn load(&self, request: &AssetRequest) -> impl Future<Output = Result<(), LoadError>> {
        let url = request.url.clone();
        async move {
            if url.contains("missing") {
                Err(LoadError::new(url, "not found"))
            } else {
                Ok(())
            }
        }
    }
}

/// Prints overlay changes as they reach the surface.
struct Narrating {
    inner: RecordingSurface,
}

impl RenderSurface for Narrating {
    fn apply_camera(&mut self, offset: kurbo::Vec2) {
        self.inner.apply_camera(offset);
    }

    fn render_tiles(&mut self, tiles: &[drift_grid::RenderTile]) {
        let videos = tiles.iter().filter(|t| t.media.is_live_video()).count();
        println!(
            "  lattice layer: {} tiles ({videos} playing) at camera {:?}",
            tiles.len(),
            self.inner.camera
        );
        self.inner.render_tiles(tiles);
    }

    fn render_overlay(&mut self, tile: Option<&drift_grid::OverlayTile>) {
        match (tile, &self.inner.overlay) {
            (Some(t), None) => println!("  overlay: showing {} ({})", t.coord, t.label),
            (None, Some(_)) => println!("  overlay: cleared"),
            _ => {}
        }
        self.inner.render_overlay(tile);
    }
}

fn tick(grid: &mut GridEngine, surface: &mut Narrating, now: &mut u64, frames: u32) {
    for _ in 0..frames {
        *now += FRAME_MS;
        if let Err(err) = grid.frame(*now, surface) {
            log::error!("{err}");
            return;
        }
    }
}

fn run_until_settled(grid: &mut GridEngine, surface: &mut Narrating, now: &mut u64) {
    loop {
        *now += FRAME_MS;
        match grid.frame(*now, surface) {
            Ok(report) if report.settled => return,
            Ok(_) => {}
            Err(err) => {
                log::error!("{err}");
                return;
            }
        }
    }
}

fn main() {
    env_logger::init();

    let viewport = Viewport::new(1280.0, 800.0).with_device_pixel_ratio(2.0);
    let mut grid = match GridEngine::from_json(CATALOG, r#"{ "seed": 42 }"#, viewport) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("cannot start: {err}");
            return;
        }
    };
    let mut surface = Narrating {
        inner: RecordingSurface::default(),
    };

    let report = pollster::block_on(grid.preload(&FakeLoader));
    println!(
        "preloaded {} assets, {} failed; revealed: {}",
        report.loaded.len(),
        report.failed.len(),
        grid.is_revealed()
    );

    let mut now = 0;
    println!("first frame");
    if let Err(err) = grid.frame(now, &mut surface) {
        eprintln!("{err}");
        return;
    }

    println!("fling to the upper left");
    let finger = PointerId(0);
    grid.pointer_down(finger, PointerKind::Touch, Point::new(900.0, 600.0), now);
    for step in 1..=4_u32 {
        now += FRAME_MS;
        let t = f64::from(step);
        grid.pointer_move(finger, Point::new(900.0 - 60.0 * t, 600.0 - 35.0 * t), now);
    }
    grid.pointer_up(finger, now);
    run_until_settled(&mut grid, &mut surface, &mut now);
    println!("settled at {:?}", grid.camera_offset());

    // Let the video upgrade timer fire.
    tick(&mut grid, &mut surface, &mut now, 30);

    println!("tap the middle of the screen");
    let middle = viewport.rect().center();
    grid.pointer_down(finger, PointerKind::Touch, middle, now);
    match grid.pointer_up(finger, now + 40) {
        Some(event) => println!("  focus: {event:?}"),
        None => println!("  focus: nothing under the finger"),
    }
    tick(&mut grid, &mut surface, &mut now, 40);

    println!("tap again to dismiss");
    grid.pointer_down(finger, PointerKind::Touch, middle, now);
    if let Some(event) = grid.pointer_up(finger, now + 40) {
        println!("  focus: {event:?}");
    }
    tick(&mut grid, &mut surface, &mut now, 40);
    println!("focus phase: {:?}", grid.focus_phase());

    grid.destroy();
    println!("destroyed: frame -> {:?}", grid.frame(now, &mut surface).err());
}
