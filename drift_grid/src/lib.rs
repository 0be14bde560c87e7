// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drift Grid: an infinite, pannable grid of media tiles.
//!
//! [`GridEngine`] ties the Drift crates together into one headless widget
//! engine:
//!
//! - pointer and touch input is recognized by `drift_event_state` as taps or
//!   drags;
//! - drags move the `drift_camera` momentum camera;
//! - each frame the camera is culled against the `drift_lattice` tile
//!   lattice, throttled by travelled distance and elapsed time;
//! - taps focus a tile through `drift_focus`, whose overlay blocks the
//!   lattice underneath until dismissed;
//! - video tiles show their poster while moving and switch to playback a
//!   short delay after the camera comes to rest (`drift_timing`);
//! - the catalog can be preloaded behind an all-settled barrier with
//!   `drift_preload`.
//!
//! Presentation is delegated to a host [`RenderSurface`] with two layers: the
//! lattice layer, translated by the camera, and an overlay layer for the
//! focused tile.
//!
//! ## Minimal example
//!
//! ```
//! use drift_event_state::gesture::{PointerId, PointerKind};
//! use drift_grid::{GridConfig, GridEngine, RecordingSurface, Viewport};
//! use drift_lattice::{Catalog, TileRecord};
//! use kurbo::Point;
//!
//! let catalog = Catalog::new(vec![
//!     TileRecord::image(1_u64, "a.jpg"),
//!     TileRecord::image(2_u64, "b.jpg"),
//!     TileRecord::video(3_u64, "c.mp4", Some("c.jpg".into())),
//! ])
//! .unwrap();
//! let mut grid = GridEngine::create(catalog, GridConfig::default(), Viewport::new(1280.0, 720.0)).unwrap();
//! let mut surface = RecordingSurface::default();
//!
//! let report = grid.frame(0, &mut surface).unwrap();
//! assert!(report.visible > 0);
//! assert_eq!(surface.tiles.len(), report.visible);
//!
//! // Drag the grid 200 pixels to the left.
//! let finger = PointerId(1);
//! grid.pointer_down(finger, PointerKind::Mouse, Point::new(600.0, 300.0), 16);
//! grid.pointer_move(finger, Point::new(400.0, 300.0), 32);
//! assert!(grid.is_dragging());
//! grid.pointer_up(finger, 48);
//!
//! let mut now = 48;
//! while !grid.frame(now, &mut surface).unwrap().settled {
//!     now += 16;
//! }
//! assert!(grid.camera_offset().x < -150.0);
//! assert_eq!(surface.camera, grid.camera_offset().round());
//! ```

mod config;
mod engine;
mod error;
pub mod render;

pub use config::GridConfig;
pub use engine::{FrameReport, GridEngine};
pub use error::EngineError;
pub use render::{OverlayTile, RecordingSurface, RenderSurface, RenderTile, TileMedia, Viewport};
