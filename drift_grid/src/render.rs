// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-layer render contract between the engine and its host.
//!
//! The engine never touches presentation. Each frame it talks to a
//! [`RenderSurface`]:
//!
//! - the *lattice layer* receives a camera translation via
//!   [`RenderSurface::apply_camera`] and, when the visible set changed, the
//!   tiles to draw in world coordinates via [`RenderSurface::render_tiles`];
//! - the *overlay layer*, drawn above every tile, receives the focused tile
//!   in screen coordinates via [`RenderSurface::render_overlay`].
//!
//! All rectangles and offsets are snapped to the device pixel grid.

use drift_lattice::{GridTile, LatticeCoord, TileRecord};
use kurbo::{Rect, Size, Vec2};

/// Host viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Size in CSS/logical pixels.
    pub size: Size,
    /// Physical pixels per logical pixel.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Creates a viewport with a device pixel ratio of 1.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            device_pixel_ratio: 1.0,
        }
    }

    /// Sets the device pixel ratio.
    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Screen-space rectangle of the viewport.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.size.to_rect()
    }

    /// Rounds `v` to the nearest device pixel.
    ///
    /// Unusable ratios leave the value untouched.
    #[must_use]
    pub fn snap(&self, v: f64) -> f64 {
        let dpr = self.device_pixel_ratio;
        if dpr.is_finite() && dpr > 0.0 {
            (v * dpr).round() / dpr
        } else {
            v
        }
    }

    /// Snaps both components of `v`.
    #[must_use]
    pub fn snap_vec(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.snap(v.x), self.snap(v.y))
    }

    /// Snaps every edge of `rect`.
    #[must_use]
    pub fn snap_rect(&self, rect: Rect) -> Rect {
        Rect::new(
            self.snap(rect.x0),
            self.snap(rect.y0),
            self.snap(rect.x1),
            self.snap(rect.y1),
        )
    }
}

/// What a tile shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileMedia {
    /// A still image.
    Image {
        /// Image location.
        src: String,
    },
    /// The poster of a video that is not playing yet.
    Poster {
        /// Poster location.
        poster: String,
    },
    /// A looping, muted, autoplaying video with its poster as interim content.
    Video {
        /// Video location.
        src: String,
        /// Poster location.
        poster: String,
    },
}

impl TileMedia {
    /// Media for `record`; videos only play when `videos_live` is set.
    #[must_use]
    pub fn for_record(record: &TileRecord, videos_live: bool) -> Self {
        if !record.is_video() {
            return Self::Image {
                src: record.media_url.clone(),
            };
        }
        let poster = record.poster_url().to_owned();
        if videos_live {
            Self::Video {
                src: record.media_url.clone(),
                poster,
            }
        } else {
            Self::Poster { poster }
        }
    }

    /// Returns `true` for a playing video.
    #[must_use]
    pub fn is_live_video(&self) -> bool {
        matches!(self, Self::Video { .. })
    }
}

/// A tile in the lattice layer, in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderTile {
    /// Lattice slot.
    pub coord: LatticeCoord,
    /// World-space bounds.
    pub rect: Rect,
    /// Content.
    pub media: TileMedia,
    /// Accessible label.
    pub label: String,
    /// The tile is currently shown by the overlay; hosts usually hide it here.
    pub focused: bool,
}

impl RenderTile {
    pub(crate) fn new(tile: &GridTile, viewport: &Viewport, videos_live: bool, focused: bool) -> Self {
        Self {
            coord: tile.coord(),
            rect: viewport.snap_rect(tile.world_rect()),
            media: TileMedia::for_record(tile.record(), videos_live),
            label: tile.record().label(),
            focused,
        }
    }
}

/// The focused tile in the overlay layer, in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayTile {
    /// Lattice slot of the focused tile.
    pub coord: LatticeCoord,
    /// Animated screen-space bounds.
    pub rect: Rect,
    /// Content.
    pub media: TileMedia,
    /// Accessible label.
    pub label: String,
    /// Open or close progress in `0.0..=1.0`.
    pub progress: f64,
}

/// Host-implemented presentation target.
pub trait RenderSurface {
    /// Translates the lattice layer by `offset`.
    fn apply_camera(&mut self, offset: Vec2);

    /// Replaces the tiles of the lattice layer.
    fn render_tiles(&mut self, tiles: &[RenderTile]);

    /// Shows `tile` in the overlay layer, or clears it with `None`.
    fn render_overlay(&mut self, tile: Option<&OverlayTile>);
}

/// A [`RenderSurface`] that keeps the latest state of both layers.
///
/// Useful for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    /// Last camera translation.
    pub camera: Vec2,
    /// Last tile list.
    pub tiles: Vec<RenderTile>,
    /// Current overlay content.
    pub overlay: Option<OverlayTile>,
    /// Number of [`RenderSurface::render_tiles`] calls.
    pub tile_renders: usize,
}

impl RenderSurface for RecordingSurface {
    fn apply_camera(&mut self, offset: Vec2) {
        self.camera = offset;
    }

    fn render_tiles(&mut self, tiles: &[RenderTile]) {
        self.tiles = tiles.to_vec();
        self.tile_renders += 1;
    }

    fn render_overlay(&mut self, tile: Option<&OverlayTile>) {
        self.overlay = tile.cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_follows_the_device_pixel_grid() {
        let vp = Viewport::new(100.0, 100.0).with_device_pixel_ratio(2.0);
        assert_eq!(vp.snap(10.3), 10.5);
        assert_eq!(vp.snap(-10.2), -10.0);
        let broken = Viewport::new(100.0, 100.0).with_device_pixel_ratio(0.0);
        assert_eq!(broken.snap(10.3), 10.3);
    }

    #[test]
    fn videos_show_posters_until_live() {
        let video = TileRecord::video(1_u64, "v.mp4", Some("v.jpg".into()));
        assert_eq!(
            TileMedia::for_record(&video, false),
            TileMedia::Poster {
                poster: "v.jpg".into()
            }
        );
        assert!(TileMedia::for_record(&video, true).is_live_video());
        let image = TileRecord::image(2_u64, "i.jpg");
        assert_eq!(
            TileMedia::for_record(&image, true),
            TileMedia::Image { src: "i.jpg".into() }
        );
    }
}
