// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport culling over the lattice.
//!
//! Culling is two-phase. The buffered viewport rectangle is first converted
//! into a conservative rectangular range of lattice coordinates; every slot in
//! that range is resolved in row-major order and then kept only if its
//! world-space bounds actually overlap the buffered rectangle.

use core::ops::RangeInclusive;
use std::rc::Rc;

use kurbo::{Point, Rect, Size, Vec2};

use crate::lattice::{GridTile, LatticeCoord, TileLattice};
use crate::layout::TileDimensions;

/// Default margin, in pixels, added around the viewport before culling.
pub const DEFAULT_CULL_BUFFER: f64 = 500.0;

/// Largest cull margin accepted by hosts that take it from configuration.
pub const MAX_CULL_BUFFER: f64 = 10_000.0;

/// Inclusive range of lattice coordinates that may intersect a rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordRange {
    /// Candidate columns.
    pub cols: RangeInclusive<i32>,
    /// Candidate rows.
    pub rows: RangeInclusive<i32>,
}

impl CoordRange {
    /// Iterates the range in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = LatticeCoord> + '_ {
        self.rows
            .clone()
            .flat_map(move |row| self.cols.clone().map(move |col| LatticeCoord::new(col, row)))
    }

    /// Number of coordinates in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        span(&self.cols).saturating_mul(span(&self.rows))
    }

    /// Returns `true` if the range holds no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn span(range: &RangeInclusive<i32>) -> usize {
    if range.is_empty() {
        return 0;
    }
    usize::try_from(i64::from(*range.end()) - i64::from(*range.start()) + 1).unwrap_or(0)
}

/// World-space rectangle covered by the viewport plus `buffer` on every side.
///
/// The camera offset is the translation applied to world content, so the
/// viewport's world-space origin is `-camera_offset`.
#[must_use]
pub fn expanded_view_rect(camera_offset: Vec2, viewport: Size, buffer: f64) -> Rect {
    let origin = Point::new(-camera_offset.x, -camera_offset.y);
    Rect::from_origin_size(origin, viewport).inflate(buffer, buffer)
}

/// Lattice coordinates whose tiles may overlap `rect`.
///
/// Columns use `floor(left / spacing_x) ..= ceil(right / spacing_x)`. The
/// row lower bound first subtracts the zigzag so that an offset column's
/// tile hanging down from the row above is still a candidate.
#[must_use]
pub fn lattice_bounds(dims: &TileDimensions, rect: Rect) -> CoordRange {
    let sx = dims.spacing_x();
    let sy = dims.spacing_y();
    let col0 = to_index((rect.x0 / sx).floor());
    let col1 = to_index((rect.x1 / sx).ceil());
    let row0 = to_index(((rect.y0 - dims.zigzag()) / sy).floor());
    let row1 = to_index((rect.y1 / sy).ceil());
    CoordRange {
        cols: col0..=col1,
        rows: row0..=row1,
    }
}

fn to_index(value: f64) -> i32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Saturating conversion of an already-rounded lattice bound"
    )]
    {
        value as i32
    }
}

/// Strict overlap: rectangles that only share an edge do not intersect.
#[must_use]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Tiles that can be visible for the given camera and viewport.
///
/// Non-finite camera offsets or viewport sizes produce an empty set.
pub fn compute_visible(
    lattice: &mut TileLattice,
    camera_offset: Vec2,
    viewport: Size,
    buffer: f64,
) -> VisibleSet {
    if !camera_offset.is_finite() || !viewport.is_finite() || !buffer.is_finite() {
        log::warn!("skipping culling pass for non-finite camera or viewport");
        return VisibleSet::default();
    }
    let rect = expanded_view_rect(camera_offset, viewport, buffer);
    let range = lattice_bounds(&lattice.dimensions(), rect);
    let mut tiles = Vec::with_capacity(range.len());
    for coord in range.iter() {
        // Cheap geometric check first; resolving assigns content.
        if overlaps(lattice.tile_rect(coord), rect) {
            tiles.push(lattice.resolve(coord));
        }
    }
    VisibleSet { tiles }
}

/// Result of a culling pass, in row-major order.
#[derive(Clone, Debug, Default)]
pub struct VisibleSet {
    tiles: Vec<Rc<GridTile>>,
}

impl VisibleSet {
    /// Visible tiles.
    #[must_use]
    pub fn tiles(&self) -> &[Rc<GridTile>] {
        &self.tiles
    }

    /// Number of visible tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterates the visible tiles.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<GridTile>> {
        self.tiles.iter()
    }

    /// Cheap change detection against a previous pass.
    ///
    /// Two sets are treated as equivalent when they have the same length and
    /// the same first and last tile allocation. This can miss a change in the
    /// middle of the set; callers use it to skip redundant work only.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        if self.tiles.len() != other.tiles.len() {
            return false;
        }
        let same = |a: Option<&Rc<GridTile>>, b: Option<&Rc<GridTile>>| match (a, b) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same(self.tiles.first(), other.tiles.first()) && same(self.tiles.last(), other.tiles.last())
    }

    /// Finds a visible tile by coordinate.
    #[must_use]
    pub fn get(&self, coord: LatticeCoord) -> Option<&Rc<GridTile>> {
        self.tiles.iter().find(|tile| tile.coord() == coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_ranges_saturate_their_length() {
        let range = CoordRange {
            cols: i32::MIN..=i32::MAX,
            rows: i32::MIN..=i32::MAX,
        };
        assert_eq!(range.len(), usize::MAX);
        assert!(!range.is_empty());
    }

    #[test]
    fn expanded_rect_is_negated_camera_plus_buffer() {
        let rect = expanded_view_rect(Vec2::new(100.0, -50.0), Size::new(800.0, 600.0), 10.0);
        assert_eq!(rect, Rect::new(-110.0, 40.0, 710.0, 660.0));
    }

    #[test]
    fn bounds_floor_and_ceil_columns() {
        let dims = TileDimensions::new(540.0, 540.0, 60.0).unwrap();
        let rect = expanded_view_rect(Vec2::ZERO, Size::new(1000.0, 800.0), 500.0);
        let range = lattice_bounds(&dims, rect);
        assert_eq!(range.cols, -1..=3);
        // floor((-500 - 300) / 600) = -2, ceil(1300 / 600) = 3
        assert_eq!(range.rows, -2..=3);
        assert_eq!(range.len(), 30);
        let first: Vec<_> = range.iter().take(2).collect();
        assert_eq!(first, vec![LatticeCoord::new(-1, -2), LatticeCoord::new(0, -2)]);
    }

    #[test]
    fn overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(a, Rect::new(9.0, 9.0, 20.0, 20.0)));
        assert!(!overlaps(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn empty_range_len() {
        let range = CoordRange {
            cols: 3..=2,
            rows: 0..=4,
        };
        assert!(range.is_empty());
        assert_eq!(range.iter().count(), 0);
    }
}
