// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lattice coordinates, positioned tiles and the tile cache.

use core::fmt;
use std::rc::Rc;
use std::sync::Arc;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ShuffleBag, TileRecord};
use crate::layout::TileDimensions;

/// Integer slot of the infinite lattice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeCoord {
    /// Column, growing to the right.
    pub col: i32,
    /// Row, growing downwards.
    pub row: i32,
}

impl LatticeCoord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for LatticeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.col, self.row)
    }
}

/// Returns `true` if column `col` is shifted down by the zigzag offset.
///
/// The alternation uses the absolute value so it keeps period two through
/// zero and across negative columns.
#[must_use]
pub fn is_offset_column(col: i32) -> bool {
    col.unsigned_abs() % 2 == 0
}

/// How catalog entries are assigned to lattice slots.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentAssignment {
    /// Draw from a shuffle bag in resolution order.
    ///
    /// Avoids visible repetition patterns, but the record a slot receives
    /// depends on the order slots are first resolved in.
    #[default]
    Sequential,
    /// Hash the coordinate: `|col * 31 + row * 17| mod len`.
    ///
    /// Order-independent, at the cost of regular repeats.
    Hashed,
}

/// A resolved, positioned tile.
#[derive(Clone, Debug, PartialEq)]
pub struct GridTile {
    coord: LatticeCoord,
    world: Rect,
    record: Arc<TileRecord>,
}

impl GridTile {
    /// Lattice slot of this tile.
    #[must_use]
    pub fn coord(&self) -> LatticeCoord {
        self.coord
    }

    /// Identity key, `"{col}-{row}"`.
    #[must_use]
    pub fn key(&self) -> String {
        self.coord.to_string()
    }

    /// World-space X of the top-left corner.
    #[must_use]
    pub fn world_x(&self) -> f64 {
        self.world.x0
    }

    /// World-space Y of the top-left corner.
    #[must_use]
    pub fn world_y(&self) -> f64 {
        self.world.y0
    }

    /// Tile width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.world.width()
    }

    /// Tile height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.world.height()
    }

    /// World-space bounds.
    #[must_use]
    pub fn world_rect(&self) -> Rect {
        self.world
    }

    /// Catalog record shown in this slot.
    #[must_use]
    pub fn record(&self) -> &Arc<TileRecord> {
        &self.record
    }
}

/// Infinite lattice of tiles with a lazily filled cache.
///
/// [`TileLattice::resolve`] hands out shared handles; a coordinate that is
/// already cached returns the same allocation every time, so consumers can
/// compare tiles with [`Rc::ptr_eq`] to skip redundant work. The cache lives
/// until the dimensions change, at which point it is dropped wholesale.
#[derive(Debug)]
pub struct TileLattice {
    catalog: Catalog,
    dims: TileDimensions,
    assignment: ContentAssignment,
    bag: ShuffleBag,
    cache: HashMap<LatticeCoord, Rc<GridTile>>,
    generation: u64,
}

impl TileLattice {
    /// Creates a lattice over `catalog` with the given dimensions.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        dims: TileDimensions,
        assignment: ContentAssignment,
        seed: u64,
    ) -> Self {
        let bag = catalog.shuffle_bag(seed);
        Self {
            catalog,
            dims,
            assignment,
            bag,
            cache: HashMap::new(),
            generation: 0,
        }
    }

    /// Current tile dimensions.
    #[must_use]
    pub fn dimensions(&self) -> TileDimensions {
        self.dims
    }

    /// The catalog tiles are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Assignment strategy in use.
    #[must_use]
    pub fn assignment(&self) -> ContentAssignment {
        self.assignment
    }

    /// Bumped every time the cache is cleared.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of reshuffles of the sequential assignment bag.
    #[must_use]
    pub fn shuffle_epoch(&self) -> u64 {
        self.bag.epoch()
    }

    /// Number of cached tiles.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Replaces the dimensions, clearing the cache if they changed.
    ///
    /// Returns `true` if the cache was cleared.
    pub fn set_dimensions(&mut self, dims: TileDimensions) -> bool {
        if self.dims == dims {
            return false;
        }
        self.dims = dims;
        self.clear_cache();
        true
    }

    /// Drops every cached tile.
    pub fn clear_cache(&mut self) {
        log::debug!(
            "clearing {} cached tiles (generation {})",
            self.cache.len(),
            self.generation
        );
        self.cache.clear();
        self.generation += 1;
    }

    /// World-space top-left corner of `coord`.
    #[must_use]
    pub fn world_origin(&self, coord: LatticeCoord) -> Point {
        let x = f64::from(coord.col) * self.dims.spacing_x();
        let mut y = f64::from(coord.row) * self.dims.spacing_y();
        if is_offset_column(coord.col) {
            y += self.dims.zigzag();
        }
        Point::new(x, y)
    }

    /// World-space bounds of `coord`, cached or not.
    #[must_use]
    pub fn tile_rect(&self, coord: LatticeCoord) -> Rect {
        Rect::from_origin_size(self.world_origin(coord), self.dims.size())
    }

    /// Returns the cached tile for `coord` without resolving it.
    #[must_use]
    pub fn peek(&self, coord: LatticeCoord) -> Option<&Rc<GridTile>> {
        self.cache.get(&coord)
    }

    /// Lattice slot whose tile contains the world point `world`, if any.
    ///
    /// Pure geometry: points in the gaps between tiles hit nothing, and the
    /// cache is not consulted.
    #[must_use]
    pub fn coord_at(&self, world: Point) -> Option<LatticeCoord> {
        if !world.is_finite() {
            return None;
        }
        let col = checked_index((world.x / self.dims.spacing_x()).floor())?;
        let shift = if is_offset_column(col) {
            self.dims.zigzag()
        } else {
            0.0
        };
        let row = checked_index(((world.y - shift) / self.dims.spacing_y()).floor())?;
        let coord = LatticeCoord::new(col, row);
        self.tile_rect(coord).contains(world).then_some(coord)
    }

    /// Places `record` at `coord` for the current generation.
    ///
    /// Replaces any cached tile there. Used to keep a slot's content across a
    /// cache clear.
    pub fn pin(&mut self, coord: LatticeCoord, record: Arc<TileRecord>) -> Rc<GridTile> {
        let tile = Rc::new(GridTile {
            coord,
            world: self.tile_rect(coord),
            record,
        });
        self.cache.insert(coord, Rc::clone(&tile));
        tile
    }

    /// Resolves `coord` to a positioned tile, creating and caching it on first use.
    pub fn resolve(&mut self, coord: LatticeCoord) -> Rc<GridTile> {
        if let Some(tile) = self.cache.get(&coord) {
            return Rc::clone(tile);
        }
        let index = self.next_content_index(coord);
        let record = match self.catalog.get(index) {
            Some(record) => Arc::clone(record),
            // Indices always come from `0..len`; fall back to the first record.
            None => Arc::clone(&self.catalog.records()[0]),
        };
        let tile = Rc::new(GridTile {
            coord,
            world: self.tile_rect(coord),
            record,
        });
        self.cache.insert(coord, Rc::clone(&tile));
        tile
    }

    fn next_content_index(&mut self, coord: LatticeCoord) -> usize {
        match self.assignment {
            ContentAssignment::Sequential => self.bag.next_index(),
            ContentAssignment::Hashed => hashed_index(coord, self.catalog.len().get()),
        }
    }
}

fn checked_index(value: f64) -> Option<i32> {
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Range-checked, already-floored lattice index"
    )]
    let index = value as i32;
    Some(index)
}

fn hashed_index(coord: LatticeCoord, len: usize) -> usize {
    let seed = (i64::from(coord.col) * 31 + i64::from(coord.row) * 17).unsigned_abs();
    let len = len as u64;
    usize::try_from(seed % len).unwrap_or(0)
}
