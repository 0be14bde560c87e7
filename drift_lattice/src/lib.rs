// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drift Lattice: an infinite, deterministic tile lattice with viewport culling.
//!
//! This crate maps an unbounded integer lattice onto a 2D world plane and
//! assigns catalog content to each slot. It is headless: it computes
//! positions and tile handles, and leaves presentation to the caller.
//!
//! The core concepts are:
//!
//! - [`Catalog`]: an ordered, non-empty list of [`TileRecord`]s, loadable from
//!   JSON, with a [`ShuffleBag`] for shuffle-without-repetition retrieval.
//! - [`LayoutConfig`]: desktop/mobile presets that derive [`TileDimensions`]
//!   from the viewport size.
//! - [`TileLattice`]: resolves a [`LatticeCoord`] to a cached, positioned
//!   [`GridTile`]. Alternate columns are shifted down by half a row
//!   ([`is_offset_column`]), producing a zigzag stagger.
//! - [`compute_visible`]: culls the lattice against a buffered viewport and
//!   returns a [`VisibleSet`] in row-major order.
//!
//! ## Minimal example
//!
//! ```rust
//! use drift_lattice::{
//!     Catalog, ContentAssignment, TileDimensions, TileLattice, TileRecord, compute_visible,
//! };
//! use kurbo::{Size, Vec2};
//!
//! let catalog = Catalog::new(vec![
//!     TileRecord::image(1_u64, "a.jpg"),
//!     TileRecord::image(2_u64, "b.jpg"),
//! ])
//! .unwrap();
//! let dims = TileDimensions::new(300.0, 400.0, 20.0).unwrap();
//! let mut lattice = TileLattice::new(catalog, dims, ContentAssignment::Sequential, 7);
//!
//! let visible = compute_visible(&mut lattice, Vec2::ZERO, Size::new(1280.0, 720.0), 500.0);
//! assert!(!visible.is_empty());
//!
//! // Re-resolving a visible slot returns the very same tile.
//! let first = &visible.tiles()[0];
//! let again = lattice.resolve(first.coord());
//! assert!(std::rc::Rc::ptr_eq(first, &again));
//! ```
//!
//! ## Content assignment
//!
//! With [`ContentAssignment::Sequential`] (the default) content is drawn from
//! the shuffle bag in the order slots are first resolved, and is then locked
//! in by the cache. Two runs that traverse the lattice in the same order
//! produce identical assignments; a different traversal order produces a
//! different, equally valid one. [`ContentAssignment::Hashed`] trades
//! variety for order independence.

mod catalog;
mod cull;
mod lattice;
mod layout;

pub use catalog::{
    Catalog, CatalogError, MediaKind, PLACEHOLDER_POSTER, ShuffleBag, TileId, TileRecord,
};
pub use cull::{
    CoordRange, DEFAULT_CULL_BUFFER, MAX_CULL_BUFFER, VisibleSet, compute_visible,
    expanded_view_rect, lattice_bounds, overlaps,
};
pub use lattice::{ContentAssignment, GridTile, LatticeCoord, TileLattice, is_offset_column};
pub use layout::{LayoutConfig, LayoutError, LayoutPreset, TileDimensions};
