// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drift Preload: the all-settled barrier in front of the first reveal.
//!
//! Fetching and decoding media is the host's business. This crate only
//! describes *what* to fetch ([`AssetRequest`], usually built with
//! [`requests_for`]) and waits for *every* request to settle with
//! [`preload_all`]. A failed asset settles the barrier exactly like a loaded
//! one; it is reported in [`PreloadReport::failed`] and never retried.
//!
//! The barrier only gates the initial loading screen. Tiles that scroll into
//! view later render immediately with whatever state their media is in.
//!
//! ```
//! use drift_lattice::{Catalog, TileRecord};
//! use drift_preload::{AssetLoader, AssetRequest, LoadError, preload_all, requests_for};
//!
//! struct AlwaysOk;
//!
//! impl AssetLoader for AlwaysOk {
//!     fn load(&self, _request: &AssetRequest) -> impl Future<Output = Result<(), LoadError>> {
//!         async { Ok(()) }
//!     }
//! }
//!
//! let catalog = Catalog::new(vec![TileRecord::image(1_u64, "a.jpg")]).unwrap();
//! let report = pollster::block_on(preload_all(&AlwaysOk, &requests_for(&catalog)));
//! assert_eq!(report.loaded.len(), 1);
//! assert!(report.failed.is_empty());
//! ```

use core::fmt;

use drift_lattice::{Catalog, PLACEHOLDER_POSTER};
use futures::future::join_all;
use hashbrown::HashSet;

/// What kind of media an [`AssetRequest`] fetches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// A still image shown as the tile content.
    Image,
    /// The poster frame of a video tile.
    Poster,
}

/// A single asset to preload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetRequest {
    /// Location of the asset.
    pub url: String,
    /// Media kind.
    pub kind: AssetKind,
}

impl AssetRequest {
    /// Creates a request.
    pub fn new(url: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

/// A settled failure for one asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    /// Location of the asset that failed.
    pub url: String,
    /// Host-supplied reason.
    pub reason: String,
}

impl LoadError {
    /// Creates a load error.
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load {}: {}", self.url, self.reason)
    }
}

impl core::error::Error for LoadError {}

/// Host hook that fetches and decodes one asset.
///
/// The future must always complete; a stalled load stalls the barrier.
pub trait AssetLoader {
    /// Loads `request`, resolving once it succeeded or failed.
    fn load(&self, request: &AssetRequest) -> impl Future<Output = Result<(), LoadError>>;
}

/// Outcome of [`preload_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreloadReport {
    /// Urls that loaded, in request order.
    pub loaded: Vec<String>,
    /// Failures, in request order.
    pub failed: Vec<LoadError>,
}

impl PreloadReport {
    /// Number of settled requests.
    #[must_use]
    pub fn settled(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }

    /// Returns `true` if nothing failed.
    #[must_use]
    pub fn all_loaded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Requests needed before the first reveal of `catalog`.
///
/// Images preload their media, videos only their poster; video streams are
/// started later by the grid. Duplicate urls and the built-in placeholder
/// are skipped.
pub fn requests_for(catalog: &Catalog) -> Vec<AssetRequest> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for record in catalog.iter() {
        let (url, kind) = if record.is_video() {
            (record.poster_url(), AssetKind::Poster)
        } else {
            (record.media_url.as_str(), AssetKind::Image)
        };
        if url == PLACEHOLDER_POSTER || url.is_empty() {
            continue;
        }
        if seen.insert(url) {
            out.push(AssetRequest::new(url, kind));
        }
    }
    out
}

/// Drives every request to completion and collects the outcome.
///
/// Loads run concurrently on whatever executor polls the returned future.
pub async fn preload_all<L: AssetLoader>(loader: &L, requests: &[AssetRequest]) -> PreloadReport {
    log::debug!("preloading {} assets", requests.len());
    let results = join_all(requests.iter().map(|request| loader.load(request))).await;
    let mut report = PreloadReport::default();
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(()) => report.loaded.push(request.url.clone()),
            Err(err) => {
                log::warn!("{err}");
                report.failed.push(err);
            }
        }
    }
    log::debug!(
        "preload settled: {} loaded, {} failed",
        report.loaded.len(),
        report.failed.len()
    );
    report
}
