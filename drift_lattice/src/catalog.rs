// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile catalog: immutable records plus shuffle-without-repetition retrieval.

use core::fmt;
use core::num::NonZeroUsize;
use std::sync::Arc;

use hashbrown::HashSet;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Poster substituted for video records that arrive without a thumbnail.
pub const PLACEHOLDER_POSTER: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 1 1'><rect width='1' height='1' fill='%23202020'/></svg>";

/// Stable identifier of a catalog record.
///
/// Catalogs in the wild use either numeric or string ids, so both are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileId {
    /// Numeric id.
    Number(u64),
    /// String id.
    Text(String),
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TileId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for TileId {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

/// What kind of media a record points at.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A still image; the default when a record does not say.
    #[default]
    Image,
    /// A looping, muted video with a poster image.
    Video,
}

/// One immutable entry of the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    /// Stable id.
    pub id: TileId,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Author credit.
    #[serde(default)]
    pub author: String,
    /// Location of the image or video.
    pub media_url: String,
    /// Media discriminator.
    #[serde(default, alias = "type")]
    pub kind: MediaKind,
    /// Poster/thumbnail, required for videos.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl TileRecord {
    /// Creates an image record with empty metadata.
    pub fn image(id: impl Into<TileId>, media_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            author: String::new(),
            media_url: media_url.into(),
            kind: MediaKind::Image,
            thumbnail_url: None,
        }
    }

    /// Creates a video record with empty metadata.
    pub fn video(
        id: impl Into<TileId>,
        media_url: impl Into<String>,
        thumbnail_url: Option<String>,
    ) -> Self {
        Self {
            kind: MediaKind::Video,
            thumbnail_url,
            ..Self::image(id, media_url)
        }
    }

    /// Returns `true` for video records.
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// Image shown before the real media is live.
    ///
    /// Videos fall back to [`PLACEHOLDER_POSTER`] when the thumbnail is
    /// missing; images fall back to their own media.
    #[must_use]
    pub fn poster_url(&self) -> &str {
        match (&self.thumbnail_url, self.kind) {
            (Some(thumb), _) => thumb,
            (None, MediaKind::Video) => PLACEHOLDER_POSTER,
            (None, MediaKind::Image) => &self.media_url,
        }
    }

    /// Accessible label for the tile.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.title.is_empty(), self.author.is_empty()) {
            (false, false) => format!("{} by {}", self.title, self.author),
            (false, true) => self.title.clone(),
            _ => format!("Tile {}", self.id),
        }
    }
}

/// Errors produced while building a [`Catalog`].
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog had no records.
    Empty,
    /// The JSON document could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("catalog contains no tile records"),
            Self::Parse(err) => write!(f, "failed to parse catalog: {err}"),
        }
    }
}

impl core::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Empty => None,
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Ordered, fixed, non-empty list of tile records.
#[derive(Clone, Debug)]
pub struct Catalog {
    records: Vec<Arc<TileRecord>>,
}

impl Catalog {
    /// Builds a catalog from records, preserving their order.
    ///
    /// Contract violations that can be recovered from (a video without a
    /// thumbnail, duplicated ids) are logged and accepted.
    pub fn new(records: Vec<TileRecord>) -> Result<Self, CatalogError> {
        if records.is_empty() {
            return Err(CatalogError::Empty);
        }
        {
            let mut seen = HashSet::with_capacity(records.len());
            for record in &records {
                if record.is_video() && record.thumbnail_url.is_none() {
                    log::warn!(
                        "video tile {} has no thumbnail; using placeholder poster",
                        record.id
                    );
                }
                if !seen.insert(&record.id) {
                    log::warn!("duplicate tile id {} in catalog", record.id);
                }
            }
        }
        Ok(Self {
            records: records.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parses a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<TileRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Number of records; never zero.
    #[must_use]
    pub fn len(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.records.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Returns the record at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<TileRecord>> {
        self.records.get(index)
    }

    /// All records in catalog order.
    #[must_use]
    pub fn records(&self) -> &[Arc<TileRecord>] {
        &self.records
    }

    /// Iterates over the records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TileRecord>> {
        self.records.iter()
    }

    /// Creates a shuffle bag over this catalog seeded with `seed`.
    #[must_use]
    pub fn shuffle_bag(&self, seed: u64) -> ShuffleBag {
        ShuffleBag::new(self.len(), seed)
    }
}

/// Shuffle-without-repetition cursor over `0..len`.
///
/// Every index is handed out exactly once per epoch. When the permutation is
/// exhausted it is reshuffled and the epoch counter is bumped. With more than
/// one entry, the first index of a new epoch never repeats the last index of
/// the previous one.
#[derive(Clone, Debug)]
pub struct ShuffleBag {
    order: Vec<usize>,
    cursor: usize,
    epoch: u64,
    rng: StdRng,
}

impl ShuffleBag {
    /// Creates a bag over `0..len` with a deterministic seed.
    #[must_use]
    pub fn new(len: NonZeroUsize, seed: u64) -> Self {
        let mut bag = Self {
            order: (0..len.get()).collect(),
            cursor: 0,
            epoch: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        bag.order.shuffle(&mut bag.rng);
        bag
    }

    /// Returns the next index, reshuffling when the epoch is exhausted.
    pub fn next_index(&mut self) -> usize {
        if self.cursor >= self.order.len() {
            self.reshuffle();
        }
        let index = self.order[self.cursor];
        self.cursor += 1;
        index
    }

    /// Number of completed reshuffles.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Indices left before the next reshuffle.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.order.len() - self.cursor
    }

    fn reshuffle(&mut self) {
        let last = self.order.last().copied();
        self.order.shuffle(&mut self.rng);
        if self.order.len() > 1 && self.order.first().copied() == last {
            self.order.swap(0, 1);
        }
        self.cursor = 0;
        self.epoch += 1;
    }
}
