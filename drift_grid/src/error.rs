// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use drift_lattice::{CatalogError, LayoutError};

/// Errors reported by [`GridEngine`](crate::GridEngine).
#[derive(Debug)]
pub enum EngineError {
    /// The catalog could not be built.
    Catalog(CatalogError),
    /// Tile dimensions could not be derived from the viewport.
    Layout(LayoutError),
    /// The config document could not be parsed.
    Config(serde_json::Error),
    /// The cull buffer is negative, too large or not a number.
    CullBuffer(f64),
    /// The engine was used after [`GridEngine::destroy`](crate::GridEngine::destroy).
    Destroyed,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "invalid catalog: {err}"),
            Self::Layout(err) => write!(f, "invalid layout: {err}"),
            Self::Config(err) => write!(f, "invalid grid config: {err}"),
            Self::CullBuffer(buffer) => write!(
                f,
                "cull buffer {buffer} is outside 0..={}",
                drift_lattice::MAX_CULL_BUFFER
            ),
            Self::Destroyed => f.write_str("grid engine has been destroyed"),
        }
    }
}

impl core::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::CullBuffer(_) | Self::Destroyed => None,
        }
    }
}

impl From<CatalogError> for EngineError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<LayoutError> for EngineError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}
