// Copyright 2025 the Drift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile dimensions derived from the viewport.

use core::fmt;

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Sizing rule for one device class.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPreset {
    /// Tile height is the viewport height divided by this.
    pub height_divisor: f64,
    /// Gap between tiles as a fraction of the tile height.
    pub gap_ratio: f64,
}

impl LayoutPreset {
    /// Preset used at or above the mobile breakpoint.
    pub const DESKTOP: Self = Self {
        height_divisor: 2.6,
        gap_ratio: 0.08,
    };

    /// Preset used below the mobile breakpoint.
    pub const MOBILE: Self = Self {
        height_divisor: 3.2,
        gap_ratio: 0.06,
    };
}

impl Default for LayoutPreset {
    fn default() -> Self {
        Self::DESKTOP
    }
}

/// Layout configuration: two presets selected by a width breakpoint.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Preset for wide viewports.
    pub desktop: LayoutPreset,
    /// Preset for narrow viewports.
    pub mobile: LayoutPreset,
    /// Viewports narrower than this use the mobile preset.
    pub mobile_breakpoint: f64,
    /// Fixed `width / height` ratio of every tile.
    pub aspect_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            desktop: LayoutPreset::DESKTOP,
            mobile: LayoutPreset::MOBILE,
            mobile_breakpoint: 768.0,
            aspect_ratio: 0.8,
        }
    }
}

impl LayoutConfig {
    /// Returns the preset that applies to a viewport `width` pixels wide.
    #[must_use]
    pub fn preset_for(&self, width: f64) -> &LayoutPreset {
        if width < self.mobile_breakpoint {
            &self.mobile
        } else {
            &self.desktop
        }
    }

    /// Derives tile dimensions for `viewport`.
    pub fn dimensions(&self, viewport: Size) -> Result<TileDimensions, LayoutError> {
        if !(viewport.width.is_finite() && viewport.height.is_finite())
            || viewport.width <= 0.0
            || viewport.height <= 0.0
        {
            return Err(LayoutError::NonPositiveViewport);
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(LayoutError::InvalidPreset("aspect_ratio"));
        }
        let preset = self.preset_for(viewport.width);
        if !(preset.height_divisor.is_finite() && preset.height_divisor > 0.0) {
            return Err(LayoutError::InvalidPreset("height_divisor"));
        }
        if !(preset.gap_ratio.is_finite() && preset.gap_ratio >= 0.0) {
            return Err(LayoutError::InvalidPreset("gap_ratio"));
        }
        let height = viewport.height / preset.height_divisor;
        TileDimensions::new(
            height * self.aspect_ratio,
            height,
            height * preset.gap_ratio,
        )
    }
}

/// Errors produced while deriving tile dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The viewport had a zero, negative or non-finite extent.
    NonPositiveViewport,
    /// A configuration field held an unusable value.
    InvalidPreset(&'static str),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveViewport => f.write_str("viewport must have a positive finite size"),
            Self::InvalidPreset(field) => write!(f, "layout field `{field}` is out of range"),
        }
    }
}

impl core::error::Error for LayoutError {}

/// Resolved tile width, height and gap in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileDimensions {
    width: f64,
    height: f64,
    gap: f64,
}

impl TileDimensions {
    /// Creates dimensions from explicit values.
    pub fn new(width: f64, height: f64, gap: f64) -> Result<Self, LayoutError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(LayoutError::InvalidPreset("width"));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(LayoutError::InvalidPreset("height"));
        }
        if !(gap.is_finite() && gap >= 0.0) {
            return Err(LayoutError::InvalidPreset("gap"));
        }
        Ok(Self { width, height, gap })
    }

    /// Tile width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Tile height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Gap between neighbors.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Tile size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Horizontal distance between column origins.
    #[must_use]
    pub fn spacing_x(&self) -> f64 {
        self.width + self.gap
    }

    /// Vertical distance between row origins.
    #[must_use]
    pub fn spacing_y(&self) -> f64 {
        self.height + self.gap
    }

    /// Vertical shift applied to offset columns.
    #[must_use]
    pub fn zigzag(&self) -> f64 {
        self.spacing_y() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_selects_preset() {
        let config = LayoutConfig::default();
        assert_eq!(*config.preset_for(767.0), LayoutPreset::MOBILE);
        assert_eq!(*config.preset_for(768.0), LayoutPreset::DESKTOP);
    }

    #[test]
    fn dimensions_follow_viewport_height() {
        let config = LayoutConfig::default();
        let dims = config.dimensions(Size::new(1300.0, 1040.0)).unwrap();
        assert!((dims.height() - 400.0).abs() < 1e-9);
        assert!((dims.width() - 320.0).abs() < 1e-9);
        assert!((dims.gap() - 32.0).abs() < 1e-9);
        assert!((dims.spacing_y() - 432.0).abs() < 1e-9);
        assert!((dims.zigzag() - 216.0).abs() < 1e-9);
    }

    #[test]
    fn aspect_ratio_is_fixed_across_presets() {
        let config = LayoutConfig::default();
        for size in [Size::new(375.0, 812.0), Size::new(1920.0, 1080.0)] {
            let dims = config.dimensions(size).unwrap();
            assert!((dims.width() / dims.height() - config.aspect_ratio).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let config = LayoutConfig::default();
        assert_eq!(
            config.dimensions(Size::new(0.0, 600.0)),
            Err(LayoutError::NonPositiveViewport)
        );
        assert_eq!(
            config.dimensions(Size::new(800.0, f64::NAN)),
            Err(LayoutError::NonPositiveViewport)
        );
        let broken = LayoutConfig {
            aspect_ratio: 0.0,
            ..LayoutConfig::default()
        };
        assert_eq!(
            broken.dimensions(Size::new(800.0, 600.0)),
            Err(LayoutError::InvalidPreset("aspect_ratio"))
        );
        assert!(TileDimensions::new(10.0, 10.0, -1.0).is_err());
    }
}
