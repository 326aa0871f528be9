//! Visibility configuration with documented constants
//!
//! All tunable numbers of the visibility engine and the bomb commands are
//! collected here with a note on what they influence.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, VisError};
use crate::geometry::BoundingBox;
use crate::visibility::sort::SortConfig;

/// Configuration for barrier extraction, the sweep and shape selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    // === FRAME ===
    /// Distance between the scene's bounding box and the synthetic frame
    ///
    /// The frame closes the visibility polygon. It must be strictly positive
    /// so no shape sits exactly on the frame.
    pub frame_margin: f32,

    /// Frame used when the city holds no shapes
    pub empty_scene_frame: BoundingBox,

    // === SELECTION ===
    /// Tolerance added around the region's bounding box before the
    /// per-shape bounding box pre-filter
    ///
    /// Barriers that delimit the region lie exactly on its border; without
    /// this margin rounding can reject them.
    pub selection_margin: f32,

    /// Perpendicular distance of the extra probes taken around barriers
    ///
    /// A barrier that bounds the region has every point on the boundary, so
    /// probes at +/- this offset catch the side facing the observer.
    pub barrier_probe_offset: f32,

    // === SORTING ===
    /// Event sort strategy; a performance knob only, the order is identical
    pub sort: SortConfig,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            frame_margin: 10.0,
            empty_scene_frame: BoundingBox::new(Vec2::ZERO, Vec2::new(1000.0, 1000.0)),
            selection_margin: 1.0,
            barrier_probe_offset: 1.0,
            sort: SortConfig::default(),
        }
    }
}

impl VisibilityConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: VisibilityConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.frame_margin > 0.0) {
            return Err(VisError::InvalidConfig(format!(
                "frame_margin ({}) must be positive",
                self.frame_margin
            )));
        }

        if self.selection_margin < 0.0 || self.barrier_probe_offset < 0.0 {
            return Err(VisError::InvalidConfig(
                "selection_margin and barrier_probe_offset must not be negative".into(),
            ));
        }

        if self.empty_scene_frame.is_empty() {
            return Err(VisError::InvalidConfig(
                "empty_scene_frame must have min <= max on both axes".into(),
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<VisibilityConfig> = OnceLock::new();

/// Get the global visibility config (initializes with defaults if not set)
pub fn config() -> &'static VisibilityConfig {
    CONFIG.get_or_init(VisibilityConfig::default)
}

/// Set the global visibility config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: VisibilityConfig) -> std::result::Result<(), VisibilityConfig> {
    CONFIG.set(config)
}
