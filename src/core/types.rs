//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Unique identifier for city shapes
///
/// Identifiers are drawn from a single monotonic counter owned by the city,
/// so a larger id always means a later creation.
#[derive(
    Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display(fmt = "{}", _0)]
pub struct ShapeId(pub u32);

/// Axis of the chord produced when a circle becomes a barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// `h` selects horizontal; anything else is vertical
    pub fn from_flag(flag: &str) -> Self {
        if flag.starts_with('h') || flag.starts_with('H') {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// Where a text is anchored relative to its (x, y) position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Text runs right from the anchor
    #[default]
    Start,
    /// Text is centred on the anchor
    Middle,
    /// Text runs left from the anchor
    End,
}

impl TextAnchor {
    pub fn from_flag(flag: &str) -> Self {
        match flag.chars().next() {
            Some('m') | Some('M') => TextAnchor::Middle,
            Some('f') | Some('F') | Some('e') | Some('E') => TextAnchor::End,
            _ => TextAnchor::Start,
        }
    }
}
