use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Segment;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The empty box: min at +inf, max at -inf, so any union replaces it
    pub fn empty() -> Self {
        Self {
            min: Vec2::splat(f32::INFINITY),
            max: Vec2::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Vec2]) -> Self {
        let mut bbox = Self::empty();
        for &p in points {
            bbox.include_point(p);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn include_point(&mut self, p: Vec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> BoundingBox {
        BoundingBox {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Closed-interval overlap test; touching boxes intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    /// Strict containment: `other` lies inside without touching the border
    pub fn strictly_contains(&self, other: &BoundingBox) -> bool {
        other.min.x > self.min.x
            && other.min.y > self.min.y
            && other.max.x < self.max.x
            && other.max.y < self.max.y
    }

    /// Edges wound top, right, bottom, left (screen coordinates, y down)
    pub fn edges(&self) -> [Segment; 4] {
        let top_left = self.min;
        let top_right = Vec2::new(self.max.x, self.min.y);
        let bottom_right = self.max;
        let bottom_left = Vec2::new(self.min.x, self.max.y);
        [
            Segment::new(top_left, top_right),
            Segment::new(top_right, bottom_right),
            Segment::new(bottom_right, bottom_left),
            Segment::new(bottom_left, top_left),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
