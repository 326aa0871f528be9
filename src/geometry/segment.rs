use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{points_coincide, BoundingBox};

/// Oriented line segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    /// Zero-length segments carry no direction and block nothing
    pub fn is_degenerate(&self) -> bool {
        points_coincide(self.start, self.end)
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// Unit normal (left of the direction), or `None` for degenerate segments
    pub fn unit_normal(&self) -> Option<Vec2> {
        self.direction().perp().try_normalize()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&[self.start, self.end])
    }

    /// Distance from `p` to the closest point of the segment
    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        let d = self.direction();
        let len_sq = d.length_squared();
        if len_sq <= f32::EPSILON {
            return p.distance(self.start);
        }
        let t = ((p - self.start).dot(d) / len_sq).clamp(0.0, 1.0);
        p.distance(self.start + d * t)
    }

    /// Check if `p` is one of the two endpoints
    pub fn has_endpoint(&self, p: Vec2) -> bool {
        points_coincide(self.start, p) || points_coincide(self.end, p)
    }
}
