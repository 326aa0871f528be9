//! Barriers crossing the sweep ray
//!
//! Distance order between barriers only holds between two consecutive sweep
//! events, so nothing is kept sorted: every query rescans the active entries
//! against the current ray.

use ordered_float::OrderedFloat;

use crate::geometry::{ray_segment_intersection, Point2D, Segment};

/// Slack on the ray parameter below which a hit counts as strictly nearer
pub const OCCLUSION_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy)]
struct ActiveEntry {
    key: usize,
    segment: Segment,
}

/// Nearest barrier hit along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestHit {
    pub key: usize,
    pub point: Point2D,
    /// Ray parameter; 1.0 is the point the ray was aimed at
    pub t: f32,
}

#[derive(Debug, Default)]
pub struct ActiveSegmentIndex {
    entries: Vec<ActiveEntry>,
}

impl ActiveSegmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a barrier under `key`; re-inserting a key replaces its segment
    pub fn insert(&mut self, key: usize, segment: Segment) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.segment = segment,
            None => self.entries.push(ActiveEntry { key, segment }),
        }
    }

    pub fn remove(&mut self, key: usize) -> bool {
        match self.entries.iter().position(|e| e.key == key) {
            Some(idx) => {
                self.entries.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: usize) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Closest hit of the ray `from -> toward` over every active barrier
    pub fn nearest(&self, from: Point2D, toward: Point2D) -> Option<NearestHit> {
        self.entries
            .iter()
            .filter_map(|e| {
                ray_segment_intersection(from, toward, &e.segment).map(|hit| NearestHit {
                    key: e.key,
                    point: hit.point,
                    t: hit.t,
                })
            })
            .min_by_key(|hit| OrderedFloat(hit.t))
    }

    /// Check if an active barrier hides `point` from `from`
    ///
    /// The barrier under `own` is ignored, as is any barrier that has `point`
    /// as one of its endpoints.
    pub fn occludes(&self, from: Point2D, point: Point2D, own: usize) -> bool {
        self.entries
            .iter()
            .filter(|e| e.key != own && !e.segment.has_endpoint(point))
            .filter_map(|e| ray_segment_intersection(from, point, &e.segment))
            .any(|hit| hit.t < 1.0 - OCCLUSION_EPSILON)
    }
}
