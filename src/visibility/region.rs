//! The visibility polygon around an observer

use geo::{Area, LineString, Polygon};
use serde::{Deserialize, Serialize};

use crate::geometry::{cross, point_in_ring, points_coincide, BoundingBox, Point2D, Segment, POINT_EPSILON};

/// Closed boundary of everything an observer can see
///
/// Stored as a ring of vertices; boundary segment `i` runs from vertex `i`
/// to vertex `i + 1`, the last one closing back to vertex 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityRegion {
    pub observer: Point2D,
    vertices: Vec<Point2D>,
}

impl VisibilityRegion {
    /// Build a region from a chain of boundary segments
    ///
    /// Coincident vertices are merged and vertices lying on the line through
    /// their neighbours are dropped, which also removes zero-width spikes.
    pub fn from_segments(observer: Point2D, segments: &[Segment]) -> Self {
        let ring: Vec<Point2D> = segments.iter().map(|s| s.start).collect();
        Self::from_ring(observer, ring)
    }

    pub fn from_ring(observer: Point2D, mut ring: Vec<Point2D>) -> Self {
        simplify_ring(&mut ring);
        Self {
            observer,
            vertices: ring,
        }
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Boundary segments in ring order; the last ends at the first's start
    pub fn segments(&self) -> Vec<Segment> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
            .collect()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::from_points(&self.vertices);
        bbox.include_point(self.observer);
        bbox
    }

    /// Check if `p` is visible: inside the ring or at the observer itself
    pub fn contains(&self, p: Point2D) -> bool {
        points_coincide(p, self.observer) || point_in_ring(p, &self.vertices)
    }

    pub fn area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let exterior: LineString<f64> = self
            .vertices
            .iter()
            .map(|v| (v.x as f64, v.y as f64))
            .collect::<Vec<_>>()
            .into();
        Polygon::new(exterior, vec![]).unsigned_area()
    }
}

fn simplify_ring(ring: &mut Vec<Point2D>) {
    loop {
        let before = ring.len();

        ring.dedup_by(|a, b| points_coincide(*a, *b));
        while ring.len() > 1 && points_coincide(ring[0], ring[ring.len() - 1]) {
            ring.pop();
        }

        if ring.len() >= 3 {
            let n = ring.len();
            if let Some(idx) = (0..n).find(|&i| {
                let prev = ring[(i + n - 1) % n];
                let next = ring[(i + 1) % n];
                is_redundant(prev, ring[i], next)
            }) {
                ring.remove(idx);
            }
        }

        if ring.len() == before || ring.len() < 3 {
            break;
        }
    }
}

/// `v` adds nothing to the outline when it lies on the line prev -> next
fn is_redundant(prev: Point2D, v: Point2D, next: Point2D) -> bool {
    let base = prev.distance(next);
    if base <= POINT_EPSILON {
        return true;
    }
    (cross(prev, v, next) / base).abs() <= POINT_EPSILON
}
