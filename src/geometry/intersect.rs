use glam::Vec2;

use super::{Segment, PARALLEL_EPSILON, PARAM_EPSILON};

/// Where a ray meets a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter; 1.0 is the point the ray was aimed at
    pub t: f32,
    /// Segment parameter in [0, 1]
    pub s: f32,
    pub point: Vec2,
}

/// Intersect the ray `from -> toward` (extended past `toward`) with a segment
///
/// Solves the 2x2 system `from + t * d = start + s * (end - start)`.
/// Returns `None` when the ray and segment are parallel, when the hit lies
/// off the segment (`s` outside [0, 1]) or behind the ray origin (`t < 0`).
pub fn ray_segment_intersection(from: Vec2, toward: Vec2, segment: &Segment) -> Option<RayHit> {
    let d = toward - from;
    let rel = segment.start - from;
    let seg_d = segment.direction();

    let det = seg_d.x * d.y - seg_d.y * d.x;
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let s = (d.x * rel.y - d.y * rel.x) / det;
    let t = (seg_d.x * rel.y - seg_d.y * rel.x) / det;

    if s < -PARAM_EPSILON || s > 1.0 + PARAM_EPSILON || t < -PARAM_EPSILON {
        return None;
    }

    let s = s.clamp(0.0, 1.0);
    Some(RayHit {
        t: t.max(0.0),
        s,
        point: segment.start + seg_d * s,
    })
}

/// Intersection point of two closed segments, if they cross or touch
pub fn segment_intersection(a: &Segment, b: &Segment) -> Option<Vec2> {
    let r = a.direction();
    let q = b.direction();
    let denom = r.perp_dot(q);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let diff = b.start - a.start;
    let t = diff.perp_dot(q) / denom;
    let u = diff.perp_dot(r) / denom;

    let range = -PARAM_EPSILON..=1.0 + PARAM_EPSILON;
    if range.contains(&t) && range.contains(&u) {
        Some(a.start + r * t)
    } else {
        None
    }
}
