//! Geometry kernel: points, oriented segments, bounding boxes,
//! intersection routines and the point-in-polygon test

mod bbox;
mod intersect;
mod polygon;
mod segment;

pub use bbox::BoundingBox;
pub use intersect::{ray_segment_intersection, segment_intersection, RayHit};
pub use polygon::point_in_ring;
pub use segment::Segment;

use glam::Vec2;

/// A position in the plane
pub type Point2D = Vec2;

/// Distance under which two points are treated as the same vertex
pub const POINT_EPSILON: f32 = 1e-3;

/// Determinant magnitude under which a ray and a segment are parallel
pub const PARALLEL_EPSILON: f32 = 1e-9;

/// Slack on the segment parameter so endpoint hits survive rounding
pub const PARAM_EPSILON: f32 = 1e-5;

/// Check if two points coincide within [`POINT_EPSILON`]
pub fn points_coincide(a: Point2D, b: Point2D) -> bool {
    a.distance_squared(b) <= POINT_EPSILON * POINT_EPSILON
}

/// Signed area of the triangle (o, a, b), doubled
///
/// Positive when o -> a -> b turns left (counter-clockwise).
pub fn cross(o: Point2D, a: Point2D, b: Point2D) -> f32 {
    (a - o).perp_dot(b - o)
}

/// Angle of `p` around `origin`, normalized to (-pi, pi]
pub fn angle_around(origin: Point2D, p: Point2D) -> f32 {
    normalize_angle((p.y - origin.y).atan2(p.x - origin.x))
}

/// Wrap an angle into (-pi, pi]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    angle
}
