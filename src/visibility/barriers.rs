//! Barrier extraction, the synthetic frame and anteparo conversion

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::city::{BarrierShape, City, Shape};
use crate::core::config::VisibilityConfig;
use crate::core::types::{Orientation, ShapeId};
use crate::geometry::{segment_intersection, BoundingBox, Point2D, Segment};

/// Where a sweep barrier came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarrierOrigin {
    Explicit(ShapeId),
    SyntheticFrame,
}

/// An opaque line obstacle for one visibility query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barrier {
    pub start: Point2D,
    pub end: Point2D,
    pub origin: BarrierOrigin,
}

impl Barrier {
    pub fn new(start: Point2D, end: Point2D, origin: BarrierOrigin) -> Self {
        Self { start, end, origin }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    pub fn is_frame(&self) -> bool {
        self.origin == BarrierOrigin::SyntheticFrame
    }
}

/// Every shape already tagged as a barrier, in city order
pub fn extract_barriers(city: &City) -> Vec<Barrier> {
    city.shapes()
        .filter_map(|shape| match shape {
            Shape::Barrier(b) => Some(Barrier::new(
                b.segment.start,
                b.segment.end,
                BarrierOrigin::Explicit(b.id),
            )),
            _ => None,
        })
        .collect()
}

/// The box the synthetic frame is drawn on
///
/// Union of every shape's bounding box and the observer, grown by the frame
/// margin; the configured default box when the city is empty.
pub fn frame_box(city: &City, observer: Point2D, config: &VisibilityConfig) -> BoundingBox {
    let scene = city
        .bounding_box()
        .unwrap_or(config.empty_scene_frame);
    let mut scene = scene;
    scene.include_point(observer);
    scene.expanded(config.frame_margin)
}

/// Four synthetic barriers enclosing the whole scene and the observer
pub fn build_frame(city: &City, observer: Point2D, config: &VisibilityConfig) -> [Barrier; 4] {
    frame_box(city, observer, config)
        .edges()
        .map(|edge| Barrier::new(edge.start, edge.end, BarrierOrigin::SyntheticFrame))
}

/// Geometry and colour of the barriers a shape turns into
fn barrier_segments(shape: &Shape, orientation: Orientation) -> Option<(Vec<Segment>, String)> {
    match shape {
        Shape::Circle(c) => {
            let reach = match orientation {
                Orientation::Horizontal => Vec2::new(c.radius, 0.0),
                Orientation::Vertical => Vec2::new(0.0, c.radius),
            };
            Some((
                vec![Segment::new(c.center - reach, c.center + reach)],
                c.stroke.clone(),
            ))
        }
        Shape::Rectangle(r) => Some((r.edges().to_vec(), r.stroke.clone())),
        Shape::Line(l) => Some((vec![l.segment], l.color.clone())),
        Shape::Text(t) => Some((vec![t.extent()], t.stroke.clone())),
        // already an obstacle
        Shape::Barrier(_) => None,
    }
}

/// Replace every non-barrier shape with id in `[first, last]` by barriers
///
/// Originals are removed from the city; each produced barrier gets a fresh
/// id from the city's counter and is appended. Returns `(source, created)`
/// pairs in city order. Ids in the range with no shape are skipped.
pub fn convert_to_barriers(
    city: &mut City,
    first: ShapeId,
    last: ShapeId,
    orientation: Orientation,
) -> Vec<(ShapeId, Vec<ShapeId>)> {
    let mut converted = Vec::new();

    for id in city.ids_in_range(first, last) {
        let Some((segments, color)) = city.get(id).and_then(|s| barrier_segments(s, orientation))
        else {
            continue;
        };

        if city.remove_by_id(id).is_none() {
            continue;
        }

        let mut created = Vec::with_capacity(segments.len());
        for segment in segments {
            let new_id = city.next_id();
            city.append(Shape::Barrier(BarrierShape {
                id: new_id,
                segment,
                color: color.clone(),
            }));
            created.push(new_id);
        }
        tracing::debug!(source = %id, barriers = created.len(), "converted shape to barriers");
        converted.push((id, created));
    }

    converted
}

/// Barrier pairs, at least one of them in `among`, whose interiors cross
///
/// The sweep assumes barriers never cross; touching at an endpoint is fine.
pub fn crossing_barriers(city: &City, among: &[ShapeId]) -> Vec<(ShapeId, ShapeId)> {
    let barriers: Vec<(ShapeId, Segment)> = city
        .shapes()
        .filter_map(|s| match s {
            Shape::Barrier(b) => Some((b.id, b.segment)),
            _ => None,
        })
        .collect();

    let mut crossings = Vec::new();
    for (i, (a_id, a)) in barriers.iter().enumerate() {
        for (b_id, b) in &barriers[i + 1..] {
            if !among.contains(a_id) && !among.contains(b_id) {
                continue;
            }
            let crosses = segment_intersection(a, b)
                .map_or(false, |p| !a.has_endpoint(p) && !b.has_endpoint(p));
            if crosses {
                crossings.push((*a_id, *b_id));
            }
        }
    }
    crossings
}
