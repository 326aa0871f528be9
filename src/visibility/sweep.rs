//! Angular sweep producing the visibility polygon
//!
//! Barriers are oriented counter-clockwise around the observer, turned into
//! start/end events by angle, and swept in one pass while the nearest active
//! barrier traces the visible boundary.

use std::cmp::Ordering;
use std::f32::consts::PI;

use glam::Vec2;

use super::active_set::ActiveSegmentIndex;
use super::barriers::Barrier;
use super::region::VisibilityRegion;
use super::sort::{sort_by, SortConfig};
use crate::core::error::Result;
use crate::geometry::{angle_around, cross, points_coincide, Point2D, Segment, POINT_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    Start,
    End,
}

/// One end of a barrier's angular interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepEvent {
    pub angle: f32,
    pub distance: f32,
    pub kind: EventKind,
    pub point: Point2D,
    /// Index into the oriented barrier list
    pub barrier: usize,
}

/// Event order: angle ascending, nearer first, start before end
///
/// Barrier index breaks the remaining ties so the order is total and every
/// sort strategy agrees.
pub fn compare_events(a: &SweepEvent, b: &SweepEvent) -> Ordering {
    a.angle
        .total_cmp(&b.angle)
        .then_with(|| a.distance.total_cmp(&b.distance))
        .then_with(|| a.kind.cmp(&b.kind))
        .then_with(|| a.barrier.cmp(&b.barrier))
}

/// Orient barriers counter-clockwise around the observer
///
/// Zero-length barriers and barriers whose line passes through the observer
/// block nothing and are dropped.
pub fn orient_barriers(observer: Point2D, barriers: &[Barrier]) -> Vec<Segment> {
    barriers
        .iter()
        .filter_map(|b| {
            let segment = b.segment();
            if segment.is_degenerate() {
                tracing::debug!(origin = ?b.origin, "dropping zero-length barrier");
                return None;
            }
            let turn = cross(observer, segment.start, segment.end);
            if (turn / segment.length()).abs() <= POINT_EPSILON {
                tracing::debug!(origin = ?b.origin, "dropping barrier collinear with observer");
                return None;
            }
            Some(if turn > 0.0 { segment } else { segment.reversed() })
        })
        .collect()
}

/// Where an oriented segment crosses the ray pointing to -x from the observer
fn cut_point(observer: Point2D, segment: &Segment) -> Point2D {
    let dy = segment.end.y - segment.start.y;
    let s = if dy.abs() > f32::EPSILON {
        ((observer.y - segment.start.y) / dy).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let x = segment.start.x + (segment.end.x - segment.start.x) * s;
    Vec2::new(x, observer.y)
}

/// Start/end events for every oriented segment
///
/// A segment whose angular interval wraps past +pi is split at the cut into
/// `[start, pi]` and `[-pi, end]`.
pub fn generate_events(observer: Point2D, segments: &[Segment]) -> Result<Vec<SweepEvent>> {
    let mut events = Vec::new();
    events.try_reserve(segments.len() * 4)?;

    let event = |kind, angle, point: Point2D, barrier| SweepEvent {
        angle,
        distance: observer.distance(point),
        kind,
        point,
        barrier,
    };

    for (idx, segment) in segments.iter().enumerate() {
        let start_angle = angle_around(observer, segment.start);
        let end_angle = angle_around(observer, segment.end);

        if start_angle < end_angle {
            events.push(event(EventKind::Start, start_angle, segment.start, idx));
            events.push(event(EventKind::End, end_angle, segment.end, idx));
            continue;
        }

        if start_angle >= PI {
            // starts on the cut: the whole barrier lies after -pi
            events.push(event(EventKind::Start, -PI, segment.start, idx));
            events.push(event(EventKind::End, end_angle, segment.end, idx));
            continue;
        }

        let cut = cut_point(observer, segment);
        events.push(event(EventKind::Start, start_angle, segment.start, idx));
        events.push(event(EventKind::End, PI, cut, idx));
        events.push(event(EventKind::Start, -PI, cut, idx));
        events.push(event(EventKind::End, end_angle, segment.end, idx));
    }

    Ok(events)
}

/// Emit `from -> to` unless the two points coincide
fn push_edge(boundary: &mut Vec<Segment>, from: Point2D, to: Point2D) {
    if !points_coincide(from, to) {
        boundary.push(Segment::new(from, to));
    }
}

/// Compute the region visible from `observer` among `barriers`
///
/// `barriers` must enclose the observer (the synthetic frame does); without
/// an enclosure the result is whatever the sweep could trace.
pub fn compute_visibility_region(
    observer: Point2D,
    barriers: &[Barrier],
    sort: &SortConfig,
) -> Result<VisibilityRegion> {
    let segments = orient_barriers(observer, barriers);
    let mut events = generate_events(observer, &segments)?;
    sort_by(&mut events, sort, compare_events);

    let mut boundary: Vec<Segment> = Vec::new();
    boundary.try_reserve(events.len() + 1)?;

    let mut active = ActiveSegmentIndex::with_capacity(segments.len());
    let Some(first) = events.first() else {
        return Ok(VisibilityRegion::from_segments(observer, &boundary));
    };
    let mut frontier = first.point;
    let origin = frontier;

    for e in &events {
        let occluded = active.occludes(observer, e.point, e.barrier);

        match e.kind {
            EventKind::Start => {
                if !occluded {
                    match active.nearest(observer, e.point) {
                        Some(prev) => {
                            push_edge(&mut boundary, frontier, prev.point);
                            push_edge(&mut boundary, prev.point, e.point);
                        }
                        None => push_edge(&mut boundary, frontier, e.point),
                    }
                    frontier = e.point;
                }
                active.insert(e.barrier, segments[e.barrier]);
            }
            EventKind::End => {
                active.remove(e.barrier);
                if !occluded {
                    push_edge(&mut boundary, frontier, e.point);
                    frontier = match active.nearest(observer, e.point) {
                        Some(next) => {
                            push_edge(&mut boundary, e.point, next.point);
                            next.point
                        }
                        None => e.point,
                    };
                }
            }
        }
    }

    push_edge(&mut boundary, frontier, origin);

    tracing::debug!(
        barriers = barriers.len(),
        oriented = segments.len(),
        events = events.len(),
        boundary = boundary.len(),
        "visibility sweep finished"
    );

    Ok(VisibilityRegion::from_segments(observer, &boundary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::barriers::BarrierOrigin;
    use crate::geometry::BoundingBox;

    fn frame(min: Vec2, max: Vec2) -> Vec<Barrier> {
        BoundingBox::new(min, max)
            .edges()
            .iter()
            .map(|e| Barrier::new(e.start, e.end, BarrierOrigin::SyntheticFrame))
            .collect()
    }

    fn wall(x1: f32, y1: f32, x2: f32, y2: f32) -> Barrier {
        Barrier::new(
            Vec2::new(x1, y1),
            Vec2::new(x2, y2),
            BarrierOrigin::Explicit(crate::core::types::ShapeId(1)),
        )
    }

    #[test]
    fn test_orientation_is_counter_clockwise() {
        let observer = Vec2::ZERO;
        let oriented = orient_barriers(
            observer,
            &[wall(5.0, 5.0, 5.0, -5.0), wall(1.0, 1.0, 2.0, 2.0), wall(3.0, 3.0, 3.0, 3.0)],
        );
        assert_eq!(oriented.len(), 1);
        assert_eq!(oriented[0].start, Vec2::new(5.0, -5.0));
        assert!(cross(observer, oriented[0].start, oriented[0].end) > 0.0);
    }

    #[test]
    fn test_wrapping_barrier_split_at_cut() {
        let observer = Vec2::ZERO;
        let segments = orient_barriers(observer, &[wall(-5.0, 5.0, -5.0, -5.0)]);
        let events = generate_events(observer, &segments).unwrap();
        assert_eq!(events.len(), 4);
        let cut: Vec<_> = events.iter().filter(|e| e.point == Vec2::new(-5.0, 0.0)).collect();
        assert_eq!(cut.len(), 2);
        assert!(cut.iter().any(|e| e.kind == EventKind::End && e.angle == PI));
        assert!(cut.iter().any(|e| e.kind == EventKind::Start && e.angle == -PI));
    }

    #[test]
    fn test_event_order_ties() {
        let base = SweepEvent {
            angle: 0.5,
            distance: 3.0,
            kind: EventKind::End,
            point: Vec2::ZERO,
            barrier: 0,
        };
        let nearer = SweepEvent { distance: 2.0, barrier: 5, ..base };
        let start = SweepEvent { kind: EventKind::Start, barrier: 9, ..base };
        assert_eq!(compare_events(&nearer, &base), Ordering::Less);
        assert_eq!(compare_events(&start, &base), Ordering::Less);
    }

    #[test]
    fn test_empty_scene_is_the_frame() {
        let barriers = frame(Vec2::new(-10.0, -10.0), Vec2::new(110.0, 110.0));
        let region =
            compute_visibility_region(Vec2::new(50.0, 50.0), &barriers, &SortConfig::default())
                .unwrap();
        assert_eq!(region.len(), 4);
        for corner in [
            Vec2::new(-10.0, -10.0),
            Vec2::new(110.0, -10.0),
            Vec2::new(110.0, 110.0),
            Vec2::new(-10.0, 110.0),
        ] {
            assert!(region.vertices().iter().any(|v| points_coincide(*v, corner)));
        }
        assert!((region.area() - 120.0 * 120.0).abs() < 1e-2);
    }

    #[test]
    fn test_wall_casts_shadow() {
        let mut barriers = frame(Vec2::new(-10.0, -10.0), Vec2::new(110.0, 110.0));
        barriers.push(wall(60.0, 0.0, 60.0, 100.0));
        let region =
            compute_visibility_region(Vec2::new(0.0, 50.0), &barriers, &SortConfig::default())
                .unwrap();

        assert!(region.contains(Vec2::new(0.0, 50.0)));
        assert!(region.contains(Vec2::new(50.0, 50.0)));
        assert!(!region.contains(Vec2::new(90.0, 50.0)));
        assert!(!region.contains(Vec2::new(90.0, 10.0)));
        assert!(region.contains(Vec2::new(65.0, -6.0)));
        assert!(region.contains(Vec2::new(65.0, 106.0)));
    }

    #[test]
    fn test_observer_off_centre_near_frame() {
        let barriers = frame(Vec2::new(0.0, 0.0), Vec2::new(100.0, 50.0));
        let region =
            compute_visibility_region(Vec2::new(2.0, 48.0), &barriers, &SortConfig::default())
                .unwrap();
        assert_eq!(region.len(), 4);
        assert!(region.contains(Vec2::new(99.0, 1.0)));
    }

    #[test]
    fn test_no_barriers_gives_empty_region() {
        let region =
            compute_visibility_region(Vec2::ZERO, &[], &SortConfig::default()).unwrap();
        assert!(region.is_empty());
        assert!(region.contains(Vec2::ZERO));
    }
}
