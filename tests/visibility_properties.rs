//! Property tests for the visibility engine

use bomb_visibility::core::ShapeId;
use bomb_visibility::geometry::{points_coincide, BoundingBox, Point2D};
use bomb_visibility::visibility::{
    compute_visibility_region, Barrier, BarrierOrigin, SortConfig, VisibilityRegion,
};
use glam::Vec2;
use proptest::prelude::*;

fn frame() -> Vec<Barrier> {
    BoundingBox::new(Vec2::new(-10.0, -10.0), Vec2::new(110.0, 110.0))
        .edges()
        .iter()
        .map(|e| Barrier::new(e.start, e.end, BarrierOrigin::SyntheticFrame))
        .collect()
}

/// Vertical walls on distinct columns x = 10k + 2, so no two walls cross
fn walls() -> impl Strategy<Value = Vec<Barrier>> {
    prop::collection::vec(
        (0u32..10, 0.0f32..90.0, 2.0f32..40.0),
        0..8,
    )
    .prop_map(|specs| {
        let mut seen = [false; 10];
        specs
            .into_iter()
            .filter(|(column, _, _)| !std::mem::replace(&mut seen[*column as usize], true))
            .map(|(column, y, len)| {
                let x = 10.0 * column as f32 + 2.0;
                Barrier::new(
                    Vec2::new(x, y),
                    Vec2::new(x, (y + len).min(100.0)),
                    BarrierOrigin::Explicit(ShapeId(column)),
                )
            })
            .collect()
    })
}

/// Observer on columns x = 10k + 7, never on a wall
fn observer() -> impl Strategy<Value = Point2D> {
    (0u32..10, 1.0f32..99.0).prop_map(|(column, y)| Vec2::new(10.0 * column as f32 + 7.0, y))
}

fn region(observer: Point2D, walls: &[Barrier]) -> VisibilityRegion {
    let mut barriers = frame();
    barriers.extend_from_slice(walls);
    compute_visibility_region(observer, &barriers, &SortConfig::default()).unwrap()
}

fn grid() -> Vec<Point2D> {
    (0..12)
        .flat_map(|i| (0..12).map(move |j| Vec2::new(i as f32 * 9.1 + 0.3, j as f32 * 9.1 + 0.7)))
        .collect()
}

fn clear_of_boundary(region: &VisibilityRegion, p: Point2D) -> bool {
    region
        .segments()
        .iter()
        .all(|s| s.distance_to_point(p) > 0.05)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_observer_always_visible(o in observer(), walls in walls()) {
        let region = region(o, &walls);
        prop_assert!(region.contains(o));
        prop_assert!(region.len() >= 3);
        prop_assert!(region.area() > 0.0);
    }

    #[test]
    fn test_boundary_is_closed(o in observer(), walls in walls()) {
        let segments = region(o, &walls).segments();
        prop_assert!(!segments.is_empty());
        for pair in segments.windows(2) {
            prop_assert!(points_coincide(pair[0].end, pair[1].start));
        }
        let first = segments[0];
        let last = segments[segments.len() - 1];
        prop_assert!(points_coincide(last.end, first.start));
    }

    #[test]
    fn test_adding_wall_never_reveals(o in observer(), walls in walls(), extra in walls()) {
        let before = region(o, &walls);

        let used: Vec<f32> = walls.iter().map(|w| w.start.x).collect();
        let mut more = walls.clone();
        more.extend(extra.into_iter().filter(|w| !used.contains(&w.start.x)));
        let after = region(o, &more);

        for p in grid() {
            if clear_of_boundary(&before, p) && clear_of_boundary(&after, p) && !before.contains(p) {
                prop_assert!(!after.contains(p), "point {:?} became visible", p);
            }
        }
    }

    #[test]
    fn test_no_walls_gives_frame(o in observer()) {
        let region = region(o, &[]);
        prop_assert_eq!(region.len(), 4);
        for corner in [
            Vec2::new(-10.0, -10.0),
            Vec2::new(110.0, -10.0),
            Vec2::new(110.0, 110.0),
            Vec2::new(-10.0, 110.0),
        ] {
            prop_assert!(region.vertices().iter().any(|v| points_coincide(*v, corner)));
        }
    }
}
