//! Integration tests for bomb commands from scene text to final city

use bomb_visibility::city::{City, Shape};
use bomb_visibility::command::{parse_query, BombCommand, BombProcessor, RegionLog};
use bomb_visibility::core::{Orientation, ShapeId, VisibilityConfig};
use bomb_visibility::scene::load_scene;
use glam::Vec2;

/// Circle and text in front of a wall, a rectangle and a line behind it
const WALLED_SCENE: &str = "\
c 1 20 50 5 black white
t 2 10 80 blue blue i hi
l 3 60 0 60 100 gray
r 4 80 40 10 10 black green
l 5 85 20 95 30 purple
";

fn walled_city() -> City {
    let mut city = load_scene(WALLED_SCENE);
    let mut processor = BombProcessor::with_config(VisibilityConfig::default());
    processor
        .execute(
            &mut city,
            &BombCommand::Anteparo {
                first: ShapeId(3),
                last: ShapeId(3),
                orientation: Orientation::Vertical,
            },
            None,
        )
        .unwrap();
    city
}

fn processor() -> BombProcessor<'static> {
    BombProcessor::with_config(VisibilityConfig::default())
}

#[test]
fn test_paint_changes_only_visible_shapes() {
    let mut city = walled_city();
    let before: Vec<Shape> = city.shapes().cloned().collect();

    let outcome = processor()
        .execute(
            &mut city,
            &BombCommand::Paint {
                point: Vec2::new(20.0, 50.0),
                color: "orange".into(),
            },
            None,
        )
        .unwrap();

    // circle 1, text 2 and the wall (id 6) are in sight
    assert_eq!(outcome.affected, vec![ShapeId(1), ShapeId(2), ShapeId(6)]);
    for original in &before {
        let now = city.get(original.id()).unwrap();
        if outcome.affected.contains(&original.id()) {
            assert_ne!(now, original);
        } else {
            assert_eq!(now, original);
        }
    }
    match city.get(ShapeId(6)).unwrap() {
        Shape::Barrier(b) => assert_eq!(b.color, "orange"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_paint_single_circle_scene() {
    let mut city = load_scene("c 1 50 50 10 black white\n");
    processor()
        .execute(
            &mut city,
            &BombCommand::Paint {
                point: Vec2::new(52.0, 51.0),
                color: "red".into(),
            },
            None,
        )
        .unwrap();

    match city.get(ShapeId(1)).unwrap() {
        Shape::Circle(c) => {
            assert_eq!((c.fill.as_str(), c.stroke.as_str()), ("red", "red"));
            assert_eq!(c.center, Vec2::new(50.0, 50.0));
            assert_eq!(c.radius, 10.0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_clone_grows_city_by_matches() {
    let mut city = walled_city();
    let highest_before = city.highest_id();
    let len_before = city.len();
    let originals: Vec<Shape> = city.shapes().cloned().collect();

    let outcome = processor()
        .execute(
            &mut city,
            &BombCommand::Clone {
                point: Vec2::new(20.0, 50.0),
                offset: Vec2::new(300.0, 0.0),
            },
            None,
        )
        .unwrap();

    let k = outcome.affected.len();
    assert_eq!(k, 3);
    assert_eq!(city.len(), len_before + k);
    assert!(outcome.created.iter().all(|id| *id > highest_before));
    for original in &originals {
        assert_eq!(city.get(original.id()).unwrap(), original);
    }
    match city.get(outcome.clones[0].1).unwrap() {
        Shape::Circle(c) => assert_eq!(c.center, Vec2::new(320.0, 50.0)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_destroy_twice_in_open_scene() {
    let mut city = load_scene("c 1 10 10 3 a b\nr 2 40 40 5 5 a b\nl 3 70 10 90 15 c\n");

    let command = BombCommand::Destroy {
        point: Vec2::new(50.0, 20.0),
    };
    let first = processor().execute(&mut city, &command, None).unwrap();
    assert_eq!(first.affected.len(), 3);
    assert!(city.is_empty());

    let second = processor().execute(&mut city, &command, None).unwrap();
    assert!(second.affected.is_empty());
}

#[test]
fn test_destroy_keeps_hidden_shapes() {
    let mut city = walled_city();
    let outcome = processor()
        .execute(
            &mut city,
            &BombCommand::Destroy {
                point: Vec2::new(20.0, 50.0),
            },
            None,
        )
        .unwrap();

    assert_eq!(outcome.affected.len(), 3);
    let left: Vec<ShapeId> = city.shapes().map(Shape::id).collect();
    assert_eq!(left, vec![ShapeId(4), ShapeId(5)]);
}

#[test]
fn test_full_query_run() {
    let mut city = load_scene(WALLED_SCENE);
    let query = "\
a 3 3 v
p 20 50 red -
d 20 50
cln 20 50 5 5 sfx
d 1
a 4 4 h
";
    let mut log = RegionLog::new();
    let report = BombProcessor::with_config(VisibilityConfig::default())
        .with_sink(&mut log)
        .run(&mut city, parse_query(query))
        .unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.outcomes.len(), 5);
    assert_eq!(report.outcomes[0].created, vec![ShapeId(6)]);
    assert_eq!(report.outcomes[1].affected.len(), 3);
    assert_eq!(report.outcomes[2].affected.len(), 3);
    // after the wall is gone everything left is in sight of the clone bomb
    assert_eq!(report.outcomes[3].affected, vec![ShapeId(4), ShapeId(5)]);
    assert_eq!(report.outcomes[4].created.len(), 4);
    assert_eq!(report.highest_id, ShapeId(12));
    assert_eq!(log.len(), 3);
    assert_eq!(log.records[2].label.as_deref(), Some("sfx"));
}
