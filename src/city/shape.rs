//! Shape value objects
//!
//! Every scene entity is one variant of [`Shape`]. Behaviour that differs per
//! kind is a single exhaustive `match`, so adding a kind means adding a
//! variant and letting the compiler point at every place that needs it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::{ShapeId, TextAnchor};
use crate::geometry::{BoundingBox, Segment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub id: ShapeId,
    pub center: Vec2,
    pub radius: f32,
    pub stroke: String,
    pub fill: String,
}

/// Axis-aligned rectangle anchored at its minimum corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: ShapeId,
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
    pub stroke: String,
    pub fill: String,
}

impl Rectangle {
    pub fn corners(&self) -> [Vec2; 4] {
        let o = self.origin;
        [
            o,
            o + Vec2::new(self.width, 0.0),
            o + Vec2::new(self.width, self.height),
            o + Vec2::new(0.0, self.height),
        ]
    }

    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::new(self.width, self.height) * 0.5
    }

    /// Edges in top, right, bottom, left order, chained end to start
    pub fn edges(&self) -> [Segment; 4] {
        let [a, b, c, d] = self.corners();
        [
            Segment::new(a, b),
            Segment::new(b, c),
            Segment::new(c, d),
            Segment::new(d, a),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: ShapeId,
    pub segment: Segment,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub family: String,
    pub weight: String,
    pub size: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "sans".to_string(),
            weight: "normal".to_string(),
            size: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub id: ShapeId,
    pub position: Vec2,
    pub stroke: String,
    pub fill: String,
    pub anchor: TextAnchor,
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
}

impl Text {
    /// Horizontal extent assumed per character
    pub const CHAR_WIDTH: f32 = 10.0;

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// The horizontal segment the text occupies, following its anchor
    pub fn extent(&self) -> Segment {
        let length = Self::CHAR_WIDTH * self.char_count() as f32;
        let Vec2 { x, y } = self.position;
        let (x1, x2) = match self.anchor {
            TextAnchor::Start => (x, x + length),
            TextAnchor::End => (x - length, x),
            TextAnchor::Middle => (x - length / 2.0, x + length / 2.0),
        };
        Segment::from_coords(x1, y, x2, y)
    }
}

/// A shape already converted into an opaque line obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrierShape {
    pub id: ShapeId,
    pub segment: Segment,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Line,
    Text,
    Barrier,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Line => "line",
            ShapeKind::Text => "text",
            ShapeKind::Barrier => "barrier",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Line(Line),
    Text(Text),
    Barrier(BarrierShape),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Circle(c) => c.id,
            Shape::Rectangle(r) => r.id,
            Shape::Line(l) => l.id,
            Shape::Text(t) => t.id,
            Shape::Barrier(b) => b.id,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Barrier(_) => ShapeKind::Barrier,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Circle(c) => BoundingBox::new(
                c.center - Vec2::splat(c.radius),
                c.center + Vec2::splat(c.radius),
            ),
            Shape::Rectangle(r) => BoundingBox::from_points(&r.corners()),
            Shape::Line(l) => l.segment.bounding_box(),
            Shape::Text(t) => t.extent().bounding_box(),
            Shape::Barrier(b) => b.segment.bounding_box(),
        }
    }

    /// Repaint the shape
    ///
    /// Filled kinds get both fill and stroke; lines and barriers only have a
    /// stroke colour.
    pub fn set_color(&mut self, color: &str) {
        match self {
            Shape::Circle(c) => {
                c.fill = color.to_string();
                c.stroke = color.to_string();
            }
            Shape::Rectangle(r) => {
                r.fill = color.to_string();
                r.stroke = color.to_string();
            }
            Shape::Text(t) => {
                t.fill = color.to_string();
                t.stroke = color.to_string();
            }
            Shape::Line(l) => l.color = color.to_string(),
            Shape::Barrier(b) => b.color = color.to_string(),
        }
    }

    /// Deep copy under a new identifier, translated by `offset`
    pub fn cloned_with(&self, new_id: ShapeId, offset: Vec2) -> Shape {
        let mut copy = self.clone();
        match &mut copy {
            Shape::Circle(c) => {
                c.id = new_id;
                c.center += offset;
            }
            Shape::Rectangle(r) => {
                r.id = new_id;
                r.origin += offset;
            }
            Shape::Line(l) => {
                l.id = new_id;
                l.segment = l.segment.translated(offset);
            }
            Shape::Text(t) => {
                t.id = new_id;
                t.position += offset;
            }
            Shape::Barrier(b) => {
                b.id = new_id;
                b.segment = b.segment.translated(offset);
            }
        }
        copy
    }
}
