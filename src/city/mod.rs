//! City layer - shape value objects and the authoritative shape store

pub mod shape;
pub mod store;

pub use shape::{BarrierShape, Circle, Line, Rectangle, Shape, ShapeKind, Text, TextStyle};
pub use store::City;
