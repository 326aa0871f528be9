//! The city: sole owner of every scene shape

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::Shape;
use crate::core::error::{Result, VisError};
use crate::core::types::ShapeId;
use crate::geometry::BoundingBox;

/// Ordered storage for all city shapes
///
/// Insertion order is render order. The id index is a lookup aid over the
/// same vector, never a second owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "CityData", into = "CityData")]
pub struct City {
    shapes: Vec<Shape>,
    index: AHashMap<ShapeId, usize>,
    /// Highest identifier ever handed out or appended
    highest_id: u32,
}

impl City {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape at the end of the render order
    ///
    /// Appending keeps the id counter ahead of every stored id. A shape
    /// whose id is already present replaces the stored one in place.
    pub fn append(&mut self, shape: Shape) {
        let id = shape.id();
        self.highest_id = self.highest_id.max(id.0);
        if let Some(&idx) = self.index.get(&id) {
            tracing::warn!(%id, "duplicate shape id, replacing stored shape");
            self.shapes[idx] = shape;
            return;
        }
        self.index.insert(id, self.shapes.len());
        self.shapes.push(shape);
    }

    /// Remove a shape, returning it to the caller (dropping it deallocates)
    pub fn remove_by_id(&mut self, id: ShapeId) -> Option<Shape> {
        let idx = self.index.remove(&id)?;
        let shape = self.shapes.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(shape)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.index.get(&id).map(|&idx| &self.shapes[idx])
    }

    /// Like [`City::get`], but a missing id is a `ShapeNotFound` error
    pub fn require(&self, id: ShapeId) -> Result<&Shape> {
        self.get(id).ok_or(VisError::ShapeNotFound(id))
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        let idx = *self.index.get(&id)?;
        self.shapes.get_mut(idx)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterate over all shapes in render order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Ids of shapes whose id lies in `[first, last]`, in render order
    pub fn ids_in_range(&self, first: ShapeId, last: ShapeId) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .map(Shape::id)
            .filter(|id| *id >= first && *id <= last)
            .collect()
    }

    /// Mint a fresh identifier from the monotonic counter
    pub fn next_id(&mut self) -> ShapeId {
        self.highest_id += 1;
        ShapeId(self.highest_id)
    }

    pub fn highest_id(&self) -> ShapeId {
        ShapeId(self.highest_id)
    }

    /// Union of every shape's bounding box, `None` when the city is empty
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.shapes.is_empty() {
            return None;
        }
        Some(
            self.shapes
                .iter()
                .fold(BoundingBox::empty(), |acc, s| acc.union(&s.bounding_box())),
        )
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl FromIterator<Shape> for City {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        let mut city = City::new();
        for shape in iter {
            city.append(shape);
        }
        city
    }
}

/// Serialized form: the index is rebuilt on load
#[derive(Serialize, Deserialize)]
struct CityData {
    highest_id: u32,
    shapes: Vec<Shape>,
}

impl From<CityData> for City {
    fn from(data: CityData) -> Self {
        let mut city: City = data.shapes.into_iter().collect();
        city.highest_id = city.highest_id.max(data.highest_id);
        city
    }
}

impl From<City> for CityData {
    fn from(city: City) -> Self {
        CityData {
            highest_id: city.highest_id,
            shapes: city.shapes,
        }
    }
}
