//! Visibility predicates over a computed region

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;

use super::barriers::{build_frame, extract_barriers};
use super::region::VisibilityRegion;
use super::sweep::compute_visibility_region;
use crate::city::{City, Shape};
use crate::core::config::VisibilityConfig;
use crate::core::error::Result;
use crate::core::types::ShapeId;
use crate::geometry::{BoundingBox, Point2D, Segment};

/// Check if `p` lies in the region (the observer itself always does)
pub fn point_visible(region: &VisibilityRegion, p: Point2D) -> bool {
    region.contains(p)
}

/// Representative points tested for a shape
///
/// Barriers bound the region, so every point of a barrier that faces the
/// observer lies on the boundary; the probes offset to both sides catch it.
pub fn sample_points(shape: &Shape, probe_offset: f32) -> Vec<Point2D> {
    match shape {
        Shape::Circle(c) => std::iter::once(c.center)
            .chain((0..8).map(|i| {
                let angle = i as f32 * FRAC_PI_4;
                c.center + Vec2::new(angle.cos(), angle.sin()) * c.radius
            }))
            .collect(),
        Shape::Rectangle(r) => {
            let mut points = r.corners().to_vec();
            points.push(r.center());
            points
        }
        Shape::Line(l) => segment_samples(&l.segment).to_vec(),
        Shape::Text(t) => segment_samples(&t.extent()).to_vec(),
        Shape::Barrier(b) => {
            let base = segment_samples(&b.segment);
            let mut points = base.to_vec();
            if let Some(normal) = b.segment.unit_normal() {
                let offset = normal * probe_offset;
                for p in base {
                    points.push(p + offset);
                    points.push(p - offset);
                }
            }
            points
        }
    }
}

fn segment_samples(segment: &Segment) -> [Point2D; 3] {
    [segment.start, segment.midpoint(), segment.end]
}

/// Check if any sample of the shape is visible
///
/// Point sampling can miss a large shape that only grazes the region between
/// samples; such shapes count as not visible.
pub fn shape_visible(region: &VisibilityRegion, shape: &Shape, probe_offset: f32) -> bool {
    sample_points(shape, probe_offset)
        .into_iter()
        .any(|p| point_visible(region, p))
}

/// Everything one command needs to classify shapes from one observer
///
/// Built per command and dropped with it.
#[derive(Debug, Clone)]
pub struct VisibilityContext {
    region: VisibilityRegion,
    selection_box: BoundingBox,
    probe_offset: f32,
}

impl VisibilityContext {
    /// Extract barriers, add the frame and run the sweep
    pub fn build(city: &City, observer: Point2D, config: &VisibilityConfig) -> Result<Self> {
        let mut barriers = extract_barriers(city);
        barriers.try_reserve(4)?;
        barriers.extend(build_frame(city, observer, config));

        let region = compute_visibility_region(observer, &barriers, &config.sort)?;
        Ok(Self::from_region(region, config))
    }

    pub fn from_region(region: VisibilityRegion, config: &VisibilityConfig) -> Self {
        let selection_box = region.bounding_box().expanded(config.selection_margin);
        Self {
            region,
            selection_box,
            probe_offset: config.barrier_probe_offset,
        }
    }

    pub fn observer(&self) -> Point2D {
        self.region.observer
    }

    pub fn region(&self) -> &VisibilityRegion {
        &self.region
    }

    pub fn point_visible(&self, p: Point2D) -> bool {
        point_visible(&self.region, p)
    }

    pub fn shape_visible(&self, shape: &Shape) -> bool {
        shape_visible(&self.region, shape, self.probe_offset)
    }

    /// Selection used by the bomb commands: bounding-box pre-filter, then sampling
    pub fn selects(&self, shape: &Shape) -> bool {
        self.selection_box.intersects(&shape.bounding_box()) && self.shape_visible(shape)
    }

    /// Ids of every selected shape, in city order
    pub fn visible_shapes(&self, city: &City) -> Vec<ShapeId> {
        city.shapes()
            .filter(|s| self.selects(s))
            .map(Shape::id)
            .collect()
    }
}
