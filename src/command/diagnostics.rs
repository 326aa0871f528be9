//! Optional recording of computed regions for later rendering

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;
use crate::visibility::VisibilityRegion;

/// Receives each region a command computed
///
/// Recording is best effort; the processor never reads anything back.
pub trait DiagnosticSink {
    fn record(&mut self, label: Option<&str>, region: &VisibilityRegion);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub label: Option<String>,
    pub observer: Point2D,
    pub vertices: Vec<Point2D>,
    pub area: f64,
}

/// Keeps every recorded region in command order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionLog {
    pub records: Vec<RegionRecord>,
}

impl RegionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl DiagnosticSink for RegionLog {
    fn record(&mut self, label: Option<&str>, region: &VisibilityRegion) {
        self.records.push(RegionRecord {
            label: label.map(str::to_string),
            observer: region.observer,
            vertices: region.vertices().to_vec(),
            area: region.area(),
        });
    }
}
