//! Visibility engine: barriers, the angular sweep and the queries built on it

pub mod active_set;
pub mod barriers;
pub mod query;
pub mod region;
pub mod sort;
pub mod sweep;

pub use active_set::{ActiveSegmentIndex, NearestHit};
pub use barriers::{
    build_frame, convert_to_barriers, crossing_barriers, extract_barriers, Barrier, BarrierOrigin,
};
pub use query::{point_visible, shape_visible, VisibilityContext};
pub use region::VisibilityRegion;
pub use sort::{SortConfig, SortStrategy};
pub use sweep::{compute_visibility_region, EventKind, SweepEvent};
