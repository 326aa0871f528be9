pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, VisibilityConfig};
pub use error::{Result, VisError};
pub use types::{Orientation, ShapeId, TextAnchor};
