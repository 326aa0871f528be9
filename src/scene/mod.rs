//! Scene-description input

pub mod loader;

pub use loader::{load_scene, SceneLoader};
