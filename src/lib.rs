//! Bomb Visibility - visibility-driven bomb commands over a 2D city

pub mod city;
pub mod command;
pub mod core;
pub mod geometry;
pub mod scene;
pub mod visibility;
