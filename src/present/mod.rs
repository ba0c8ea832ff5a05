//! Presentation Support
//!
//! Read-only views of the simulation for whatever draws it. Nothing here
//! mutates state.

pub mod scene;

pub use scene::{build_scene, DrawCommand, Scene};
