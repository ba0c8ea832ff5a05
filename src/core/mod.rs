//! Core deterministic primitives.
//!
//! Integer pixel geometry and state hashing. Nothing in here touches
//! floating point, clocks or randomness.

pub mod geom;
pub mod hash;

// Re-export core types
pub use geom::{Px, Rect, Vec2};
pub use hash::{compute_state_hash, StateHash, StateHasher};
