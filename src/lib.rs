//! # Shield Duel
//!
//! Deterministic simulation core for a two-player local arena shooter.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SHIELD DUEL                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── geom.rs     - Integer pixel Vec2 and Rect               │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── config.rs   - Match constants and validation            │
//! │  ├── state.rs    - Avatars, projectiles, phase               │
//! │  ├── input.rs    - Intent snapshots and recording            │
//! │  ├── controls.rs - Key events to intent snapshots            │
//! │  ├── collision.rs- Projectile hit tests                      │
//! │  ├── events.rs   - Step events                               │
//! │  └── step.rs     - Per-frame simulation step                 │
//! │                                                              │
//! │  present/        - Read-only views                           │
//! │  └── scene.rs    - Draw list and HUD text                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - Integer pixel arithmetic only
//! - Fixed iteration order (Player One, then Player Two; projectiles in firing order)
//! - No system time, no randomness
//!
//! Given identical intents, the simulation produces **identical results**
//! on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod present;

// Re-export commonly used types
pub use core::geom::{Px, Rect, Vec2};
pub use game::config::{ConfigError, SimConfig};
pub use game::input::{IntentFrame, PlayerIntent};
pub use game::state::{Outcome, PlayerSlot, SimulationState};
pub use game::step::{advance, StepResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frames per second the step is designed to run at
pub const FRAME_RATE: u32 = 60;
