//! Game Logic Module
//!
//! All simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `config`: Match constants and validation
//! - `state`: Avatars, projectiles, match phase
//! - `input`: Intent snapshots and recording
//! - `controls`: Keyboard events to intent snapshots
//! - `collision`: Projectile hit tests
//! - `events`: Events emitted by a step
//! - `step`: The per-frame simulation step and replay

pub mod config;
pub mod state;
pub mod input;
pub mod controls;
pub mod collision;
pub mod events;
pub mod step;

// Re-export key types
pub use config::{ConfigError, SimConfig, SimultaneousDefeat};
pub use state::{Avatar, Outcome, Phase, PlayerSlot, Projectile, SimulationState};
pub use input::{IntentFrame, IntentRecorder, PlayerIntent};
pub use controls::{ControlScheme, FirePolicy, Key, KeyEvent, KeyboardMapper};
pub use events::{GameEvent, GameEventData};
pub use step::{advance, replay_match, StepResult};
