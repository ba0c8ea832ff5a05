//! Game Events
//!
//! Events generated by a simulation step, for logging and replay checks.

use serde::{Serialize, Deserialize};
use crate::core::geom::Vec2;
use crate::game::state::{HitKind, Outcome, PlayerSlot};

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Avatar fired a projectile
    ProjectileFired {
        /// Firing avatar
        owner: PlayerSlot,
        /// New projectile
        projectile_id: u32,
        /// Spawn position
        position: Vec2,
    },

    /// Projectile struck the opposing avatar
    AvatarHit {
        /// Avatar that was struck
        target: PlayerSlot,
        /// Projectile that struck it
        projectile_id: u32,
        /// Pool the hit drained
        kind: HitKind,
        /// Health after the hit
        health: i32,
        /// Shield after the hit
        shield: i32,
    },

    /// Projectile left the playfield
    ProjectileExpired {
        /// Removed projectile
        projectile_id: u32,
    },

    /// Match ended
    MatchEnded {
        /// Winner or draw
        outcome: Outcome,
    },
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when event occurred
    pub frame: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u32, data: GameEventData) -> Self {
        Self { frame, data }
    }

    /// Create projectile fired event.
    pub fn projectile_fired(frame: u32, owner: PlayerSlot, projectile_id: u32, position: Vec2) -> Self {
        Self::new(frame, GameEventData::ProjectileFired { owner, projectile_id, position })
    }

    /// Create avatar hit event.
    pub fn avatar_hit(
        frame: u32,
        target: PlayerSlot,
        projectile_id: u32,
        kind: HitKind,
        health: i32,
        shield: i32,
    ) -> Self {
        Self::new(
            frame,
            GameEventData::AvatarHit {
                target,
                projectile_id,
                kind,
                health,
                shield,
            },
        )
    }

    /// Create projectile expired event.
    pub fn projectile_expired(frame: u32, projectile_id: u32) -> Self {
        Self::new(frame, GameEventData::ProjectileExpired { projectile_id })
    }

    /// Create match ended event.
    pub fn match_ended(frame: u32, outcome: Outcome) -> Self {
        Self::new(frame, GameEventData::MatchEnded { outcome })
    }

    /// Player involved, if any.
    pub fn player(&self) -> Option<PlayerSlot> {
        match &self.data {
            GameEventData::ProjectileFired { owner, .. } => Some(*owner),
            GameEventData::AvatarHit { target, .. } => Some(*target),
            GameEventData::ProjectileExpired { .. } => None,
            GameEventData::MatchEnded { outcome } => outcome.winner(),
        }
    }
}
