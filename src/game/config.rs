//! Simulation Configuration
//!
//! The fixed constants of a match. Defaults reproduce the reference game;
//! `SimConfig::validate` rejects malformed values before a match starts.

use thiserror::Error;

use crate::core::geom::{Px, Rect, Vec2};
use crate::game::state::PlayerSlot;

// =============================================================================
// REFERENCE CONSTANTS
// =============================================================================

/// Playfield width in pixels
pub const PLAYFIELD_WIDTH: Px = 800;

/// Playfield height in pixels
pub const PLAYFIELD_HEIGHT: Px = 400;

/// Avatar edge length in pixels (avatars are square)
pub const AVATAR_SIZE: Px = 40;

/// Avatar movement per frame per held direction
pub const MOVE_SPEED: Px = 5;

/// Projectile speed magnitude per frame
pub const PROJECTILE_SPEED: Px = 7;

/// Projectile width
pub const PROJECTILE_WIDTH: Px = 10;

/// Projectile height
pub const PROJECTILE_HEIGHT: Px = 5;

/// Shield points removed by a hit on an active shield
pub const SHIELD_DAMAGE: i32 = 20;

/// Health points removed by an unshielded hit
pub const HEALTH_DAMAGE: i32 = 10;

/// Starting health
pub const STARTING_HEALTH: i32 = 100;

/// Starting shield
pub const STARTING_SHIELD: i32 = 100;

/// Player One spawn (top-left corner)
pub const SPAWN_ONE: Vec2 = Vec2::new(100, 300);

/// Player Two spawn (top-left corner)
pub const SPAWN_TWO: Vec2 = Vec2::new(600, 300);

// =============================================================================
// POLICIES
// =============================================================================

/// How a step resolves both avatars reaching zero health on the same frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimultaneousDefeat {
    /// Player One's defeat is checked first, so Player Two is reported as
    /// the winner.
    #[default]
    PlayerOneCheckedFirst,
    /// Report a draw.
    Draw,
}

// =============================================================================
// CONFIG
// =============================================================================

/// Configuration for match simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Playfield width
    pub playfield_width: Px,
    /// Playfield height
    pub playfield_height: Px,
    /// Avatar width
    pub avatar_width: Px,
    /// Avatar height
    pub avatar_height: Px,
    /// Pixels moved per frame per held direction
    pub move_speed: Px,
    /// Projectile speed magnitude; the sign comes from the firing side
    pub projectile_speed: Px,
    /// Projectile width (drawn only, hit tests use the projectile's point)
    pub projectile_width: Px,
    /// Projectile height (drawn only)
    pub projectile_height: Px,
    /// Shield damage per hit
    pub shield_damage: i32,
    /// Health damage per hit
    pub health_damage: i32,
    /// Health at spawn
    pub starting_health: i32,
    /// Shield at spawn
    pub starting_shield: i32,
    /// Player One spawn
    pub spawn_one: Vec2,
    /// Player Two spawn
    pub spawn_two: Vec2,
    /// Frames an avatar must wait between shots (0 = every pressed frame)
    pub fire_cooldown_frames: u32,
    /// Tie-break for simultaneous defeat
    pub simultaneous_defeat: SimultaneousDefeat,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            avatar_width: AVATAR_SIZE,
            avatar_height: AVATAR_SIZE,
            move_speed: MOVE_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            shield_damage: SHIELD_DAMAGE,
            health_damage: HEALTH_DAMAGE,
            starting_health: STARTING_HEALTH,
            starting_shield: STARTING_SHIELD,
            spawn_one: SPAWN_ONE,
            spawn_two: SPAWN_TWO,
            fire_cooldown_frames: 0,
            simultaneous_defeat: SimultaneousDefeat::default(),
        }
    }
}

impl SimConfig {
    /// Playfield rectangle anchored at the origin.
    pub fn playfield(&self) -> Rect {
        Rect::new(Vec2::ZERO, self.playfield_width, self.playfield_height)
    }

    /// Spawn position for a slot.
    pub fn spawn(&self, slot: PlayerSlot) -> Vec2 {
        match slot {
            PlayerSlot::One => self.spawn_one,
            PlayerSlot::Two => self.spawn_two,
        }
    }

    /// Largest top-left position that keeps an avatar inside the playfield.
    pub fn max_avatar_position(&self) -> Vec2 {
        Vec2::new(
            self.playfield_width - self.avatar_width,
            self.playfield_height - self.avatar_height,
        )
    }

    /// Check every constant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("move_speed", self.move_speed),
            ("projectile_speed", self.projectile_speed),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("shield_damage", self.shield_damage),
            ("health_damage", self.health_damage),
            ("starting_health", self.starting_health),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.starting_shield < 0 {
            return Err(ConfigError::NegativeShield(self.starting_shield));
        }

        if self.avatar_width > self.playfield_width || self.avatar_height > self.playfield_height {
            return Err(ConfigError::AvatarTooLarge {
                width: self.avatar_width,
                height: self.avatar_height,
            });
        }

        let field = self.playfield();
        for slot in PlayerSlot::ALL {
            let spawn = self.spawn(slot);
            let body = Rect::new(spawn, self.avatar_width, self.avatar_height);
            if !field.contains_rect(&body) {
                return Err(ConfigError::SpawnOutOfBounds { slot, position: spawn });
            }
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A size, speed, damage or health constant is zero or negative.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: i32,
    },

    /// Starting shield below zero.
    #[error("starting_shield must not be negative, got {0}")]
    NegativeShield(i32),

    /// Avatar does not fit in the playfield.
    #[error("avatar {width}x{height} does not fit in the playfield")]
    AvatarTooLarge {
        /// Avatar width.
        width: Px,
        /// Avatar height.
        height: Px,
    },

    /// Spawn box leaves the playfield.
    #[error("{slot} spawn {position} is outside the playfield")]
    SpawnOutOfBounds {
        /// Slot whose spawn is invalid.
        slot: PlayerSlot,
        /// Configured spawn.
        position: Vec2,
    },
}

// =============================================================================
// TESTS
// =============================================================================
