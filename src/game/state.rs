//! Simulation State Definitions
//!
//! Avatars, projectiles and the match phase. Two avatars live in a fixed
//! array indexed by `PlayerSlot`, so iteration order is always One, Two.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::geom::{Px, Rect, Vec2};
use crate::core::hash::{StateHash, StateHasher, compute_state_hash};
use crate::game::config::{ConfigError, SimConfig};

// =============================================================================
// PLAYER SLOT
// =============================================================================

/// Which of the two local players an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerSlot {
    /// Left-side player, fires toward +x
    One = 0,
    /// Right-side player, fires toward -x
    Two = 1,
}

impl PlayerSlot {
    /// Both slots in resolution order.
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Array index (0 or 1).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-facing player number (1 or 2).
    #[inline]
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// The other slot.
    #[inline]
    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Sign of this player's projectile velocity.
    #[inline]
    pub fn fire_direction(self) -> Px {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => -1,
        }
    }

    /// Body color.
    pub fn color(self) -> Color {
        match self {
            PlayerSlot::One => Color::Blue,
            PlayerSlot::Two => Color::Red,
        }
    }

    /// Shield outline color.
    pub fn shield_color(self) -> Color {
        match self {
            PlayerSlot::One => Color::Cyan,
            PlayerSlot::Two => Color::Yellow,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

// =============================================================================
// COLOR
// =============================================================================

/// Named draw colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    /// Player One body
    Blue = 0,
    /// Player Two body
    Red = 1,
    /// Player One shield
    Cyan = 2,
    /// Player Two shield
    Yellow = 3,
    /// HUD text
    White = 4,
}

// =============================================================================
// AVATAR
// =============================================================================

/// Which pool a hit drained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    /// The active shield absorbed the hit.
    Shield,
    /// The hit went to health.
    Health,
}

/// One combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    /// Owning slot
    pub slot: PlayerSlot,

    /// Top-left corner
    pub position: Vec2,

    /// Body width
    pub width: Px,

    /// Body height
    pub height: Px,

    /// Body color
    pub color: Color,

    /// Health, never below 0
    pub health: i32,

    /// Shield, never below 0
    pub shield: i32,

    /// Shield control held and shield remaining, as of this frame's arming
    pub shield_active: bool,

    /// Frames until this avatar may fire again
    pub fire_cooldown: u32,
}

impl Avatar {
    /// Create an avatar at its configured spawn.
    pub fn new(slot: PlayerSlot, config: &SimConfig) -> Self {
        Self {
            slot,
            position: config.spawn(slot),
            width: config.avatar_width,
            height: config.avatar_height,
            color: slot.color(),
            health: config.starting_health,
            shield: config.starting_shield,
            shield_active: false,
            fire_cooldown: 0,
        }
    }

    /// Body rectangle.
    #[inline]
    pub fn body(&self) -> Rect {
        Rect::new(self.position, self.width, self.height)
    }

    /// Center of the body, where projectiles spawn.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body().center()
    }

    /// True once health reaches 0.
    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// True if a hit right now would be absorbed by the shield.
    #[inline]
    pub fn shield_up(&self) -> bool {
        self.shield_active && self.shield > 0
    }

    /// Apply one projectile hit.
    pub fn take_hit(&mut self, config: &SimConfig) -> HitKind {
        if self.shield_up() {
            self.shield = self.shield.saturating_sub(config.shield_damage).max(0);
            HitKind::Shield
        } else {
            self.health = self.health.saturating_sub(config.health_damage).max(0);
            HitKind::Health
        }
    }

    /// Hash this avatar's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.slot as u8);
        hasher.update_vec2(self.position);
        hasher.update_px(self.width);
        hasher.update_px(self.height);
        hasher.update_i32(self.health);
        hasher.update_i32(self.shield);
        hasher.update_bool(self.shield_active);
        hasher.update_u32(self.fire_cooldown);
    }
}

// =============================================================================
// PROJECTILE
// =============================================================================

/// One fired shot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    /// Monotonic id within the match
    pub id: u32,

    /// Leading point; hit tests use this point only
    pub position: Vec2,

    /// Drawn width
    pub width: Px,

    /// Drawn height
    pub height: Px,

    /// Signed horizontal velocity per frame
    pub velocity_x: Px,

    /// Firer's color
    pub color: Color,

    /// Firer; never damaged by this projectile
    pub owner: PlayerSlot,
}

impl Projectile {
    /// Drawn rectangle.
    #[inline]
    pub fn body(&self) -> Rect {
        Rect::new(self.position, self.width, self.height)
    }

    /// Move one frame along x.
    #[inline]
    pub fn advance(&mut self) {
        self.position.x = self.position.x.wrapping_add(self.velocity_x);
    }

    /// True once the projectile has left the playfield horizontally.
    #[inline]
    pub fn is_out_of_bounds(&self, playfield_width: Px) -> bool {
        self.position.x < 0 || self.position.x > playfield_width
    }

    /// Hash this projectile's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id);
        hasher.update_vec2(self.position);
        hasher.update_px(self.velocity_x);
        hasher.update_u8(self.owner as u8);
    }
}

// =============================================================================
// PHASE & OUTCOME
// =============================================================================

/// Current phase of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum Phase {
    /// Active gameplay
    #[default]
    Running,
    /// Match over; state is frozen
    Ended,
}

/// How a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// One player won.
    Winner(PlayerSlot),
    /// Both players fell on the same frame and the policy reports a draw.
    Draw,
}

impl Outcome {
    /// Winning slot, if any.
    pub fn winner(self) -> Option<PlayerSlot> {
        match self {
            Outcome::Winner(slot) => Some(slot),
            Outcome::Draw => None,
        }
    }
}

// =============================================================================
// SIMULATION STATE
// =============================================================================

/// Complete state of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Frames simulated while running
    pub frame: u32,

    /// Current match phase
    pub phase: Phase,

    /// Set on the frame the match ends
    pub outcome: Option<Outcome>,

    /// Avatars indexed by `PlayerSlot::index`
    pub avatars: [Avatar; 2],

    /// Live projectiles in firing order
    pub projectiles: Vec<Projectile>,

    /// Next projectile id (monotonic counter)
    pub next_projectile_id: u32,
}

impl SimulationState {
    /// Create the initial state. `config` is expected to be valid.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            frame: 0,
            phase: Phase::Running,
            outcome: None,
            avatars: [
                Avatar::new(PlayerSlot::One, config),
                Avatar::new(PlayerSlot::Two, config),
            ],
            projectiles: Vec::new(),
            next_projectile_id: 0,
        }
    }

    /// Validate `config`, then create the initial state.
    pub fn try_new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Get an avatar by slot.
    #[inline]
    pub fn avatar(&self, slot: PlayerSlot) -> &Avatar {
        &self.avatars[slot.index()]
    }

    /// Get an avatar mutably by slot.
    #[inline]
    pub fn avatar_mut(&mut self, slot: PlayerSlot) -> &mut Avatar {
        &mut self.avatars[slot.index()]
    }

    /// True while the step still mutates this state.
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    /// Check if match has ended.
    #[inline]
    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended)
    }

    /// Winner, if the match ended with one.
    pub fn winner(&self) -> Option<PlayerSlot> {
        self.outcome.and_then(Outcome::winner)
    }

    /// Fire a projectile from `slot`'s center. Returns the new projectile id.
    pub fn spawn_projectile(&mut self, slot: PlayerSlot, config: &SimConfig) -> u32 {
        let id = self.next_projectile_id;
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);

        let firer = self.avatar(slot);
        let projectile = Projectile {
            id,
            position: firer.center(),
            width: config.projectile_width,
            height: config.projectile_height,
            velocity_x: config.projectile_speed * slot.fire_direction(),
            color: firer.color,
            owner: slot,
        };
        self.projectiles.push(projectile);
        id
    }

    /// Freeze the match with `outcome`.
    pub fn end(&mut self, outcome: Outcome) {
        self.phase = Phase::Ended;
        self.outcome = Some(outcome);
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, |hasher| {
            hasher.update_bool(self.is_ended());
            match self.outcome {
                None => hasher.update_u8(0),
                Some(Outcome::Winner(slot)) => {
                    hasher.update_u8(1);
                    hasher.update_u8(slot as u8);
                }
                Some(Outcome::Draw) => hasher.update_u8(2),
            }

            for avatar in &self.avatars {
                avatar.hash_into(hasher);
            }

            hasher.update_u32(self.projectiles.len() as u32);
            for projectile in &self.projectiles {
                projectile.hash_into(hasher);
            }

            hasher.update_u32(self.next_projectile_id);
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_opponent_and_direction() {
        assert_eq!(PlayerSlot::One.opponent(), PlayerSlot::Two);
        assert_eq!(PlayerSlot::Two.opponent(), PlayerSlot::One);
        assert_eq!(PlayerSlot::One.fire_direction(), 1);
        assert_eq!(PlayerSlot::Two.fire_direction(), -1);
        assert_eq!(PlayerSlot::Two.to_string(), "Player 2");
    }

    #[test]
    fn test_initial_state_matches_reference() {
        let state = SimulationState::new(&SimConfig::default());
        let one = state.avatar(PlayerSlot::One);
        let two = state.avatar(PlayerSlot::Two);

        assert_eq!(one.position, Vec2::new(100, 300));
        assert_eq!(two.position, Vec2::new(600, 300));
        assert_eq!(one.color, Color::Blue);
        assert_eq!(two.color, Color::Red);
        assert_eq!((one.health, one.shield), (100, 100));
        assert!(!one.shield_active);
        assert!(state.is_running());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_try_new_rejects_bad_config() {
        let config = SimConfig {
            avatar_width: 0,
            ..SimConfig::default()
        };
        assert!(SimulationState::try_new(&config).is_err());
    }

    #[test]
    fn test_spawn_projectile_from_center() {
        let config = SimConfig::default();
        let mut state = SimulationState::new(&config);

        let first = state.spawn_projectile(PlayerSlot::One, &config);
        let second = state.spawn_projectile(PlayerSlot::Two, &config);
        assert_eq!((first, second), (0, 1));

        let p1 = &state.projectiles[0];
        assert_eq!(p1.position, Vec2::new(120, 320));
        assert_eq!(p1.velocity_x, 7);
        assert_eq!(p1.color, Color::Blue);
        assert_eq!(p1.owner, PlayerSlot::One);

        let p2 = &state.projectiles[1];
        assert_eq!(p2.position, Vec2::new(620, 320));
        assert_eq!(p2.velocity_x, -7);
        assert_eq!(p2.color, Color::Red);
    }

    #[test]
    fn test_take_hit_prefers_active_shield() {
        let config = SimConfig::default();
        let mut avatar = Avatar::new(PlayerSlot::One, &config);

        avatar.shield_active = true;
        assert_eq!(avatar.take_hit(&config), HitKind::Shield);
        assert_eq!((avatar.health, avatar.shield), (100, 80));

        avatar.shield_active = false;
        assert_eq!(avatar.take_hit(&config), HitKind::Health);
        assert_eq!((avatar.health, avatar.shield), (90, 80));
    }

    #[test]
    fn test_take_hit_clamps_at_zero() {
        let config = SimConfig::default();
        let mut avatar = Avatar::new(PlayerSlot::Two, &config);
        avatar.shield = 10;
        avatar.shield_active = true;
        avatar.take_hit(&config);
        assert_eq!(avatar.shield, 0);

        // Depleted shield no longer absorbs
        assert_eq!(avatar.take_hit(&config), HitKind::Health);

        avatar.health = 5;
        avatar.take_hit(&config);
        assert_eq!(avatar.health, 0);
        assert!(avatar.is_defeated());
    }

    #[test]
    fn test_hash_tracks_changes() {
        let config = SimConfig::default();
        let state1 = SimulationState::new(&config);
        let mut state2 = SimulationState::new(&config);

        assert_eq!(state1.compute_hash(), state2.compute_hash());

        state2.avatar_mut(PlayerSlot::Two).health -= 10;
        assert_ne!(state1.compute_hash(), state2.compute_hash());
    }

    #[test]
    fn test_end_freezes_phase() {
        let mut state = SimulationState::new(&SimConfig::default());
        state.end(Outcome::Winner(PlayerSlot::One));
        assert!(state.is_ended());
        assert_eq!(state.winner(), Some(PlayerSlot::One));

        state.end(Outcome::Draw);
        assert_eq!(state.winner(), None);
    }
}
