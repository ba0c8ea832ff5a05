//! Keyboard Controls
//!
//! Maps raw key events to per-frame `IntentFrame` snapshots.
//!
//! Platform code calls `KeyboardMapper::handle` for every key event it
//! receives and `KeyboardMapper::snapshot` once per frame, right before the
//! simulation step. Movement and shield are held states; fire is latched on
//! key-down and consumed by exactly one snapshot.

use serde::{Serialize, Deserialize};
use crate::game::input::{IntentFrame, PlayerIntent};
use crate::game::state::PlayerSlot;

// =============================================================================
// KEYS
// =============================================================================

/// Keys the game binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Key {
    /// Player One up
    W = 0,
    /// Player One left
    A = 1,
    /// Player One down
    S = 2,
    /// Player One right
    D = 3,
    /// Player One shield
    Q = 4,
    /// Player One fire
    Space = 5,
    /// Player Two up
    ArrowUp = 6,
    /// Player Two down
    ArrowDown = 7,
    /// Player Two left
    ArrowLeft = 8,
    /// Player Two right
    ArrowRight = 9,
    /// Player Two shield
    M = 10,
    /// Player Two fire
    Enter = 11,
    /// Any key without a binding
    Other = 12,
}

impl Key {
    /// Number of distinct keys (including `Other`).
    pub const COUNT: usize = 13;

    /// Map a DOM `KeyboardEvent.key` value.
    ///
    /// Letters match in either case.
    pub fn from_dom_key(name: &str) -> Key {
        match name {
            "w" | "W" => Key::W,
            "a" | "A" => Key::A,
            "s" | "S" => Key::S,
            "d" | "D" => Key::D,
            "q" | "Q" => Key::Q,
            "m" | "M" => Key::M,
            " " | "Spacebar" => Key::Space,
            "Enter" => Key::Enter,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// A raw key transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key involved
    pub key: Key,
    /// true = key-down, false = key-up
    pub pressed: bool,
    /// Key-down generated by OS auto-repeat
    pub repeat: bool,
}

impl KeyEvent {
    /// Initial key-down.
    pub const fn down(key: Key) -> Self {
        Self { key, pressed: true, repeat: false }
    }

    /// Auto-repeated key-down.
    pub const fn repeat(key: Key) -> Self {
        Self { key, pressed: true, repeat: true }
    }

    /// Key-up.
    pub const fn up(key: Key) -> Self {
        Self { key, pressed: false, repeat: false }
    }
}

// =============================================================================
// BINDINGS
// =============================================================================

/// One player's key bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBindings {
    /// Move up
    pub up: Key,
    /// Move down
    pub down: Key,
    /// Move left
    pub left: Key,
    /// Move right
    pub right: Key,
    /// Hold shield
    pub shield: Key,
    /// Fire
    pub fire: Key,
}

impl PlayerBindings {
    /// Intent flag bound to `key`, if any.
    fn flag_for(&self, key: Key) -> Option<u8> {
        [
            (self.up, PlayerIntent::UP),
            (self.down, PlayerIntent::DOWN),
            (self.left, PlayerIntent::LEFT),
            (self.right, PlayerIntent::RIGHT),
            (self.shield, PlayerIntent::SHIELD),
            (self.fire, PlayerIntent::FIRE),
        ]
        .into_iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, flag)| flag)
    }
}

/// Bindings for both players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    /// Player One bindings
    pub one: PlayerBindings,
    /// Player Two bindings
    pub two: PlayerBindings,
}

impl Default for ControlScheme {
    /// P1: WASD, Q shield, Space fire. P2: arrows, M shield, Enter fire.
    fn default() -> Self {
        Self {
            one: PlayerBindings {
                up: Key::W,
                down: Key::S,
                left: Key::A,
                right: Key::D,
                shield: Key::Q,
                fire: Key::Space,
            },
            two: PlayerBindings {
                up: Key::ArrowUp,
                down: Key::ArrowDown,
                left: Key::ArrowLeft,
                right: Key::ArrowRight,
                shield: Key::M,
                fire: Key::Enter,
            },
        }
    }
}

impl ControlScheme {
    /// Bindings for a slot.
    pub fn for_player(&self, slot: PlayerSlot) -> &PlayerBindings {
        match slot {
            PlayerSlot::One => &self.one,
            PlayerSlot::Two => &self.two,
        }
    }
}

/// Which key-downs on a fire key produce a shot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirePolicy {
    /// Every key-down fires, auto-repeat included.
    #[default]
    EveryKeyDown,
    /// Only the transition from released to pressed fires.
    IgnoreRepeats,
}

// =============================================================================
// MAPPER
// =============================================================================

/// Turns key events into intent snapshots.
#[derive(Clone, Debug)]
pub struct KeyboardMapper {
    scheme: ControlScheme,
    policy: FirePolicy,
    held: [bool; Key::COUNT],
    fire_latched: [bool; 2],
}

impl Default for KeyboardMapper {
    fn default() -> Self {
        Self::new(ControlScheme::default(), FirePolicy::default())
    }
}

impl KeyboardMapper {
    /// Create a mapper with nothing held.
    pub fn new(scheme: ControlScheme, policy: FirePolicy) -> Self {
        Self {
            scheme,
            policy,
            held: [false; Key::COUNT],
            fire_latched: [false; 2],
        }
    }

    /// Active bindings.
    pub fn scheme(&self) -> &ControlScheme {
        &self.scheme
    }

    /// Active fire policy.
    pub fn policy(&self) -> FirePolicy {
        self.policy
    }

    /// Check if a key is currently held.
    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Feed one raw key event.
    pub fn handle(&mut self, event: KeyEvent) {
        if event.key == Key::Other {
            return;
        }

        let was_held = self.held[event.key.index()];
        self.held[event.key.index()] = event.pressed;

        if !event.pressed {
            return;
        }

        let fires = match self.policy {
            FirePolicy::EveryKeyDown => true,
            FirePolicy::IgnoreRepeats => !event.repeat && !was_held,
        };
        if !fires {
            return;
        }

        for slot in PlayerSlot::ALL {
            if self.scheme.for_player(slot).fire == event.key {
                self.fire_latched[slot.index()] = true;
            }
        }
    }

    /// Release every key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held = [false; Key::COUNT];
        self.fire_latched = [false; 2];
    }

    /// Build this frame's intent and consume pending fire presses.
    pub fn snapshot(&mut self) -> IntentFrame {
        let mut frame = IntentFrame::new();

        for slot in PlayerSlot::ALL {
            let bindings = *self.scheme.for_player(slot);
            let intent = frame.for_player_mut(slot);

            for key in [bindings.up, bindings.down, bindings.left, bindings.right, bindings.shield] {
                if self.held[key.index()] {
                    if let Some(flag) = bindings.flag_for(key) {
                        intent.set(flag, true);
                    }
                }
            }

            if std::mem::take(&mut self.fire_latched[slot.index()]) {
                intent.set(PlayerIntent::FIRE, true);
            }
        }

        frame
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_names() {
        assert_eq!(Key::from_dom_key("w"), Key::W);
        assert_eq!(Key::from_dom_key("W"), Key::W);
        assert_eq!(Key::from_dom_key(" "), Key::Space);
        assert_eq!(Key::from_dom_key("Enter"), Key::Enter);
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key("x"), Key::Other);
    }

    #[test]
    fn test_held_movement_and_shield() {
        let mut mapper = KeyboardMapper::default();
        mapper.handle(KeyEvent::down(Key::D));
        mapper.handle(KeyEvent::down(Key::Q));
        mapper.handle(KeyEvent::down(Key::ArrowUp));

        let frame = mapper.snapshot();
        assert!(frame.one.right());
        assert!(frame.one.shield_held());
        assert!(frame.two.up());
        assert!(!frame.two.shield_held());

        // Held keys persist across snapshots
        let frame = mapper.snapshot();
        assert!(frame.one.right());

        mapper.handle(KeyEvent::up(Key::Q));
        let frame = mapper.snapshot();
        assert!(!frame.one.shield_held());
        assert!(frame.one.right());
    }

    #[test]
    fn test_fire_consumed_by_one_snapshot() {
        let mut mapper = KeyboardMapper::default();
        mapper.handle(KeyEvent::down(Key::Enter));

        assert!(mapper.snapshot().two.fire_pressed());
        // Still held, but the press was consumed
        assert!(!mapper.snapshot().two.fire_pressed());
        assert!(mapper.is_held(Key::Enter));
    }

    #[test]
    fn test_fire_survives_release_before_snapshot() {
        let mut mapper = KeyboardMapper::default();
        mapper.handle(KeyEvent::down(Key::Space));
        mapper.handle(KeyEvent::up(Key::Space));

        assert!(mapper.snapshot().one.fire_pressed());
    }

    #[test]
    fn test_every_key_down_fires_on_repeat() {
        let mut mapper = KeyboardMapper::default();
        mapper.handle(KeyEvent::down(Key::Space));
        assert!(mapper.snapshot().one.fire_pressed());

        mapper.handle(KeyEvent::repeat(Key::Space));
        assert!(mapper.snapshot().one.fire_pressed());
    }

    #[test]
    fn test_ignore_repeats_policy() {
        let mut mapper = KeyboardMapper::new(ControlScheme::default(), FirePolicy::IgnoreRepeats);
        mapper.handle(KeyEvent::down(Key::Space));
        assert!(mapper.snapshot().one.fire_pressed());

        mapper.handle(KeyEvent::repeat(Key::Space));
        assert!(!mapper.snapshot().one.fire_pressed());

        // A second key-down without release is still a repeat
        mapper.handle(KeyEvent::down(Key::Space));
        assert!(!mapper.snapshot().one.fire_pressed());

        mapper.handle(KeyEvent::up(Key::Space));
        mapper.handle(KeyEvent::down(Key::Space));
        assert!(mapper.snapshot().one.fire_pressed());
    }

    #[test]
    fn test_multiple_presses_in_one_frame_fire_once() {
        let mut mapper = KeyboardMapper::default();
        mapper.handle(KeyEvent::down(Key::Space));
        mapper.handle(KeyEvent::repeat(Key::Space));
        mapper.handle(KeyEvent::repeat(Key::Space));

        let frame = mapper.snapshot();
        assert!(frame.one.fire_pressed());
        assert!(!frame.two.fire_pressed());
    }

    #[test]
    fn test_release_all() {
        let mut mapper = KeyboardMapper::default();
        mapper.handle(KeyEvent::down(Key::A));
        mapper.handle(KeyEvent::down(Key::Enter));
        mapper.release_all();

        assert!(mapper.snapshot().is_idle());
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut mapper = KeyboardMapper::default();
        mapper.handle(KeyEvent::down(Key::Other));
        assert!(mapper.snapshot().is_idle());
    }
}
