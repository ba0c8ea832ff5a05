//! Intent Snapshots and Recording
//!
//! The per-frame intent vector consumed by the simulation step, plus a
//! delta-compressed recorder used for replays.

use serde::{Serialize, Deserialize};
use crate::core::geom::Vec2;
use crate::game::state::PlayerSlot;

// =============================================================================
// PLAYER INTENT
// =============================================================================

/// One player's actions for a single frame, packed into bits.
///
/// - Bit 0: move up held
/// - Bit 1: move down held
/// - Bit 2: move left held
/// - Bit 3: move right held
/// - Bit 4: shield held
/// - Bit 5: fire pressed this frame
/// - Bit 6-7: Reserved
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PlayerIntent {
    /// Packed action bits
    pub flags: u8,
}

impl PlayerIntent {
    /// Move up flag bit
    pub const UP: u8 = 0x01;

    /// Move down flag bit
    pub const DOWN: u8 = 0x02;

    /// Move left flag bit
    pub const LEFT: u8 = 0x04;

    /// Move right flag bit
    pub const RIGHT: u8 = 0x08;

    /// Shield flag bit
    pub const SHIELD: u8 = 0x10;

    /// Fire flag bit
    pub const FIRE: u8 = 0x20;

    /// Create an idle intent.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Builder: return a copy with `flag` set.
    pub const fn with(self, flag: u8) -> Self {
        Self { flags: self.flags | flag }
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// Check a flag.
    #[inline]
    pub fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Move up held.
    #[inline]
    pub fn up(&self) -> bool {
        self.has(Self::UP)
    }

    /// Move down held.
    #[inline]
    pub fn down(&self) -> bool {
        self.has(Self::DOWN)
    }

    /// Move left held.
    #[inline]
    pub fn left(&self) -> bool {
        self.has(Self::LEFT)
    }

    /// Move right held.
    #[inline]
    pub fn right(&self) -> bool {
        self.has(Self::RIGHT)
    }

    /// Shield control held.
    #[inline]
    pub fn shield_held(&self) -> bool {
        self.has(Self::SHIELD)
    }

    /// Fire pressed this frame.
    #[inline]
    pub fn fire_pressed(&self) -> bool {
        self.has(Self::FIRE)
    }

    /// Unit steps for each held direction, in application order:
    /// left, right, up, down (screen space, +y is down).
    pub fn directions(&self) -> impl Iterator<Item = Vec2> {
        let steps = [
            (Self::LEFT, Vec2::new(-1, 0)),
            (Self::RIGHT, Vec2::new(1, 0)),
            (Self::UP, Vec2::new(0, -1)),
            (Self::DOWN, Vec2::new(0, 1)),
        ];
        let flags = self.flags;
        steps
            .into_iter()
            .filter(move |(flag, _)| flags & flag != 0)
            .map(|(_, step)| step)
    }

    /// Check if no action is held or pressed.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }
}

// =============================================================================
// INTENT FRAME
// =============================================================================

/// Both players' intents for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntentFrame {
    /// Player One intent
    pub one: PlayerIntent,
    /// Player Two intent
    pub two: PlayerIntent,
}

impl IntentFrame {
    /// Create an idle frame.
    pub const fn new() -> Self {
        Self {
            one: PlayerIntent::new(),
            two: PlayerIntent::new(),
        }
    }

    /// Create a frame from both players' intents.
    pub const fn from_players(one: PlayerIntent, two: PlayerIntent) -> Self {
        Self { one, two }
    }

    /// Intent for a slot.
    #[inline]
    pub fn for_player(&self, slot: PlayerSlot) -> PlayerIntent {
        match slot {
            PlayerSlot::One => self.one,
            PlayerSlot::Two => self.two,
        }
    }

    /// Intent for a slot, mutably.
    #[inline]
    pub fn for_player_mut(&mut self, slot: PlayerSlot) -> &mut PlayerIntent {
        match slot {
            PlayerSlot::One => &mut self.one,
            PlayerSlot::Two => &mut self.two,
        }
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.one.is_idle() && self.two.is_idle()
    }
}

/// Delta entry: the frame an intent state began.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDelta {
    /// Frame when this intent began
    pub frame: u32,
    /// The new intent
    pub intent: IntentFrame,
}

// =============================================================================
// INTENT RECORDER
// =============================================================================

/// Complete intent recording for one match.
///
/// Only stores frames where the intent changed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IntentRecorder {
    /// Starting frame (usually 0)
    pub start_frame: u32,

    /// Last recorded frame
    pub end_frame: u32,

    /// Delta-compressed intents
    deltas: Vec<IntentDelta>,

    /// Has any frame been recorded or finalized
    recorded: bool,

    /// Last recorded intent (for delta comparison)
    #[serde(skip)]
    last_intent: IntentFrame,
}

impl IntentRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the intent for a frame.
    ///
    /// Only stores if the intent changed from the previous frame.
    pub fn record(&mut self, frame: u32, intent: IntentFrame) {
        self.end_frame = frame;
        self.recorded = true;

        if intent != self.last_intent {
            self.deltas.push(IntentDelta { frame, intent });
            self.last_intent = intent;
        }
    }

    /// Get the intent in effect at a frame.
    pub fn intent_at(&self, frame: u32) -> IntentFrame {
        // Last delta at or before this frame
        let idx = self.deltas.partition_point(|d| d.frame <= frame);

        if idx == 0 {
            IntentFrame::new()
        } else {
            self.deltas[idx - 1].intent
        }
    }

    /// Get all deltas.
    pub fn deltas(&self) -> &[IntentDelta] {
        &self.deltas
    }

    /// Number of delta entries.
    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Set the final frame (call at match end).
    pub fn finalize(&mut self, end_frame: u32) {
        self.end_frame = end_frame;
        self.recorded = true;
    }

    /// Expand back into one intent per frame, `start_frame..=end_frame`.
    pub fn to_frames(&self) -> Vec<IntentFrame> {
        self.replay_iter().map(|(_, intent)| intent).collect()
    }

    /// Create iterator over all intents for replay.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recorder: self,
            current_frame: self.start_frame,
            delta_idx: 0,
            current_intent: IntentFrame::new(),
            done: !self.recorded,
        }
    }
}

/// Iterator for replaying intents frame-by-frame.
pub struct ReplayIterator<'a> {
    recorder: &'a IntentRecorder,
    current_frame: u32,
    delta_idx: usize,
    current_intent: IntentFrame,
    done: bool,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u32, IntentFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.current_frame > self.recorder.end_frame {
            return None;
        }

        while let Some(delta) = self.recorder.deltas.get(self.delta_idx) {
            if delta.frame <= self.current_frame {
                self.current_intent = delta.intent;
                self.delta_idx += 1;
            } else {
                break;
            }
        }

        let result = (self.current_frame, self.current_intent);
        match self.current_frame.checked_add(1) {
            Some(next) => self.current_frame = next,
            None => self.done = true,
        }
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
