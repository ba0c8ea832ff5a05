//! Simulation Step
//!
//! The per-frame state transition. Runs to completion, touches no I/O and
//! is fully deterministic: the same state and intent always produce the
//! same next state.

use tracing::{debug, trace};

use crate::core::geom::Rect;
use crate::game::collision::{check_projectile_hit, target_of};
use crate::game::config::{SimConfig, SimultaneousDefeat};
use crate::game::events::GameEvent;
use crate::game::input::IntentFrame;
use crate::game::state::{Outcome, Phase, PlayerSlot, SimulationState};

/// Result of a step.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Events generated this step
    pub events: Vec<GameEvent>,
    /// Set only on the step that ended the match
    pub outcome: Option<Outcome>,
}

impl StepResult {
    /// Whether the match ended this step.
    pub fn match_ended(&self) -> bool {
        self.outcome.is_some()
    }

    /// Winner, if the match ended this step with one.
    pub fn winner(&self) -> Option<PlayerSlot> {
        self.outcome.and_then(Outcome::winner)
    }
}

/// Run one simulation step.
///
/// # Arguments
///
/// * `state` - The match state (will be mutated)
/// * `intent` - Both players' intents for this frame
/// * `config` - Match configuration
///
/// # Order
///
/// 1. Shield arming
/// 2. Movement (steps that would leave the playfield are dropped)
/// 3. Fire
/// 4. Projectile advance, hits and out-of-bounds removal
/// 5. Termination check
///
/// Once the match has ended this is a no-op that returns an empty result.
pub fn advance(state: &mut SimulationState, intent: &IntentFrame, config: &SimConfig) -> StepResult {
    let mut result = StepResult::default();

    match state.phase {
        Phase::Ended => return result,
        Phase::Running => {}
    }

    // 0. Advance frame counter
    state.frame = state.frame.wrapping_add(1);

    // 1. Arm or drop shields
    arm_shields(state, intent);

    // 2. Move avatars
    move_avatars(state, intent, config);

    // 3. Spawn projectiles
    fire_projectiles(state, intent, config, &mut result);

    // 4. Advance projectiles and resolve hits
    advance_projectiles(state, config, &mut result);

    // 5. Check end conditions
    check_end_conditions(state, config, &mut result);

    result
}

/// Shield is active only while held and not depleted.
fn arm_shields(state: &mut SimulationState, intent: &IntentFrame) {
    for slot in PlayerSlot::ALL {
        let held = intent.for_player(slot).shield_held();
        let avatar = state.avatar_mut(slot);
        avatar.shield_active = held && avatar.shield > 0;
    }
}

/// Apply each held direction in turn. A step that would take the body
/// outside the playfield is dropped.
fn move_avatars(state: &mut SimulationState, intent: &IntentFrame, config: &SimConfig) {
    let field = config.playfield();

    for slot in PlayerSlot::ALL {
        let avatar = state.avatar_mut(slot);

        for step in intent.for_player(slot).directions() {
            let next = avatar.position + step.scale(config.move_speed);
            if field.contains_rect(&Rect::new(next, avatar.width, avatar.height)) {
                avatar.position = next;
            }
        }
    }
}

/// Spawn one projectile per avatar that pressed fire and is off cooldown.
fn fire_projectiles(
    state: &mut SimulationState,
    intent: &IntentFrame,
    config: &SimConfig,
    result: &mut StepResult,
) {
    for slot in PlayerSlot::ALL {
        {
            let avatar = state.avatar_mut(slot);
            if avatar.fire_cooldown > 0 {
                avatar.fire_cooldown -= 1;
                continue;
            }
            if !intent.for_player(slot).fire_pressed() {
                continue;
            }
            avatar.fire_cooldown = config.fire_cooldown_frames;
        }

        let projectile_id = state.spawn_projectile(slot, config);
        let origin = state.avatar(slot).center();
        trace!(player = %slot, projectile_id, x = origin.x, y = origin.y, "projectile fired");
        result
            .events
            .push(GameEvent::projectile_fired(state.frame, slot, projectile_id, origin));
    }
}

/// Advance every projectile and keep the survivors, in order.
///
/// Reads the whole collection once and rebuilds it, so a removed
/// projectile is never tested again this frame.
fn advance_projectiles(state: &mut SimulationState, config: &SimConfig, result: &mut StepResult) {
    let frame = state.frame;
    let in_flight = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(in_flight.len());

    for mut projectile in in_flight {
        projectile.advance();

        let target_slot = target_of(&projectile);
        let target = state.avatar_mut(target_slot);

        if check_projectile_hit(&projectile, target) {
            let kind = target.take_hit(config);
            debug!(
                target = %target_slot,
                projectile_id = projectile.id,
                ?kind,
                health = target.health,
                shield = target.shield,
                "avatar hit"
            );
            result.events.push(GameEvent::avatar_hit(
                frame,
                target_slot,
                projectile.id,
                kind,
                target.health,
                target.shield,
            ));
            continue;
        }

        if projectile.is_out_of_bounds(config.playfield_width) {
            trace!(projectile_id = projectile.id, x = projectile.position.x, "projectile expired");
            result
                .events
                .push(GameEvent::projectile_expired(frame, projectile.id));
            continue;
        }

        survivors.push(projectile);
    }

    state.projectiles = survivors;
}

/// Check if match should end.
fn check_end_conditions(state: &mut SimulationState, config: &SimConfig, result: &mut StepResult) {
    let one_down = state.avatar(PlayerSlot::One).is_defeated();
    let two_down = state.avatar(PlayerSlot::Two).is_defeated();

    let outcome = match (one_down, two_down) {
        (false, false) => return,
        (true, false) => Outcome::Winner(PlayerSlot::Two),
        (false, true) => Outcome::Winner(PlayerSlot::One),
        (true, true) => match config.simultaneous_defeat {
            SimultaneousDefeat::PlayerOneCheckedFirst => Outcome::Winner(PlayerSlot::Two),
            SimultaneousDefeat::Draw => Outcome::Draw,
        },
    };

    end_match(state, outcome, result);
}

/// End the match.
fn end_match(state: &mut SimulationState, outcome: Outcome, result: &mut StepResult) {
    state.end(outcome);
    result.outcome = Some(outcome);

    debug!(frame = state.frame, ?outcome, "match ended");
    result.events.push(GameEvent::match_ended(state.frame, outcome));
}

/// Replay a match from recorded intents.
///
/// Stops at the first step that ends the match. Returns the final state and
/// every event produced.
pub fn replay_match(
    initial_state: SimulationState,
    frames: &[IntentFrame],
    config: &SimConfig,
) -> (SimulationState, Vec<GameEvent>) {
    let mut state = initial_state;
    let mut all_events = Vec::new();

    for intent in frames {
        let result = advance(&mut state, intent, config);
        all_events.extend(result.events);

        if result.outcome.is_some() {
            break;
        }
    }

    (state, all_events)
}
