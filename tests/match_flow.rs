//! Whole-match behavior driven through the public API.

use proptest::prelude::*;

use shield_duel::game::controls::{FirePolicy, Key, KeyEvent, KeyboardMapper, ControlScheme};
use shield_duel::game::events::GameEventData;
use shield_duel::game::input::IntentRecorder;
use shield_duel::game::state::HitKind;
use shield_duel::present::build_scene;
use shield_duel::{
    advance, IntentFrame, Outcome, PlayerIntent, PlayerSlot, SimConfig, SimulationState,
};

fn intent_from_bits(one: u8, two: u8) -> IntentFrame {
    IntentFrame::from_players(
        PlayerIntent { flags: one & 0x3F },
        PlayerIntent { flags: two & 0x3F },
    )
}

fn fire_two() -> IntentFrame {
    IntentFrame::from_players(PlayerIntent::new(), PlayerIntent::new().with(PlayerIntent::FIRE))
}

#[test]
fn single_shot_reaches_player_one_within_range() {
    let config = SimConfig::default();
    let mut state = SimulationState::new(&config);

    advance(&mut state, &fire_two(), &config);

    // 500 px gap at 7 px per frame
    let mut hit_frame = None;
    for _ in 1..72 {
        let result = advance(&mut state, &IntentFrame::new(), &config);
        if result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::AvatarHit { target: PlayerSlot::One, .. }))
        {
            hit_frame = Some(state.frame);
            break;
        }
    }

    assert_eq!(hit_frame, Some(69));
    assert_eq!(state.avatar(PlayerSlot::One).health, 90);
    assert_eq!(state.avatar(PlayerSlot::One).shield, 100);
    assert!(state.projectiles.is_empty());
    assert!(state.is_running());
}

#[test]
fn sustained_fire_wins_the_match() {
    let config = SimConfig::default();
    let mut state = SimulationState::new(&config);
    let mut outcome = None;

    for _ in 0..200 {
        let result = advance(&mut state, &fire_two(), &config);
        if result.outcome.is_some() {
            outcome = result.outcome;
            break;
        }
    }

    // Ten consecutive shots land on frames 69 through 78
    assert_eq!(outcome, Some(Outcome::Winner(PlayerSlot::Two)));
    assert_eq!(state.frame, 78);
    assert_eq!(state.avatar(PlayerSlot::One).health, 0);
    assert_eq!(state.winner(), Some(PlayerSlot::Two));

    let scene = build_scene(&state, &config);
    assert_eq!(scene.banner.as_deref(), Some("Player 2 Wins!"));
}

#[test]
fn shield_soaks_hits_before_health() {
    let config = SimConfig::default();
    let mut state = SimulationState::new(&config);
    let shielded = IntentFrame::from_players(
        PlayerIntent::new().with(PlayerIntent::SHIELD),
        PlayerIntent::new().with(PlayerIntent::FIRE),
    );

    let mut kinds = Vec::new();
    for _ in 0..80 {
        let result = advance(&mut state, &shielded, &config);
        for event in result.events {
            if let GameEventData::AvatarHit { kind, .. } = event.data {
                kinds.push(kind);
            }
        }
    }

    // Frames 69..=80 land 12 hits: five drain the shield, the rest hit health
    assert_eq!(kinds.len(), 12);
    assert!(kinds[..5].iter().all(|k| *k == HitKind::Shield));
    assert!(kinds[5..].iter().all(|k| *k == HitKind::Health));

    let one = state.avatar(PlayerSlot::One);
    assert_eq!(one.shield, 0);
    assert_eq!(one.health, 30);
    assert!(!one.shield_up());
}

#[test]
fn keyboard_events_drive_the_step() {
    let config = SimConfig::default();
    let mut state = SimulationState::new(&config);
    let mut mapper = KeyboardMapper::default();

    for name in ["d", "ArrowUp", "M"] {
        mapper.handle(KeyEvent::down(Key::from_dom_key(name)));
    }
    mapper.handle(KeyEvent::down(Key::from_dom_key(" ")));

    let intent = mapper.snapshot();
    let result = advance(&mut state, &intent, &config);

    assert_eq!(state.avatar(PlayerSlot::One).position.x, 105);
    assert_eq!(state.avatar(PlayerSlot::Two).position.y, 295);
    assert!(state.avatar(PlayerSlot::Two).shield_up());
    assert_eq!(state.projectiles.len(), 1);
    assert!(matches!(
        result.events[0].data,
        GameEventData::ProjectileFired { owner: PlayerSlot::One, .. }
    ));

    // Fire was consumed, movement keys are still held
    let next = mapper.snapshot();
    assert!(!next.one.fire_pressed());
    assert!(next.one.right());

    mapper.handle(KeyEvent::up(Key::D));
    assert!(!mapper.snapshot().one.right());
}

#[test]
fn held_fire_key_respects_policy() {
    let config = SimConfig::default();

    let shots = |policy: FirePolicy| {
        let mut mapper = KeyboardMapper::new(ControlScheme::default(), policy);
        let mut state = SimulationState::new(&config);
        mapper.handle(KeyEvent::down(Key::Enter));
        advance(&mut state, &mapper.snapshot(), &config);
        for _ in 0..4 {
            mapper.handle(KeyEvent::repeat(Key::Enter));
            advance(&mut state, &mapper.snapshot(), &config);
        }
        state.projectiles.len()
    };

    assert_eq!(shots(FirePolicy::EveryKeyDown), 5);
    assert_eq!(shots(FirePolicy::IgnoreRepeats), 1);
}

#[test]
fn recorded_match_replays_identically() {
    let config = SimConfig::default();
    let initial = SimulationState::new(&config);
    let mut state = initial.clone();
    let mut recorder = IntentRecorder::new();

    for frame in 0..150u32 {
        let one = if frame % 30 < 10 { PlayerIntent::UP } else { PlayerIntent::FIRE };
        let two = if frame % 17 == 0 { PlayerIntent::FIRE } else { PlayerIntent::SHIELD };
        let intent = intent_from_bits(one, two);
        recorder.record(frame, intent);
        if advance(&mut state, &intent, &config).match_ended() {
            break;
        }
    }

    let (replayed, _) = shield_duel::game::step::replay_match(initial, &recorder.to_frames(), &config);
    assert_eq!(replayed, state);
    assert_eq!(replayed.compute_hash(), state.compute_hash());
}

#[test]
fn ended_match_ignores_further_steps() {
    let config = SimConfig::default();
    let mut state = SimulationState::new(&config);
    state.avatar_mut(PlayerSlot::Two).health = 0;

    let ending = advance(&mut state, &IntentFrame::new(), &config);
    assert_eq!(ending.winner(), Some(PlayerSlot::One));

    let frozen = state.clone();
    let busy = intent_from_bits(0x3F, 0x3F);
    for _ in 0..10 {
        let result = advance(&mut state, &busy, &config);
        assert!(result.events.is_empty());
        assert_eq!(result.outcome, None);
    }
    assert_eq!(state, frozen);
}

proptest! {
    #[test]
    fn avatars_stay_inside_playfield(
        steps in prop::collection::vec((any::<u8>(), any::<u8>()), 0..400)
    ) {
        let config = SimConfig::default();
        let mut state = SimulationState::new(&config);
        let max = config.max_avatar_position();

        for (one, two) in steps {
            advance(&mut state, &intent_from_bits(one, two), &config);

            for avatar in &state.avatars {
                prop_assert!(avatar.position.x >= 0 && avatar.position.x <= max.x);
                prop_assert!(avatar.position.y >= 0 && avatar.position.y <= max.y);
                prop_assert!(avatar.health >= 0);
                prop_assert!(avatar.shield >= 0);
            }
            for projectile in &state.projectiles {
                prop_assert!(!projectile.is_out_of_bounds(config.playfield_width));
            }
        }
    }

    #[test]
    fn identical_inputs_give_identical_hashes(
        steps in prop::collection::vec((any::<u8>(), any::<u8>()), 0..300)
    ) {
        let config = SimConfig::default();
        let mut a = SimulationState::new(&config);
        let mut b = SimulationState::new(&config);

        for (one, two) in steps {
            let intent = intent_from_bits(one, two);
            let ra = advance(&mut a, &intent, &config);
            let rb = advance(&mut b, &intent, &config);
            prop_assert_eq!(ra, rb);
        }
        prop_assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn outcome_reported_exactly_once(
        steps in prop::collection::vec((any::<u8>(), any::<u8>()), 0..600)
    ) {
        let config = SimConfig::default();
        let mut state = SimulationState::new(&config);
        let mut endings = 0;

        for (one, two) in steps {
            let result = advance(&mut state, &intent_from_bits(one, two), &config);
            if result.outcome.is_some() {
                endings += 1;
                prop_assert!(state.is_ended());
            }
        }

        prop_assert!(endings <= 1);
        prop_assert_eq!(endings == 1, state.is_ended());
    }
}
