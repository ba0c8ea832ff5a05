//! Shield Duel headless demo
//!
//! Runs a scripted match through the keyboard mapper and the simulation
//! step, then replays the recorded intents to check determinism.

use anyhow::{bail, Context};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shield_duel::{
    FRAME_RATE, VERSION,
    game::{
        config::SimConfig,
        controls::{Key, KeyEvent, KeyboardMapper},
        events::GameEventData,
        input::IntentRecorder,
        state::SimulationState,
        step::{advance, replay_match},
    },
    present::build_scene,
};

/// Upper bound on demo length (two minutes of play)
const MAX_FRAMES: u32 = FRAME_RATE * 120;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Shield Duel v{}", VERSION);
    info!("Frame Rate: {} Hz", FRAME_RATE);

    demo_match()
}

/// Key events the demo "players" produce before a given frame.
fn scripted_events(frame: u32) -> Vec<KeyEvent> {
    let mut events = Vec::new();

    // Player One turtles behind the shield for the opening seconds
    if frame == 0 {
        events.push(KeyEvent::down(Key::Q));
    }
    if frame == 200 {
        events.push(KeyEvent::up(Key::Q));
    }
    if frame % 20 == 0 {
        events.push(KeyEvent::down(Key::Space));
        events.push(KeyEvent::up(Key::Space));
    }

    // Player Two fires a little slower and sidesteps now and then
    if frame % 25 == 0 {
        events.push(KeyEvent::down(Key::Enter));
        events.push(KeyEvent::up(Key::Enter));
    }
    match frame % 300 {
        100 => events.push(KeyEvent::down(Key::ArrowUp)),
        112 => events.push(KeyEvent::up(Key::ArrowUp)),
        160 => events.push(KeyEvent::down(Key::ArrowDown)),
        172 => events.push(KeyEvent::up(Key::ArrowDown)),
        _ => {}
    }

    events
}

/// Demo function to exercise the simulation.
fn demo_match() -> anyhow::Result<()> {
    info!("=== Starting Demo Match ===");

    let config = SimConfig::default();
    let initial = SimulationState::try_new(&config).context("invalid simulation config")?;
    let mut state = initial.clone();

    let mut mapper = KeyboardMapper::default();
    let mut recorder = IntentRecorder::new();
    let mut hits = 0;

    for frame in 0..MAX_FRAMES {
        for event in scripted_events(frame) {
            mapper.handle(event);
        }

        let intent = mapper.snapshot();
        recorder.record(frame, intent);

        let result = advance(&mut state, &intent, &config);

        for event in &result.events {
            match &event.data {
                GameEventData::AvatarHit { target, kind, health, shield, .. } => {
                    hits += 1;
                    info!(
                        "Frame {}: {} hit ({:?}) -> health {}, shield {}",
                        event.frame, target, kind, health, shield
                    );
                }
                GameEventData::MatchEnded { outcome } => {
                    info!("Match ended at frame {}: {:?}", event.frame, outcome);
                }
                _ => {}
            }
        }

        if result.match_ended() {
            break;
        }
    }
    recorder.finalize(state.frame.saturating_sub(1));

    // Print final results
    info!("=== Match Results ===");
    let scene = build_scene(&state, &config);
    if let Some(banner) = &scene.banner {
        info!("{}", banner);
    } else {
        info!("No winner after {} frames", state.frame);
    }
    for avatar in &state.avatars {
        info!("{}: health {}, shield {}", avatar.slot, avatar.health, avatar.shield);
    }
    info!("Total hits: {}", hits);
    info!("Intent deltas recorded: {}", recorder.delta_count());
    debug!("Final scene: {}", scene.to_json().context("failed to serialize scene")?);

    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let (replayed, _) = replay_match(initial, &recorder.to_frames(), &config);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        bail!("determinism failure: replay hash differs");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");

    Ok(())
}
