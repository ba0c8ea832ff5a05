//! Scene Builder
//!
//! Turns a simulation snapshot into a renderer-agnostic draw list. The
//! list is in paint order: clear, avatars, projectiles, shield outlines,
//! HUD text. The end-of-match banner is reported separately because it
//! lives outside the playfield.

use serde::Serialize;

use crate::core::geom::{Px, Rect, Vec2};
use crate::game::config::SimConfig;
use crate::game::state::{Avatar, Color, Outcome, SimulationState};

/// Shield outline distance from the avatar body
pub const SHIELD_OUTLINE_MARGIN: Px = 5;

/// Shield outline stroke width
pub const SHIELD_LINE_WIDTH: Px = 3;

/// HUD font
pub const HUD_FONT: &str = "16px Arial";

/// HUD text baseline
pub const HUD_BASELINE: Px = 20;

/// Player One readout x
pub const HUD_LEFT_X: Px = 10;

/// Player Two readout distance from the right edge
pub const HUD_RIGHT_INSET: Px = 220;

/// One draw operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Clear a region
    Clear {
        /// Region to clear
        rect: Rect,
    },
    /// Fill a rectangle
    FillRect {
        /// Filled area
        rect: Rect,
        /// Fill color
        color: Color,
    },
    /// Outline a rectangle
    StrokeRect {
        /// Outlined area
        rect: Rect,
        /// Stroke color
        color: Color,
        /// Stroke width in pixels
        line_width: Px,
    },
    /// Draw text with its baseline at `position`
    Text {
        /// Text to draw
        text: String,
        /// Left end of the baseline
        position: Vec2,
        /// Text color
        color: Color,
        /// CSS font shorthand
        font: &'static str,
    },
}

/// Everything the presentation layer draws for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scene {
    /// Frame the scene was built from
    pub frame: u32,
    /// Playfield width
    pub width: Px,
    /// Playfield height
    pub height: Px,
    /// Draw list in paint order
    pub commands: Vec<DrawCommand>,
    /// "Player N Wins!" once the match is over
    pub banner: Option<String>,
}

impl Scene {
    /// Serialize for an external renderer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Readout line for one avatar, e.g. `P1 Health: 90% | Shield: 100%`.
pub fn hud_line(avatar: &Avatar) -> String {
    format!(
        "P{} Health: {}% | Shield: {}%",
        avatar.slot.number(),
        avatar.health.max(0),
        avatar.shield.max(0)
    )
}

/// End-of-match banner text.
pub fn banner_text(outcome: Outcome) -> String {
    match outcome {
        Outcome::Winner(slot) => format!("{} Wins!", slot),
        Outcome::Draw => "Draw!".to_string(),
    }
}

/// Build the draw list for a state snapshot.
pub fn build_scene(state: &SimulationState, config: &SimConfig) -> Scene {
    let mut commands = Vec::with_capacity(3 + state.avatars.len() * 3 + state.projectiles.len());

    commands.push(DrawCommand::Clear { rect: config.playfield() });

    for avatar in &state.avatars {
        commands.push(DrawCommand::FillRect {
            rect: avatar.body(),
            color: avatar.color,
        });
    }

    for projectile in &state.projectiles {
        commands.push(DrawCommand::FillRect {
            rect: projectile.body(),
            color: projectile.color,
        });
    }

    for avatar in state.avatars.iter().filter(|a| a.shield_up()) {
        commands.push(DrawCommand::StrokeRect {
            rect: avatar.body().inflate(SHIELD_OUTLINE_MARGIN),
            color: avatar.slot.shield_color(),
            line_width: SHIELD_LINE_WIDTH,
        });
    }

    let readout_x = [HUD_LEFT_X, config.playfield_width - HUD_RIGHT_INSET];
    for (avatar, x) in state.avatars.iter().zip(readout_x) {
        commands.push(DrawCommand::Text {
            text: hud_line(avatar),
            position: Vec2::new(x, HUD_BASELINE),
            color: Color::White,
            font: HUD_FONT,
        });
    }

    Scene {
        frame: state.frame,
        width: config.playfield_width,
        height: config.playfield_height,
        commands,
        banner: state.outcome.map(banner_text),
    }
}
