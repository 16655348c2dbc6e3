//! Brickfall entry point
//!
//! Runs a headless attract-mode session: the autopilot serves and steers the
//! paddle at a fixed frame rate until the game ends or the time limit runs out.
//!
//! Usage: `brickfall [tuning.json]`

use brickfall::sim::{GameEvent, GamePhase, GameState};
use brickfall::{FrameInput, Tuning, advance};

/// Host frame time for the headless run
const FRAME_DT: f32 = 1.0 / 120.0;
/// Ten minutes of game time
const MAX_FRAMES: u32 = 120 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brickfall (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Could not load tuning from {path}: {e}; using defaults");
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let mut state = GameState::new(tuning);
    run_attract_mode(&mut state);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding host on the web
}

/// Drive the menus into a game, then let the autopilot play it out
#[cfg(not(target_arch = "wasm32"))]
fn run_attract_mode(state: &mut GameState) {
    let confirm = FrameInput {
        confirm: true,
        ..Default::default()
    };
    let idle = FrameInput {
        idle_mode: true,
        ..Default::default()
    };

    // Initialize, PLAY, NORMAL
    advance(state, FRAME_DT, &FrameInput::default());
    advance(state, FRAME_DT, &confirm);
    advance(state, FRAME_DT, &confirm);

    let mut bricks_broken = 0u32;
    let mut draw_commands = 0usize;
    let mut frames = 0;
    while frames < MAX_FRAMES && state.phase != GamePhase::GameOver {
        let frame = advance(state, FRAME_DT, &idle);
        draw_commands = draw_commands.max(frame.commands.len());
        frames += 1;

        for event in &state.events {
            match event {
                GameEvent::BrickBroken { .. } => bricks_broken += 1,
                GameEvent::BallLost { balls_remaining } => {
                    log::info!("Frame {frames}: ball lost ({balls_remaining} left)");
                }
                GameEvent::WallCleared => log::info!("Frame {frames}: wall cleared"),
                _ => {}
            }
        }
    }

    let seconds = frames as f32 * FRAME_DT;
    match state.phase {
        GamePhase::GameOver => log::info!(
            "Game {} after {seconds:.1}s: score {}, {bricks_broken} bricks broken",
            if state.has_won() { "won" } else { "lost" },
            state.score
        ),
        phase => log::info!(
            "Stopped after {seconds:.1}s in {phase:?}: score {}, {bricks_broken} bricks broken",
            state.score
        ),
    }
    log::debug!("Largest frame: {draw_commands} draw commands");
}
