//! Brickfall - a Breakout-style arcade game core
//!
//! Core modules:
//! - `sim`: Simulation (continuous collision, rules, game state machine)
//! - `draw`: Flat draw-command emission for any rectangle renderer
//! - `tuning`: Data-driven game balance and rule policies
//!
//! A host calls [`advance`] once per displayed frame with the elapsed time and
//! the frame's input, and rasterizes the returned rectangles.

pub mod draw;
pub mod sim;
pub mod tuning;

pub use draw::{DrawCommand, Frame};
pub use sim::{FrameInput, GameEvent, GamePhase, GameState};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Brick grid
    pub const BRICK_COUNT_X: usize = 14;
    pub const BRICK_COUNT_Y: usize = 8;
    pub const BRICK_COUNT: usize = BRICK_COUNT_X * BRICK_COUNT_Y;
    pub const BRICK_WIDTH: f32 = 7.0;
    pub const BRICK_HEIGHT: f32 = 2.0;
    pub const BRICK_GAP_X: f32 = 1.0;
    pub const BRICK_GAP_Y: f32 = 0.8;
    /// Bottom edge of the lowest brick row
    pub const FIRST_BRICK_HEIGHT: f32 = 90.0;

    /// Arena: exactly wide enough for the grid with a gap at each side
    pub const ARENA_WIDTH: f32 =
        BRICK_COUNT_X as f32 * BRICK_WIDTH + (BRICK_COUNT_X + 1) as f32 * BRICK_GAP_X;
    pub const ARENA_HEIGHT: f32 = 140.0;

    /// Playing area = arena + side bars + header band for score and lives
    pub const SIDE_BAR_WIDTH: f32 = 2.0;
    pub const HEADER_HEIGHT: f32 = 22.0;
    pub const PLAYING_AREA_WIDTH: f32 = ARENA_WIDTH + 2.0 * SIDE_BAR_WIDTH;
    pub const PLAYING_AREA_HEIGHT: f32 = ARENA_HEIGHT + HEADER_HEIGHT;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 7.0;
    pub const PADDLE_HEIGHT: f32 = 3.0;
    pub const PADDLE_Y: f32 = 6.0;

    /// Ball defaults
    pub const BALL_WIDTH: f32 = 2.0;
    pub const BALL_HEIGHT: f32 = 1.5;

    /// Collision sub-steps allowed per frame before the solver is considered stuck
    pub const MAX_SUBSTEP_ITERATIONS: u32 = 25;
    /// Bricks a single contact instant may involve
    pub const MAX_TIED_BRICKS: usize = 3;
    /// Reset animations finish once within this distance of their targets
    pub const RESET_EPSILON: f32 = 0.001;
}

/// Advance the game by one frame and describe what to draw.
///
/// This is the whole host-facing surface: input in, rectangles out. Game
/// events for audio and the like are left on `state.events`.
pub fn advance(state: &mut GameState, dt: f32, input: &FrameInput) -> Frame {
    sim::tick(state, input, dt);
    draw::build_frame(state)
}
