//! Per-frame update
//!
//! Turns one frame of input into menu actions, phase transitions, reset
//! animations and (while playing) a physics step.

use super::layout;
use super::physics::{self, damped_seek};
use super::rules;
use super::state::{Difficulty, GamePhase, GameState, ResetTarget};
use crate::consts::RESET_EPSILON;

/// `paddle_control` value meaning "not steering this frame"
pub const NO_CONTROL: f32 = -1.0;

/// Input commands for a single frame. Button fields are edge-triggered: true
/// only on the frame the button went down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Desired paddle position across its travel, 0 (left) to 1 (right);
    /// negative for no control
    pub paddle_control: f32,
    /// Activate the selected menu entry
    pub confirm: bool,
    /// Pause toggle
    pub pause: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    /// The window lost focus; pauses a running game
    pub focus_lost: bool,
    /// Attract mode - the paddle tracks the ball and serves by itself
    pub idle_mode: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            paddle_control: NO_CONTROL,
            confirm: false,
            pause: false,
            menu_up: false,
            menu_down: false,
            focus_lost: false,
            idle_mode: false,
        }
    }
}

impl FrameInput {
    /// Validated paddle control in [0, 1], or `None` when not steering
    pub fn control(&self) -> Option<f32> {
        let c = self.paddle_control;
        if c.is_nan() {
            log::warn!("Ignoring NaN paddle control");
            return None;
        }
        if c < 0.0 {
            return None;
        }
        if c > 1.0 {
            log::warn!("Paddle control {c} out of range, clamping to 1");
        }
        Some(c.min(1.0))
    }
}

/// A selectable menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Quit,
    Easy,
    Normal,
    Hard,
    Serve,
    Continue,
    Restart,
    MainMenu,
}

impl MenuItem {
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Play => "PLAY",
            MenuItem::Quit => "QUIT",
            MenuItem::Easy => "EASY",
            MenuItem::Normal => "NORMAL",
            MenuItem::Hard => "HARD",
            MenuItem::Serve => "SERVE",
            MenuItem::Continue => "CONTINUE",
            MenuItem::Restart => "RESTART",
            MenuItem::MainMenu => "MAIN MENU",
        }
    }
}

/// Entries of the menu shown in `phase`, top to bottom
pub fn menu_items(phase: GamePhase) -> &'static [MenuItem] {
    match phase {
        GamePhase::MainMenu => &[MenuItem::Play, MenuItem::Quit],
        GamePhase::DifficultySelect => &[MenuItem::Easy, MenuItem::Normal, MenuItem::Hard],
        GamePhase::WaitServe => &[MenuItem::Serve],
        GamePhase::Paused => &[MenuItem::Continue, MenuItem::Restart, MenuItem::MainMenu],
        GamePhase::GameOver => &[MenuItem::Restart, MenuItem::MainMenu],
        _ => &[],
    }
}

/// Title line above the current menu, if any
pub fn menu_header(state: &GameState) -> Option<&'static str> {
    match state.phase {
        GamePhase::MainMenu => Some("BRICKFALL"),
        GamePhase::DifficultySelect => Some("DIFFICULTY"),
        GamePhase::Paused => Some("PAUSED"),
        GamePhase::GameOver if state.has_won() => Some("YOU WIN"),
        GamePhase::GameOver => Some("GAME OVER"),
        _ => None,
    }
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::Uninitialized {
        state.initialize();
    }

    let mut input = *input;
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    if input.focus_lost && state.phase == GamePhase::Playing {
        state.set_phase(GamePhase::Paused);
    }

    navigate_menu(state, &input);
    if input.confirm {
        confirm(state);
    }
    if input.pause {
        toggle_pause(state);
    }

    if !(dt.is_finite() && dt > 0.0) {
        log::warn!("Skipping update for invalid frame time {dt}");
        return;
    }

    match state.phase {
        GamePhase::Playing => physics::step_frame(state, dt, input.control()),
        GamePhase::ResetPaddle => {
            let (paddle_settled, _) = animate_reset(state, dt);
            if paddle_settled {
                finish_reset(state, GamePhase::WaitServe);
            }
        }
        GamePhase::ResetGame { then } => {
            let (paddle_settled, bricks_settled) = animate_reset(state, dt);
            if paddle_settled && bricks_settled {
                let next = match then {
                    ResetTarget::WaitServe => GamePhase::WaitServe,
                    ResetTarget::MainMenu => GamePhase::MainMenu,
                };
                finish_reset(state, next);
            }
        }
        _ => {}
    }
}

fn navigate_menu(state: &mut GameState, input: &FrameInput) {
    let count = menu_items(state.phase).len();
    if count == 0 {
        return;
    }
    if input.menu_up {
        state.menu_cursor = (state.menu_cursor + count - 1) % count;
    }
    if input.menu_down {
        state.menu_cursor = (state.menu_cursor + 1) % count;
    }
}

/// Activate the highlighted entry of the current menu
fn confirm(state: &mut GameState) {
    let Some(&item) = menu_items(state.phase).get(state.menu_cursor) else {
        return;
    };

    match item {
        MenuItem::Play => state.set_phase(GamePhase::DifficultySelect),
        MenuItem::Quit => {
            log::info!("Quit requested");
            state.quit_requested = true;
        }
        MenuItem::Easy | MenuItem::Normal | MenuItem::Hard => {
            let difficulty = match item {
                MenuItem::Easy => Difficulty::Easy,
                MenuItem::Hard => Difficulty::Hard,
                _ => Difficulty::Normal,
            };
            rules::start_game(state, difficulty);
            state.set_phase(GamePhase::ResetPaddle);
        }
        MenuItem::Serve => rules::serve(state),
        MenuItem::Continue => state.set_phase(GamePhase::Playing),
        MenuItem::Restart => {
            let difficulty = state.difficulty;
            rules::start_game(state, difficulty);
            state.set_phase(GamePhase::ResetGame {
                then: ResetTarget::WaitServe,
            });
        }
        MenuItem::MainMenu => {
            rules::start_game(state, Difficulty::Normal);
            state.set_phase(GamePhase::ResetGame {
                then: ResetTarget::MainMenu,
            });
        }
    }
}

fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => state.set_phase(GamePhase::Paused),
        GamePhase::Paused => state.set_phase(GamePhase::Playing),
        _ => {}
    }
}

/// Seek the paddle back to its full width and home position, and fade any
/// ghost bricks in. Returns (paddle settled, bricks settled).
fn animate_reset(state: &mut GameState, dt: f32) -> (bool, bool) {
    let gain = state.tuning.seek_gain;
    let target_width = state.full_paddle_width();
    let target_x = layout::initial_paddle_rect(target_width).pos.x;

    let width = state.paddle.width();
    state
        .paddle
        .change_width(width + damped_seek(width, target_width, gain, dt));
    let x = state.paddle.rect.pos.x;
    state.paddle.rect.pos.x += damped_seek(x, target_x, gain, dt);

    let fade_gain = state.tuning.fade_gain;
    let bricks_settled = state
        .bricks
        .advance_fade(|alpha| damped_seek(alpha, 1.0, fade_gain, dt));

    let paddle_settled = (target_x - state.paddle.rect.pos.x).abs() < RESET_EPSILON
        && (target_width - state.paddle.width()).abs() < RESET_EPSILON;
    (paddle_settled, bricks_settled)
}

fn finish_reset(state: &mut GameState, next: GamePhase) {
    state.paddle.rect = layout::initial_paddle_rect(state.full_paddle_width());
    state.paddle.shrunk = false;
    state.reset_ball();
    state.set_phase(next);
}

/// Attract-mode driver: serve immediately and keep the paddle under the ball.
///
/// The aim point walks across the paddle with the hit count so the rally
/// doesn't settle into a single repeating path.
fn autopilot(state: &GameState, input: &mut FrameInput) {
    match state.phase {
        GamePhase::WaitServe => {
            input.confirm = true;
        }
        GamePhase::Playing => {
            let paddle = &state.paddle;
            let max_x = paddle.max_x();
            if max_x <= 0.0 {
                input.paddle_control = NO_CONTROL;
                return;
            }
            let lane = (state.hit_count % 5) as f32 - 2.0;
            let offset = lane * 0.2 * paddle.width() / 2.0;
            let target_x = state.ball.rect.center().x - paddle.width() / 2.0 + offset;
            input.paddle_control = (target_x / max_x).clamp(0.0, 1.0);
        }
        _ => {}
    }
}
