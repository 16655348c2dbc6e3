//! Game state and core simulation types
//!
//! The whole simulation lives in one owned `GameState` that the caller passes
//! by exclusive reference into every update.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::layout::{self, Wall};
use crate::consts::*;
use crate::tuning::Tuning;

/// Where a game reset hands control once its animation settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetTarget {
    WaitServe,
    MainMenu,
}

/// Top-level mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing placed yet; consumed by the first update
    #[default]
    Uninitialized,
    MainMenu,
    DifficultySelect,
    /// Ball parked above the paddle, waiting for the serve input
    WaitServe,
    /// Active gameplay, physics runs
    Playing,
    Paused,
    GameOver,
    /// Life lost, paddle animating back to full width
    ResetPaddle,
    /// Paddle animating back and broken bricks fading in
    ResetGame { then: ResetTarget },
}

/// Difficulty preset chosen in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Scale applied to brick points and (optionally) inverse paddle width
    pub fn factor(self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 2.0,
        }
    }
}

/// Brick colors, lowest rows first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Yellow,
    Green,
    Orange,
    Red,
}

impl BrickKind {
    /// Two rows per color, yellow at the bottom
    pub fn for_row(row: usize) -> Self {
        match row / 2 {
            0 => BrickKind::Yellow,
            1 => BrickKind::Green,
            2 => BrickKind::Orange,
            _ => BrickKind::Red,
        }
    }

    /// Type number 0-3
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Orange and red bricks force the ball to its top speed
    pub const fn boosts_speed(self) -> bool {
        matches!(self, BrickKind::Orange | BrickKind::Red)
    }
}

/// A brick slot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Brick {
    pub rect: Rect,
    pub kind: BrickKind,
}

/// Fixed-size brick arena with a liveness bitset.
///
/// Broken bricks keep their slot so the reset animation can fade them back in.
#[derive(Debug, Clone)]
pub struct BrickField {
    bricks: [Brick; BRICK_COUNT],
    live: u128,
    fade: [f32; BRICK_COUNT],
}

const _: () = assert!(BRICK_COUNT <= 128, "liveness bitset holds at most 128 bricks");

impl Default for BrickField {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickField {
    /// Full wall, every brick live and opaque
    pub fn new() -> Self {
        Self {
            bricks: layout::spawn_bricks(),
            live: Self::all_mask(),
            fade: [1.0; BRICK_COUNT],
        }
    }

    fn all_mask() -> u128 {
        u128::MAX >> (128 - BRICK_COUNT)
    }

    pub fn get(&self, index: usize) -> &Brick {
        &self.bricks[index]
    }

    #[inline]
    pub fn is_live(&self, index: usize) -> bool {
        index < BRICK_COUNT && self.live & (1u128 << index) != 0
    }

    /// Number of bricks not yet broken
    pub fn remaining(&self) -> usize {
        self.live.count_ones() as usize
    }

    /// Live bricks in slot order
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, &Brick)> + '_ {
        self.bricks
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_live(*i))
    }

    /// Every slot with its liveness and fade alpha
    pub fn iter_slots(&self) -> impl Iterator<Item = (&Brick, bool, f32)> + '_ {
        self.bricks
            .iter()
            .enumerate()
            .map(|(i, b)| (b, self.is_live(i), self.fade[i]))
    }

    /// Permanently exclude a brick from collision testing
    pub fn break_brick(&mut self, index: usize) {
        assert!(self.is_live(index), "brick {index} broken twice");
        self.live &= !(1u128 << index);
    }

    pub fn fade_alpha(&self, index: usize) -> f32 {
        self.fade[index]
    }

    /// Bring every broken brick back as a transparent ghost
    pub fn revive_as_ghosts(&mut self) {
        for i in 0..BRICK_COUNT {
            if !self.is_live(i) {
                self.fade[i] = 0.0;
            }
        }
        self.live = Self::all_mask();
    }

    /// Advance the ghost fade with `step(alpha) -> delta`; returns true once
    /// every brick is fully opaque.
    pub fn advance_fade(&mut self, mut step: impl FnMut(f32) -> f32) -> bool {
        let mut settled = true;
        for alpha in &mut self.fade {
            if *alpha >= 1.0 {
                continue;
            }
            *alpha += step(*alpha);
            if 1.0 - *alpha < RESET_EPSILON {
                *alpha = 1.0;
            } else {
                settled = false;
            }
        }
        settled
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub rect: Rect,
    /// Unit-length direction of travel
    pub direction: Vec2,
    /// Current scalar speed
    pub speed: f32,
    /// Speed the ball eases toward
    pub target_speed: f32,
}

impl Ball {
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub rect: Rect,
    /// Halved this life already
    pub shrunk: bool,
}

impl Paddle {
    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.dim.x
    }

    /// Rightmost legal x of the paddle's left edge
    #[inline]
    pub fn max_x(&self) -> f32 {
        (ARENA_WIDTH - self.width()).max(0.0)
    }

    /// Resize around the current horizontal center
    pub fn change_width(&mut self, new_width: f32) {
        self.rect.pos.x += self.rect.dim.x / 2.0;
        self.rect.pos.x -= new_width / 2.0;
        self.rect.dim.x = new_width;
    }
}

/// Things that happened during one update, for audio and other observers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BrickBroken { index: usize, kind: BrickKind },
    WallHit(Wall),
    PaddleHit,
    PaddleShrunk,
    BallLost { balls_remaining: u32 },
    WallCleared,
    GameOver { won: bool },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickField,
    /// Paddle, wall and brick contacts since the last serve
    pub hit_count: u32,
    pub score: u32,
    pub balls_remaining: u32,
    pub difficulty: Difficulty,
    /// Brick walls cleared this game
    pub walls_cleared: u32,
    /// Selected entry of the current menu
    pub menu_cursor: usize,
    pub quit_requested: bool,
    /// Events recorded by the latest update
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Uninitialized state; the first update places everything
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            phase: GamePhase::Uninitialized,
            ball: Ball {
                rect: Rect::default(),
                direction: Vec2::Y,
                speed: 0.0,
                target_speed: 0.0,
            },
            paddle: Paddle {
                rect: Rect::default(),
                shrunk: false,
            },
            bricks: BrickField::new(),
            hit_count: 0,
            score: 0,
            balls_remaining: 0,
            difficulty: Difficulty::Normal,
            walls_cleared: 0,
            menu_cursor: 0,
            quit_requested: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(0),
        }
    }

    /// One-time setup: seed the serve RNG from the wall clock and place every body
    pub fn initialize(&mut self) {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        self.rng = Pcg32::seed_from_u64(seed);

        self.paddle = Paddle {
            rect: layout::initial_paddle_rect(self.full_paddle_width()),
            shrunk: false,
        };
        self.ball.rect = layout::initial_ball_rect();
        self.bricks = BrickField::new();
        self.balls_remaining = self.tuning.starting_balls;
        log::info!("Game state initialized (serve seed {seed})");
        self.set_phase(GamePhase::MainMenu);
    }

    /// Paddle width for the current difficulty before any shrink
    pub fn full_paddle_width(&self) -> f32 {
        self.tuning.paddle_width(self.difficulty)
    }

    /// True once the final brick wall has been cleared
    pub fn has_won(&self) -> bool {
        self.walls_cleared >= self.tuning.walls_to_win
    }

    /// Park the ball at its serve spot with a fresh random upward direction
    pub fn reset_ball(&mut self) {
        self.ball.rect = layout::initial_ball_rect();
        let x = 1.5 * self.rng.random::<f32>() - 0.75;
        self.ball.direction = Vec2::new(x, (1.0 - x * x).sqrt());
        self.ball.speed = 0.0;
        self.ball.target_speed = self.tuning.tier_speed(1);
    }

    /// Switch phase, recording the transition and resetting the menu cursor
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.menu_cursor = match to {
            GamePhase::DifficultySelect => 1,
            _ => 0,
        };
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
