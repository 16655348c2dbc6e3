//! Static arena layout: the brick grid and the four boundary walls

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::{Brick, BrickKind};
use crate::consts::*;

/// One of the four arena boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Bottom,
    Right,
    Top,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Left, Wall::Bottom, Wall::Right, Wall::Top];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Left or right wall
    pub const fn is_side(self) -> bool {
        matches!(self, Wall::Left | Wall::Right)
    }

    /// Zero-thickness segment along this boundary
    pub fn segment(self) -> Rect {
        match self {
            Wall::Left => Rect::new(Vec2::ZERO, Vec2::new(0.0, ARENA_HEIGHT)),
            Wall::Bottom => Rect::new(Vec2::ZERO, Vec2::new(ARENA_WIDTH, 0.0)),
            Wall::Right => Rect::new(Vec2::new(ARENA_WIDTH, 0.0), Vec2::new(0.0, ARENA_HEIGHT)),
            Wall::Top => Rect::new(Vec2::new(0.0, ARENA_HEIGHT), Vec2::new(ARENA_WIDTH, 0.0)),
        }
    }
}

/// Slot index of the brick at grid column `x`, row `y` (row 0 is lowest)
#[inline]
pub const fn brick_index(x: usize, y: usize) -> usize {
    y * BRICK_COUNT_X + x
}

/// Rectangle of the brick at grid column `x`, row `y`
pub fn brick_rect(x: usize, y: usize) -> Rect {
    let pos = Vec2::new(
        BRICK_GAP_X + x as f32 * (BRICK_WIDTH + BRICK_GAP_X),
        FIRST_BRICK_HEIGHT + y as f32 * (BRICK_HEIGHT + BRICK_GAP_Y),
    );
    Rect::new(pos, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT))
}

/// Build the full brick wall, slot order matching `brick_index`
pub fn spawn_bricks() -> [Brick; BRICK_COUNT] {
    std::array::from_fn(|i| {
        let (x, y) = (i % BRICK_COUNT_X, i / BRICK_COUNT_X);
        Brick {
            rect: brick_rect(x, y),
            kind: BrickKind::for_row(y),
        }
    })
}

/// Paddle rectangle centered in the arena at the given width
pub fn initial_paddle_rect(width: f32) -> Rect {
    Rect::new(
        Vec2::new(ARENA_WIDTH / 2.0 - width / 2.0, PADDLE_Y),
        Vec2::new(width, PADDLE_HEIGHT),
    )
}

/// Ball rectangle at its serve position
pub fn initial_ball_rect() -> Rect {
    Rect::new(
        Vec2::new(ARENA_WIDTH / 2.0 - BALL_WIDTH / 2.0, PADDLE_Y + 10.0),
        Vec2::new(BALL_WIDTH, BALL_HEIGHT),
    )
}
