//! Sub-stepped continuous physics
//!
//! A frame is consumed in slices: each slice finds the earliest contact among
//! bricks, walls and the paddle, advances every body to that instant, resolves
//! the contact, and hands the outcome to the rule layer. Nothing can tunnel
//! because nothing moves past the first contact.

use std::f32::consts::PI;

use glam::Vec2;

use super::collision::{CONTACT_EPSILON, Edges, compute_impact, push_away, reflect_direction};
use super::layout::Wall;
use super::rules::{self, Flow};
use super::state::{Ball, GameState, Paddle};
use crate::consts::{ARENA_WIDTH, BALL_WIDTH, MAX_TIED_BRICKS};

/// Exit angle when the ball leaves from the paddle's left end
const PADDLE_LEFT_ANGLE: f32 = PI * 3.0 / 4.0;
/// Exit angle when the ball leaves from the paddle's right end
const PADDLE_RIGHT_ANGLE: f32 = PI / 4.0;
/// Room between a paddle side and the wall behind the ball below which the
/// ball is pinched
const PINCH_ROOM: f32 = 2.0 * BALL_WIDTH;
/// Gap left between a freed ball and the paddle side
const PINCH_CLEARANCE: f32 = 10.0 * CONTACT_EPSILON;

/// Displacement that moves `current` toward `target` at `gain` per second
/// without overshooting it.
pub fn damped_seek(current: f32, target: f32, gain: f32, dt: f32) -> f32 {
    let error = target - current;
    let delta = gain * error * dt;
    if delta.abs() > error.abs() { error } else { delta }
}

/// Paddle velocity for a normalized control value in [0, 1]
pub fn paddle_speed_for_control(
    paddle: &Paddle,
    control: Option<f32>,
    gain: f32,
    dt: f32,
) -> f32 {
    let Some(control) = control else {
        return 0.0;
    };
    let target = (control * paddle.max_x()).clamp(0.0, paddle.max_x());
    damped_seek(paddle.rect.pos.x, target, gain, dt) / dt
}

/// Move the ball's scalar speed toward its target at a fixed acceleration
pub fn ease_ball_speed(ball: &mut Ball, acceleration: f32, dt: f32) {
    let gap = ball.target_speed - ball.speed;
    let change = (acceleration * dt).min(gap.abs());
    ball.speed += change.copysign(gap);
}

/// Horizontal paddle displacement over `step`, clamped to the arena
fn paddle_delta(paddle: &Paddle, paddle_speed: f32, step: f32) -> Vec2 {
    let x = paddle.rect.pos.x;
    let moved = (x + paddle_speed * step).clamp(0.0, paddle.max_x());
    Vec2::new(moved - x, 0.0)
}

/// Bricks struck at the same instant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrickHits {
    len: usize,
    slots: [(usize, Edges); MAX_TIED_BRICKS],
}

impl BrickHits {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Record a tied brick. A corner touches at most three bricks of the grid;
    /// a fourth means the layout or solver is broken.
    pub fn push(&mut self, index: usize, edges: Edges) {
        assert!(
            self.len < MAX_TIED_BRICKS,
            "more than {MAX_TIED_BRICKS} bricks struck at the same instant"
        );
        self.slots[self.len] = (index, edges);
        self.len += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Edges)> + '_ {
        self.slots[..self.len].iter().copied()
    }

    /// Union of the struck faces
    pub fn edges(&self) -> Edges {
        self.iter().fold(Edges::NONE, |acc, (_, e)| acc | e)
    }
}

/// Walls struck at the same instant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallHits {
    hit: [Option<Edges>; 4],
}

impl WallHits {
    pub fn is_empty(&self) -> bool {
        self.hit.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.hit = [None; 4];
    }

    pub fn record(&mut self, wall: Wall, edges: Edges) {
        self.hit[wall.index()] = Some(edges);
    }

    pub fn contains(&self, wall: Wall) -> bool {
        self.hit[wall.index()].is_some()
    }

    pub fn walls(&self) -> impl Iterator<Item = Wall> + '_ {
        Wall::ALL.into_iter().filter(|w| self.contains(*w))
    }

    /// Union of the struck faces
    pub fn edges(&self) -> Edges {
        self.hit.iter().flatten().fold(Edges::NONE, |acc, e| acc | *e)
    }
}

/// The winning contact of one sub-step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contacts {
    /// Fraction of the remaining frame time until the contact (1.0 if none)
    pub time: f32,
    pub bricks: BrickHits,
    pub walls: WallHits,
    pub paddle: Option<Edges>,
}

impl Contacts {
    pub fn none() -> Self {
        Self {
            time: 1.0,
            bricks: BrickHits::default(),
            walls: WallHits::default(),
            paddle: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty() && self.walls.is_empty() && self.paddle.is_none()
    }
}

/// Earliest contact over the next `step` seconds, with simultaneity resolved.
///
/// Walls beat bricks only when strictly earlier. The paddle replaces everything
/// when strictly earlier, and joins a wall contact at the same instant.
pub fn find_contacts(state: &GameState, step: f32, paddle_speed: f32) -> Contacts {
    let ball = &state.ball.rect;
    let ball_delta = state.ball.velocity() * step;

    let mut brick_time = 1.0;
    let mut bricks = BrickHits::default();
    for (index, brick) in state.bricks.iter_live() {
        let impact = compute_impact(ball, ball_delta, &brick.rect, Vec2::ZERO);
        if !impact.is_hit() {
            continue;
        }
        if bricks.is_empty() || impact.time < brick_time {
            bricks.clear();
            brick_time = impact.time;
        } else if impact.time > brick_time {
            continue;
        }
        bricks.push(index, impact.edges);
    }

    let mut wall_time = 1.0;
    let mut walls = WallHits::default();
    for wall in Wall::ALL {
        let impact = compute_impact(ball, ball_delta, &wall.segment(), Vec2::ZERO);
        if !impact.is_hit() {
            continue;
        }
        if walls.is_empty() || impact.time < wall_time {
            walls.clear();
            wall_time = impact.time;
        } else if impact.time > wall_time {
            continue;
        }
        walls.record(wall, impact.edges);
    }

    let paddle_impact = compute_impact(
        ball,
        ball_delta,
        &state.paddle.rect,
        paddle_delta(&state.paddle, paddle_speed, step),
    );

    let mut contacts = Contacts::none();
    if !bricks.is_empty() {
        contacts.time = brick_time;
        contacts.bricks = bricks;
    }
    if !walls.is_empty() && (contacts.bricks.is_empty() || wall_time < contacts.time) {
        // On an exact tie the brick is resolved first; the wall follows next sub-step
        contacts.bricks.clear();
        contacts.walls = walls;
        contacts.time = wall_time;
    }
    if paddle_impact.is_hit() {
        if contacts.is_empty() || paddle_impact.time < contacts.time {
            contacts.bricks.clear();
            contacts.walls.clear();
            contacts.time = paddle_impact.time;
            contacts.paddle = Some(paddle_impact.edges);
        } else if paddle_impact.time == contacts.time {
            // Bricks sit far above the paddle's band; only a wall can share the instant
            contacts.bricks.clear();
            contacts.paddle = Some(paddle_impact.edges);
        }
    }
    contacts
}

/// Redirect the ball off the paddle's top face by where it landed:
/// left end 135°, center 90°, right end 45°.
pub fn paddle_top_bounce(ball: &mut Ball, paddle: &Paddle) {
    let left = ball.rect.left().max(paddle.rect.left());
    let right = ball.rect.right().min(paddle.rect.right());
    let mid = 0.5 * (left + right);
    let hit = ((mid - paddle.rect.left()) / paddle.width()).clamp(0.0, 1.0);
    let angle = hit * PADDLE_RIGHT_ANGLE + (1.0 - hit) * PADDLE_LEFT_ANGLE;
    ball.direction = Vec2::new(angle.cos(), angle.sin());
}

/// Elastic bounce off a paddle side, treating the paddle as infinitely heavy
/// and moving at `paddle_speed`.
pub fn paddle_side_bounce(ball: &mut Ball, paddle_speed: f32) {
    let velocity = Vec2::new(
        -ball.speed * ball.direction.x + 2.0 * paddle_speed,
        ball.speed * ball.direction.y,
    );
    let speed = velocity.length();
    if speed > 0.0 {
        ball.speed = speed;
        ball.direction = velocity / speed;
    }
}

/// Room between the struck paddle side and the side wall beyond it
fn room_beside(paddle: &Paddle, side: Edges) -> f32 {
    if side.contains(Edges::LEFT) {
        paddle.rect.left()
    } else {
        ARENA_WIDTH - paddle.rect.right()
    }
}

/// Release a ball squeezed between a paddle side and a side wall.
///
/// The ball leaves the gap vertically, keeping its speed, and sits just off the
/// wall. The paddle is set back so the two do not overlap.
fn free_pinched_ball(state: &mut GameState, side: Edges) {
    let ball = &mut state.ball;
    let paddle = &mut state.paddle;

    ball.direction = if ball.direction.y > 0.0 {
        Vec2::Y
    } else {
        Vec2::NEG_Y
    };

    if side.contains(Edges::LEFT) {
        ball.rect.pos.x = 2.0 * CONTACT_EPSILON;
        let min_x = ball.rect.right() + PINCH_CLEARANCE;
        paddle.rect.pos.x = paddle.rect.pos.x.max(min_x).min(paddle.max_x());
    } else {
        ball.rect.pos.x = ARENA_WIDTH - ball.rect.dim.x - 2.0 * CONTACT_EPSILON;
        let max_x = ball.rect.left() - PINCH_CLEARANCE - paddle.width();
        paddle.rect.pos.x = paddle.rect.pos.x.min(max_x).max(0.0);
    }
}

/// Apply reflections for every body in `contacts`, then push the ball clear of
/// whatever it touched.
///
/// Returns true if the ball was pinched against a side wall; the paddle is then
/// stalled for the rest of the frame.
fn resolve(state: &mut GameState, contacts: &Contacts, paddle_speed: f32) -> bool {
    let mut struck = Edges::NONE;
    let mut pinched = None;

    if !contacts.bricks.is_empty() {
        let edges = contacts.bricks.edges();
        state.ball.direction = reflect_direction(state.ball.direction, edges);
        struck |= edges;
    }

    if !contacts.walls.is_empty() {
        let edges = contacts.walls.edges();
        state.ball.direction = reflect_direction(state.ball.direction, edges);
        struck |= edges;
    }

    if let Some(edges) = contacts.paddle {
        if edges.contains(Edges::TOP) {
            paddle_top_bounce(&mut state.ball, &state.paddle);
            struck |= Edges::TOP;
        } else if edges.horizontal() {
            let side = if edges.contains(Edges::LEFT) {
                Edges::LEFT
            } else {
                Edges::RIGHT
            };
            if room_beside(&state.paddle, side) < PINCH_ROOM {
                pinched = Some(side);
            } else {
                paddle_side_bounce(&mut state.ball, paddle_speed);
            }
            struck |= side;
        } else {
            log::error!(
                "ball struck the paddle underside at {:?} (paddle at {:?})",
                state.ball.rect.pos,
                state.paddle.rect.pos
            );
            state.ball.direction = reflect_direction(state.ball.direction, edges);
            struck |= edges;
        }
    }

    state.ball.rect.pos = push_away(state.ball.rect.pos, struck);

    if let Some(side) = pinched {
        log::debug!("ball pinched against a side wall at {:?}", state.ball.rect.pos);
        free_pinched_ball(state, side);
    }
    pinched.is_some()
}

/// Advance the playing simulation by exactly `dt` seconds.
///
/// # Panics
/// If the sub-step loop exceeds the tuning's iteration cap; that signals an
/// unresolvable contact, not a recoverable condition.
pub fn step_frame(state: &mut GameState, dt: f32, control: Option<f32>) {
    let gain = state.tuning.seek_gain;
    let mut paddle_speed = paddle_speed_for_control(&state.paddle, control, gain, dt);
    ease_ball_speed(&mut state.ball, state.tuning.ball_acceleration, dt);

    let max_iterations = state.tuning.max_substep_iterations;
    let mut elapsed = 0.0;
    let mut iterations = 0;
    while elapsed < dt {
        iterations += 1;
        assert!(
            iterations <= max_iterations,
            "collision sub-steps exceeded {max_iterations} in one frame (ball at {:?}, direction {:?})",
            state.ball.rect.pos,
            state.ball.direction
        );

        let remaining = dt - elapsed;
        let contacts = find_contacts(state, remaining, paddle_speed);
        let step = remaining * contacts.time;

        state.ball.rect.pos += state.ball.velocity() * step;
        let delta = paddle_delta(&state.paddle, paddle_speed, step);
        state.paddle.rect.pos += delta;

        if resolve(state, &contacts, paddle_speed) {
            paddle_speed = 0.0;
        }
        let flow = rules::apply_contacts(state, &contacts);

        if contacts.time >= 1.0 {
            elapsed = dt;
        } else {
            elapsed += step;
        }
        if flow == Flow::Stop {
            break;
        }
    }
}
