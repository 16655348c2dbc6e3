//! Scoring, lives and progression
//!
//! Physics reports what the ball touched; this layer decides what it means.

use super::physics::Contacts;
use super::state::{Difficulty, GameEvent, GamePhase, GameState, ResetTarget};

/// Whether the sub-step loop may keep consuming the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// A life ended or the wall was cleared; the rest of the frame is dropped
    Stop,
}

/// Reset score, lives and bricks for a fresh game at `difficulty`.
///
/// The caller picks the phase that follows; broken bricks come back as ghosts
/// for the reset animation to fade in.
pub fn start_game(state: &mut GameState, difficulty: Difficulty) {
    state.difficulty = difficulty;
    state.score = 0;
    state.balls_remaining = state.tuning.starting_balls;
    state.hit_count = 0;
    state.walls_cleared = 0;
    state.reset_ball();
    state.bricks.revive_as_ghosts();
    log::info!("New game on {:?}", difficulty);
}

/// Launch the parked ball
pub fn serve(state: &mut GameState) {
    state.reset_ball();
    state.hit_count = 0;
    state.set_phase(GamePhase::Playing);
}

/// Apply the consequences of one resolved contact set
pub fn apply_contacts(state: &mut GameState, contacts: &Contacts) -> Flow {
    let broke_bricks = !contacts.bricks.is_empty();
    for (index, _) in contacts.bricks.iter() {
        break_brick(state, index);
    }

    if !contacts.walls.is_empty() {
        let edges = contacts.walls.edges();
        state.hit_count += edges.horizontal() as u32 + edges.vertical() as u32;
        for wall in contacts.walls.walls() {
            state.push_event(GameEvent::WallHit(wall));
        }

        if contacts.walls.contains(state.tuning.shrink_wall) && !state.paddle.shrunk {
            let half = state.paddle.width() / 2.0;
            state.paddle.change_width(half);
            state.paddle.shrunk = true;
            state.push_event(GameEvent::PaddleShrunk);
            log::debug!("Paddle shrunk to {half}");
        }

        if contacts.walls.contains(state.tuning.losing_wall) {
            lose_ball(state);
            return Flow::Stop;
        }
    }

    if contacts.paddle.is_some() {
        state.hit_count += 1;
        state.push_event(GameEvent::PaddleHit);
    }

    promote_speed_tier(state);

    if broke_bricks && state.bricks.remaining() == 0 {
        wall_cleared(state);
        return Flow::Stop;
    }
    Flow::Continue
}

fn break_brick(state: &mut GameState, index: usize) {
    let kind = state.bricks.get(index).kind;
    state.bricks.break_brick(index);
    state.score += state.tuning.brick_score(kind.index(), state.difficulty);
    state.hit_count += 1;
    if kind.boosts_speed() {
        let top = state.tuning.tier_speed(4);
        if state.ball.target_speed < top {
            log::debug!("{:?} brick raised ball speed to {top}", kind);
            state.ball.target_speed = top;
        }
    }
    state.push_event(GameEvent::BrickBroken { index, kind });
}

/// Raise the ball's target speed at the configured hit counts.
///
/// Only ever raises; a ball already boosted by an upper-row brick keeps its speed.
pub fn promote_speed_tier(state: &mut GameState) {
    let [second, third] = state.tuning.promotion_hits;
    let tier2 = state.tuning.tier_speed(2);
    let tier3 = state.tuning.tier_speed(3);
    if state.hit_count == second && state.ball.target_speed < tier2 {
        state.ball.target_speed = tier2;
    } else if state.hit_count == third && state.ball.target_speed < tier3 {
        state.ball.target_speed = tier3;
    }
}

/// The ball reached the losing wall
pub fn lose_ball(state: &mut GameState) {
    state.balls_remaining = state.balls_remaining.saturating_sub(1);
    let balls_remaining = state.balls_remaining;
    state.push_event(GameEvent::BallLost { balls_remaining });
    log::info!("Ball lost, {balls_remaining} remaining");

    if balls_remaining == 0 {
        state.push_event(GameEvent::GameOver { won: false });
        log::info!("Game over with score {}", state.score);
        state.set_phase(GamePhase::GameOver);
    } else {
        state.set_phase(GamePhase::ResetPaddle);
    }
}

/// The last live brick was broken
pub fn wall_cleared(state: &mut GameState) {
    state.walls_cleared += 1;
    state.push_event(GameEvent::WallCleared);
    log::info!("Brick wall {} cleared", state.walls_cleared);

    if state.has_won() {
        state.push_event(GameEvent::GameOver { won: true });
        log::info!("Game won with score {}", state.score);
        state.set_phase(GamePhase::GameOver);
        return;
    }

    if state.tuning.bonus_life_on_clear {
        state.balls_remaining += 1;
    }
    state.bricks.revive_as_ghosts();
    state.set_phase(GamePhase::ResetGame {
        then: ResetTarget::WaitServe,
    });
}
