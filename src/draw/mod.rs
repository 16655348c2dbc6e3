//! Frame description for the host renderer
//!
//! Everything on screen is a flat-colored rectangle, so a frame is just an
//! ordered list of them. Later commands draw over earlier ones.

pub mod command;
pub mod glyphs;

pub use command::{DrawCommand, colors};

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, Rect, menu_header, menu_items};
use glyphs::{GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH, UNKNOWN_GLYPH, glyph, text_width};

/// Vertical advance between menu lines, in glyph pixels
pub const LINE_HEIGHT: f32 = 10.0;
const HEADER_PIXEL_SIZE: f32 = 1.5;
const ITEM_PIXEL_SIZE: f32 = 1.0;
const HUD_PIXEL_SIZE: f32 = 1.0;
/// Score and lives baseline, measured down from the top of the playing area
const HUD_DROP: f32 = 17.0;
/// Score left edge, measured in from the right of the playing area
const SCORE_INSET: f32 = 27.0;
const LIVES_X: f32 = 10.0;

/// Output of one update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    /// The host should hide the pointer (gameplay is steering the paddle)
    pub cursor_hidden: bool,
    /// The player asked to quit
    pub quit: bool,
}

/// Describe the current state as draw commands
pub fn build_frame(state: &GameState) -> Frame {
    let mut commands = Vec::with_capacity(BRICK_COUNT + 256);

    push_side_bars(&mut commands);

    for (brick, live, alpha) in state.bricks.iter_slots() {
        if !live || alpha <= 0.0 {
            continue;
        }
        let mut color = colors::BRICKS[brick.kind.index()];
        color[3] = alpha;
        commands.push(DrawCommand::from_arena_rect(&brick.rect, color));
    }

    commands.push(DrawCommand::from_arena_rect(&state.paddle.rect, colors::PADDLE));

    if state.phase != GamePhase::ResetPaddle {
        commands.push(DrawCommand::from_arena_rect(&state.ball.rect, colors::BALL));
    }

    let score = format!("{:03}", state.score % 1000);
    push_text(
        &mut commands,
        &score,
        Vec2::new(PLAYING_AREA_WIDTH - SCORE_INSET, PLAYING_AREA_HEIGHT - HUD_DROP),
        HUD_PIXEL_SIZE,
        colors::SCORE,
    );
    push_text(
        &mut commands,
        &state.balls_remaining.to_string(),
        Vec2::new(LIVES_X, PLAYING_AREA_HEIGHT - HUD_DROP),
        HUD_PIXEL_SIZE,
        colors::SCORE,
    );

    push_menu(&mut commands, state);

    Frame {
        commands,
        cursor_hidden: state.phase == GamePhase::Playing,
        quit: state.quit_requested,
    }
}

fn push_side_bars(commands: &mut Vec<DrawCommand>) {
    let bar = Vec2::new(SIDE_BAR_WIDTH, PLAYING_AREA_HEIGHT);
    commands.push(DrawCommand::from_area_rect(
        &Rect::new(Vec2::ZERO, bar),
        colors::SIDE_BAR,
    ));
    commands.push(DrawCommand::from_area_rect(
        &Rect::new(Vec2::new(SIDE_BAR_WIDTH + ARENA_WIDTH, 0.0), bar),
        colors::SIDE_BAR,
    ));
}

/// Header and entries of the current menu, stacked downward from the middle
/// of the playing area. The selected entry is wrapped in arrows.
fn push_menu(commands: &mut Vec<DrawCommand>, state: &GameState) {
    let mut cursor = Vec2::new(PLAYING_AREA_WIDTH / 2.0, PLAYING_AREA_HEIGHT / 2.0);

    if let Some(header) = menu_header(state) {
        push_text_centered(commands, header, cursor, HEADER_PIXEL_SIZE, colors::MENU_TEXT);
        cursor.y -= LINE_HEIGHT * HEADER_PIXEL_SIZE;
    }

    for (i, item) in menu_items(state.phase).iter().enumerate() {
        let label = if i == state.menu_cursor {
            format!("> {} <", item.label())
        } else {
            item.label().to_string()
        };
        push_text_centered(commands, &label, cursor, ITEM_PIXEL_SIZE, colors::MENU_TEXT);
        cursor.y -= LINE_HEIGHT * ITEM_PIXEL_SIZE;
    }
}

/// Render `text` with its bottom-left corner at `bottom_left` (playing-area
/// units), one rectangle per lit glyph pixel.
pub fn push_text(
    commands: &mut Vec<DrawCommand>,
    text: &str,
    bottom_left: Vec2,
    pixel_size: f32,
    color: [f32; 4],
) {
    let advance = (GLYPH_WIDTH + GLYPH_SPACING) as f32 * pixel_size;
    let pixel = Vec2::splat(pixel_size);
    let mut origin = bottom_left;

    for c in text.chars() {
        let (glyph, color) = match glyph(c) {
            Some(g) => (g, color),
            None => (&UNKNOWN_GLYPH, colors::UNKNOWN_GLYPH),
        };
        for (col, row) in glyph.pixels() {
            let offset = Vec2::new(col as f32, (GLYPH_HEIGHT - 1 - row) as f32) * pixel_size;
            commands.push(DrawCommand::from_area_rect(
                &Rect::new(origin + offset, pixel),
                color,
            ));
        }
        origin.x += advance;
    }
}

/// Render `text` centered on `center`
pub fn push_text_centered(
    commands: &mut Vec<DrawCommand>,
    text: &str,
    center: Vec2,
    pixel_size: f32,
    color: [f32; 4],
) {
    let dim = Vec2::new(text_width(text) as f32, GLYPH_HEIGHT as f32) * pixel_size;
    push_text(commands, text, center - dim / 2.0, pixel_size, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FrameInput, tick};

    fn lit_pixels(text: &str) -> usize {
        text.chars()
            .map(|c| glyph(c).unwrap_or(&UNKNOWN_GLYPH).pixels().count())
            .sum()
    }

    fn count_color(frame: &Frame, color: [f32; 4]) -> usize {
        frame.commands.iter().filter(|c| c.color == color).count()
    }

    fn main_menu_state() -> GameState {
        let mut state = GameState::default();
        tick(&mut state, &FrameInput::default(), 1.0 / 60.0);
        state
    }

    #[test]
    fn test_side_bars_come_first() {
        let frame = build_frame(&main_menu_state());
        let left = frame.commands[0];
        let right = frame.commands[1];
        assert_eq!(left.color, colors::SIDE_BAR);
        assert_eq!(left.min, [0.0, 0.0]);
        assert_eq!(left.max[1], 1.0);
        assert_eq!(right.max[0], 1.0);
    }

    #[test]
    fn test_all_bricks_drawn_in_brick_colors() {
        let frame = build_frame(&main_menu_state());
        let bricks: usize = colors::BRICKS
            .iter()
            .map(|c| count_color(&frame, *c))
            .sum();
        assert_eq!(bricks, BRICK_COUNT);
        assert_eq!(count_color(&frame, colors::BRICKS[3]), 2 * BRICK_COUNT_X);
    }

    #[test]
    fn test_broken_and_ghost_bricks() {
        let mut state = main_menu_state();
        state.bricks.break_brick(0);
        let frame = build_frame(&state);
        assert_eq!(count_color(&frame, colors::BRICKS[0]), 2 * BRICK_COUNT_X - 1);

        state.bricks.revive_as_ghosts();
        state.bricks.advance_fade(|_| 0.5);
        let frame = build_frame(&state);
        let mut ghost = colors::BRICKS[0];
        ghost[3] = 0.5;
        assert_eq!(count_color(&frame, ghost), 1);
    }

    #[test]
    fn test_ball_hidden_while_paddle_resets() {
        let mut state = main_menu_state();
        assert_eq!(count_color(&build_frame(&state), colors::BALL), 1);
        state.phase = GamePhase::ResetPaddle;
        assert_eq!(count_color(&build_frame(&state), colors::BALL), 0);
        assert_eq!(count_color(&build_frame(&state), colors::PADDLE), 1);
    }

    #[test]
    fn test_main_menu_text() {
        let state = main_menu_state();
        let frame = build_frame(&state);
        let expected = lit_pixels("BRICKFALL") + lit_pixels("> PLAY <") + lit_pixels("QUIT");
        assert_eq!(count_color(&frame, colors::MENU_TEXT), expected);
        assert!(!frame.cursor_hidden);
    }

    #[test]
    fn test_score_and_lives() {
        let mut state = main_menu_state();
        state.score = 1042;
        state.balls_remaining = 2;
        state.phase = GamePhase::Playing;
        let frame = build_frame(&state);
        // "042" plus "2"; side bars share the white color
        let white = count_color(&frame, colors::SCORE) - 2;
        assert_eq!(white, lit_pixels("042") + lit_pixels("2"));
        assert!(frame.cursor_hidden);
        assert_eq!(count_color(&frame, colors::MENU_TEXT), 0);
    }

    #[test]
    fn test_unknown_glyph_is_magenta() {
        let mut commands = Vec::new();
        push_text(&mut commands, "A?", Vec2::ZERO, 1.0, colors::MENU_TEXT);
        let magenta = commands
            .iter()
            .filter(|c| c.color == colors::UNKNOWN_GLYPH)
            .count();
        assert_eq!(magenta, UNKNOWN_GLYPH.pixels().count());
        assert_eq!(commands.len(), lit_pixels("A") + magenta);
    }

    #[test]
    fn test_centered_text_is_centered() {
        let mut commands = Vec::new();
        let center = Vec2::new(PLAYING_AREA_WIDTH / 2.0, PLAYING_AREA_HEIGHT / 2.0);
        push_text_centered(&mut commands, "O", center, 1.0, colors::MENU_TEXT);
        let min_x = commands.iter().map(|c| c.min[0]).fold(f32::MAX, f32::min);
        let max_x = commands.iter().map(|c| c.max[0]).fold(f32::MIN, f32::max);
        assert!(((min_x + max_x) / 2.0 - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_quit_flag() {
        let mut state = main_menu_state();
        state.quit_requested = true;
        assert!(build_frame(&state).quit);
    }
}
