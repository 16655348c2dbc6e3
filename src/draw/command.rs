//! Draw command type for rectangle renderers

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::consts::{PLAYING_AREA_HEIGHT, PLAYING_AREA_WIDTH, SIDE_BAR_WIDTH};
use crate::sim::Rect;

/// A filled axis-aligned rectangle in normalized playing-area coordinates:
/// (0, 0) is the bottom-left corner, (1, 1) the top-right.
///
/// Plain-old-data so a host can upload a frame's commands as one buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawCommand {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub color: [f32; 4],
}

impl DrawCommand {
    pub const fn new(min: [f32; 2], max: [f32; 2], color: [f32; 4]) -> Self {
        Self { min, max, color }
    }

    /// From a rectangle in playing-area units
    pub fn from_area_rect(rect: &Rect, color: [f32; 4]) -> Self {
        let scale = Vec2::new(PLAYING_AREA_WIDTH, PLAYING_AREA_HEIGHT);
        let min = rect.min() / scale;
        let max = rect.max() / scale;
        Self::new(min.to_array(), max.to_array(), color)
    }

    /// From a rectangle in arena units (the arena sits between the side bars)
    pub fn from_arena_rect(rect: &Rect, color: [f32; 4]) -> Self {
        Self::from_area_rect(&rect.translated(Vec2::new(SIDE_BAR_WIDTH, 0.0)), color)
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }
}

/// Colors for game elements
pub mod colors {
    pub const SIDE_BAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PADDLE: [f32; 4] = [0.0, 0.5, 0.78, 1.0];
    pub const BALL: [f32; 4] = [0.82, 0.82, 0.82, 1.0];
    pub const SCORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const MENU_TEXT: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const UNKNOWN_GLYPH: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    /// Yellow, green, orange, red
    pub const BRICKS: [[f32; 4]; 4] = [
        [0.77, 0.78, 0.09, 1.0],
        [0.0, 0.5, 0.13, 1.0],
        [0.76, 0.51, 0.0, 1.0],
        [0.63, 0.04, 0.0, 1.0],
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_area_normalizes_to_unit_square() {
        let area = Rect::new(Vec2::ZERO, Vec2::new(PLAYING_AREA_WIDTH, PLAYING_AREA_HEIGHT));
        let cmd = DrawCommand::from_area_rect(&area, colors::BALL);
        assert_eq!(cmd.min, [0.0, 0.0]);
        assert_eq!(cmd.max, [1.0, 1.0]);
    }

    #[test]
    fn test_arena_offset_by_side_bar() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let cmd = DrawCommand::from_arena_rect(&rect, colors::BALL);
        assert!((cmd.min[0] - SIDE_BAR_WIDTH / PLAYING_AREA_WIDTH).abs() < 1e-6);
        assert_eq!(cmd.min[1], 0.0);
        assert!((cmd.width() - 1.0 / PLAYING_AREA_WIDTH).abs() < 1e-6);
    }

    #[test]
    fn test_pod_layout() {
        assert_eq!(std::mem::size_of::<DrawCommand>(), 32);
        let cmds = [DrawCommand::new([0.0; 2], [1.0; 2], colors::PADDLE); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&cmds);
        assert_eq!(bytes.len(), 64);
    }
}
