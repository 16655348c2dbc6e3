//! Axis-aligned rectangle geometry
//!
//! Rectangles are stored as a minimum (bottom-left) corner plus a non-negative
//! extent. A rectangle with zero width or height is a wall segment.
//! Vector arithmetic (add/sub/scale) comes straight from `glam::Vec2`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in arena units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum (bottom-left) corner
    pub pos: Vec2,
    /// Width and height, never negative
    pub dim: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, dim: Vec2) -> Self {
        Self { pos, dim }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.dim
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + 0.5 * self.dim
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.dim.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.dim.y
    }

    /// Inclusive containment test on all four sides.
    ///
    /// Must agree with the inflated hit test in the swept solver, so points
    /// lying exactly on an edge count as inside.
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.pos.x && p.x <= self.right() && p.y >= self.pos.y && p.y <= self.top()
    }

    /// Grow the rectangle by `amount` on every side
    #[inline]
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            pos: self.pos - Vec2::splat(amount),
            dim: self.dim + Vec2::splat(2.0 * amount),
        }
    }

    /// Minkowski sum with a rectangle of extent `other_dim` centered on the origin.
    ///
    /// Sweeping the center of a `other_dim` rectangle against the result is
    /// equivalent to sweeping the whole rectangle against `self`.
    #[inline]
    pub fn minkowski_expand(&self, other_dim: Vec2) -> Self {
        Self {
            pos: self.pos - 0.5 * other_dim,
            dim: self.dim + other_dim,
        }
    }

    /// Move the rectangle by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            dim: self.dim,
        }
    }

    /// True if the rectangle is a zero-width or zero-height segment
    pub fn is_degenerate(&self) -> bool {
        self.dim.x == 0.0 || self.dim.y == 0.0
    }

    /// True if the interiors (or edges) of the two rectangles touch
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.bottom() <= other.top()
            && other.bottom() <= self.top()
    }
}
