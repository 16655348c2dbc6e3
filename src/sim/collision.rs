//! Swept collision detection for axis-aligned rectangles
//!
//! The moving rectangle is reduced to its center point, and the target is grown
//! by the mover's half-extents on every side (Minkowski expansion). The sweep
//! then becomes a ray cast of one point against one rectangle, which is solved
//! per edge and compared against a slightly inflated box to absorb rounding.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use glam::Vec2;

use super::geom::Rect;

/// Distance used both to inflate hit boxes and to push the ball off a surface
/// after a reflection.
pub const CONTACT_EPSILON: f32 = 0.001;

/// Bitset over the four edges of the expanded target rectangle
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Edges(u8);

impl Edges {
    pub const NONE: Edges = Edges(0);
    pub const LEFT: Edges = Edges(1 << 0);
    pub const BOTTOM: Edges = Edges(1 << 1);
    pub const RIGHT: Edges = Edges(1 << 2);
    pub const TOP: Edges = Edges(1 << 3);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set in `self`
    pub const fn contains(self, other: Edges) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// True if any bit of `other` is set in `self`
    pub const fn intersects(self, other: Edges) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Struck a vertical face (left or right)
    pub const fn horizontal(self) -> bool {
        self.intersects(Edges(Self::LEFT.0 | Self::RIGHT.0))
    }

    /// Struck a horizontal face (bottom or top)
    pub const fn vertical(self) -> bool {
        self.intersects(Edges(Self::BOTTOM.0 | Self::TOP.0))
    }
}

impl BitOr for Edges {
    type Output = Edges;

    fn bitor(self, rhs: Edges) -> Edges {
        Edges(self.0 | rhs.0)
    }
}

impl BitOrAssign for Edges {
    fn bitor_assign(&mut self, rhs: Edges) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Edges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Edges::LEFT, "LEFT"),
            (Edges::BOTTOM, "BOTTOM"),
            (Edges::RIGHT, "RIGHT"),
            (Edges::TOP, "TOP"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(edge, _)| self.contains(*edge))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "Edges({})", set.join("|"))
    }
}

/// Result of a time-of-impact query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Fraction of the swept displacement at first contact, in [0, 1]
    pub time: f32,
    /// Edge(s) of the expanded target crossed at `time`
    pub edges: Edges,
}

impl Impact {
    /// No contact within the sweep
    pub const fn miss() -> Self {
        Self {
            time: 1.0,
            edges: Edges::NONE,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        !self.edges.is_empty()
    }
}

/// Compute when the rectangle `a`, moving by `delta_a`, first touches `b`,
/// moving by `delta_b`, within one sweep.
///
/// Candidate times are only accepted in (0, 1]. An axis with no relative motion
/// produces no candidates. Edges struck at the same minimal time are OR'ed
/// together so corner hits report both faces.
pub fn compute_impact(a: &Rect, delta_a: Vec2, b: &Rect, delta_b: Vec2) -> Impact {
    let point = a.center();
    let rel = delta_a - delta_b;

    let expanded = b.minkowski_expand(a.dim);
    let hit_box = expanded.inflate(CONTACT_EPSILON);

    let mut candidates: [Option<(f32, Edges)>; 4] = [None; 4];
    if rel.x != 0.0 {
        candidates[0] = Some(((expanded.left() - point.x) / rel.x, Edges::LEFT));
        candidates[2] = Some(((expanded.right() - point.x) / rel.x, Edges::RIGHT));
    }
    if rel.y != 0.0 {
        candidates[1] = Some(((expanded.bottom() - point.y) / rel.y, Edges::BOTTOM));
        candidates[3] = Some(((expanded.top() - point.y) / rel.y, Edges::TOP));
    }

    let mut result = Impact::miss();
    for (t, edge) in candidates.into_iter().flatten() {
        if !(t > 0.0 && t <= 1.0) {
            continue;
        }
        let hit = point + t * rel;
        if !hit_box.contains_point(hit) {
            continue;
        }
        if t < result.time {
            result.time = t;
            result.edges = edge;
        } else if t == result.time {
            result.edges |= edge;
        }
    }

    result
}

/// Mirror a direction off the struck faces.
///
/// Left/right faces flip x, bottom/top faces flip y; a corner flips both.
pub fn reflect_direction(direction: Vec2, edges: Edges) -> Vec2 {
    let mut out = direction;
    if edges.horizontal() {
        out.x = -out.x;
    }
    if edges.vertical() {
        out.y = -out.y;
    }
    out
}

/// Nudge a position away from the struck faces by `CONTACT_EPSILON`.
///
/// Striking a target's LEFT face means the mover sits to its left, so it is
/// pushed further left, and likewise for the other faces.
pub fn push_away(pos: Vec2, edges: Edges) -> Vec2 {
    let mut out = pos;
    if edges.horizontal() {
        out.x += if edges.contains(Edges::LEFT) {
            -CONTACT_EPSILON
        } else {
            CONTACT_EPSILON
        };
    }
    if edges.vertical() {
        out.y += if edges.contains(Edges::BOTTOM) {
            -CONTACT_EPSILON
        } else {
            CONTACT_EPSILON
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f32, y: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(2.0, 2.0))
    }

    #[test]
    fn test_head_on_hit_reports_single_edge() {
        // Ball center at (1, 1), target spans x in [10, 12]; expanded left edge at 9
        let ball = ball_at(0.0, 0.0);
        let target = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(2.0, 2.0));

        let impact = compute_impact(&ball, Vec2::new(16.0, 0.0), &target, Vec2::ZERO);
        assert_eq!(impact.edges, Edges::LEFT);
        assert!((impact.time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_miss_returns_default() {
        let ball = ball_at(0.0, 0.0);
        let target = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, 2.0));

        let impact = compute_impact(&ball, Vec2::new(16.0, 0.0), &target, Vec2::ZERO);
        assert_eq!(impact, Impact::miss());
        assert!(!impact.is_hit());
    }

    #[test]
    fn test_short_sweep_does_not_reach() {
        let ball = ball_at(0.0, 0.0);
        let target = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(2.0, 2.0));

        let impact = compute_impact(&ball, Vec2::new(4.0, 0.0), &target, Vec2::ZERO);
        assert!(!impact.is_hit());
        assert_eq!(impact.time, 1.0);
    }

    #[test]
    fn test_contact_exactly_at_end_of_sweep() {
        let ball = ball_at(0.0, 0.0);
        let target = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(2.0, 2.0));

        let impact = compute_impact(&ball, Vec2::new(8.0, 0.0), &target, Vec2::ZERO);
        assert_eq!(impact.edges, Edges::LEFT);
        assert_eq!(impact.time, 1.0);
    }

    #[test]
    fn test_moving_away_never_hits() {
        let ball = ball_at(0.0, 0.0);
        let target = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(2.0, 2.0));

        let impact = compute_impact(&ball, Vec2::new(-20.0, 0.0), &target, Vec2::ZERO);
        assert!(!impact.is_hit());
    }

    #[test]
    fn test_corner_hit_sets_two_bits() {
        // Ball center (1, 1); expanded target min corner at (4, 4); diagonal sweep hits it exactly
        let ball = ball_at(0.0, 0.0);
        let target = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(4.0, 4.0));

        let impact = compute_impact(&ball, Vec2::new(6.0, 6.0), &target, Vec2::ZERO);
        assert_eq!(impact.edges, Edges::LEFT | Edges::BOTTOM);
        assert_eq!(impact.edges.count(), 2);
        assert!((impact.time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_relative_motion_of_target() {
        // Ball at rest, target sliding into it from the right
        let ball = ball_at(0.0, 0.0);
        let target = Rect::new(Vec2::new(6.0, 0.0), Vec2::new(2.0, 2.0));

        let impact = compute_impact(&ball, Vec2::ZERO, &target, Vec2::new(-8.0, 0.0));
        // Relative to the target the ball moves right and strikes its LEFT face
        assert_eq!(impact.edges, Edges::LEFT);
        assert!((impact.time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_wall_segment() {
        // Ceiling segment at y = 20; ball moving straight up strikes its bottom face
        let ball = ball_at(4.0, 10.0);
        let ceiling = Rect::new(Vec2::new(0.0, 20.0), Vec2::new(50.0, 0.0));

        let impact = compute_impact(&ball, Vec2::new(0.0, 16.0), &ceiling, Vec2::ZERO);
        assert_eq!(impact.edges, Edges::BOTTOM);
        assert!((impact.time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_direction() {
        let d = Vec2::new(0.6, 0.8);
        assert_eq!(reflect_direction(d, Edges::LEFT), Vec2::new(-0.6, 0.8));
        assert_eq!(reflect_direction(d, Edges::TOP), Vec2::new(0.6, -0.8));
        assert_eq!(
            reflect_direction(d, Edges::RIGHT | Edges::BOTTOM),
            Vec2::new(-0.6, -0.8)
        );
        assert_eq!(reflect_direction(d, Edges::NONE), d);
    }

    #[test]
    fn test_push_away() {
        let p = Vec2::new(5.0, 5.0);
        assert_eq!(push_away(p, Edges::LEFT), Vec2::new(5.0 - CONTACT_EPSILON, 5.0));
        assert_eq!(push_away(p, Edges::TOP), Vec2::new(5.0, 5.0 + CONTACT_EPSILON));
        let corner = push_away(p, Edges::RIGHT | Edges::BOTTOM);
        assert_eq!(corner, Vec2::new(5.0 + CONTACT_EPSILON, 5.0 - CONTACT_EPSILON));
    }

    #[test]
    fn test_edges_debug() {
        assert_eq!(format!("{:?}", Edges::LEFT | Edges::TOP), "Edges(LEFT|TOP)");
        assert_eq!(format!("{:?}", Edges::NONE), "Edges()");
    }
}
