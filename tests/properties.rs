//! Property tests for the collision solver and the sub-step loop

use brickfall::consts::*;
use brickfall::sim::{
    CONTACT_EPSILON, Edges, GamePhase, GameState, Rect, compute_impact, reflect_direction,
    step_frame,
};
use glam::Vec2;
use proptest::prelude::*;

fn vec2(range: std::ops::Range<f32>) -> impl Strategy<Value = Vec2> {
    (range.clone(), range).prop_map(|(x, y)| Vec2::new(x, y))
}

fn rect() -> impl Strategy<Value = Rect> {
    (vec2(-50.0..50.0), vec2(0.5..10.0)).prop_map(|(pos, dim)| Rect::new(pos, dim))
}

/// Parameter interval within [0, 1] where `start + t * rel` is strictly inside
/// `rect`, by slab intersection
fn slab_overlap(start: Vec2, rel: Vec2, rect: &Rect) -> Option<(f32, f32)> {
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    let axes = [
        (start.x, rel.x, rect.left(), rect.right()),
        (start.y, rel.y, rect.bottom(), rect.top()),
    ];
    for (p, d, min, max) in axes {
        if d == 0.0 {
            if p <= min || p >= max {
                return None;
            }
        } else {
            let (t0, t1) = ((min - p) / d, (max - p) / d);
            lo = lo.max(t0.min(t1));
            hi = hi.min(t0.max(t1));
        }
    }
    (lo < hi).then_some((lo, hi))
}

proptest! {
    #[test]
    fn impact_time_is_bounded(
        a in rect(),
        b in rect(),
        da in vec2(-40.0..40.0),
        db in vec2(-40.0..40.0),
    ) {
        let impact = compute_impact(&a, da, &b, db);
        prop_assert!(impact.time > 0.0 && impact.time <= 1.0);
        if !impact.is_hit() {
            prop_assert_eq!(impact.time, 1.0);
        }
    }

    #[test]
    fn miss_means_the_sweep_stays_outside(
        a in rect(),
        b in rect(),
        da in vec2(-40.0..40.0),
        db in vec2(-40.0..40.0),
    ) {
        let expanded = b.minkowski_expand(a.dim);
        let start = a.center();
        prop_assume!(!expanded.inflate(CONTACT_EPSILON).contains_point(start));

        let impact = compute_impact(&a, da, &b, db);
        if !impact.is_hit() {
            let interior = expanded.inflate(-1e-3);
            let entered = slab_overlap(start, da - db, &interior);
            prop_assert!(entered.is_none(), "missed a sweep inside {:?}", entered);
        }
    }

    #[test]
    fn reflection_preserves_speed(
        angle in 0.0f32..std::f32::consts::TAU,
        bits in 0u8..16,
    ) {
        let dir = Vec2::from_angle(angle);
        let mut edges = Edges::NONE;
        for (bit, edge) in [(1, Edges::LEFT), (2, Edges::BOTTOM), (4, Edges::RIGHT), (8, Edges::TOP)] {
            if bits & bit != 0 {
                edges |= edge;
            }
        }
        let out = reflect_direction(dir, edges);
        prop_assert!((out.length() - dir.length()).abs() < 1e-6);
    }

    #[test]
    fn ball_never_tunnels(
        x in 5.0f32..100.0,
        y in 20.0f32..80.0,
        angle in 0.0f32..std::f32::consts::TAU,
        speed in 1.0f32..500.0,
        dt in 0.001f32..(1.0 / 30.0),
    ) {
        let mut state = GameState::default();
        state.initialize();
        state.phase = GamePhase::Playing;
        state.ball.rect.pos = Vec2::new(x, y);
        state.ball.direction = Vec2::from_angle(angle);
        state.ball.speed = speed;
        state.ball.target_speed = speed;
        let start = state.ball.rect.pos;

        step_frame(&mut state, dt, None);

        let ball = state.ball.rect;
        prop_assert!(ball.left() >= -0.01 && ball.right() <= ARENA_WIDTH + 0.01);
        prop_assert!(ball.bottom() >= -0.01 && ball.top() <= ARENA_HEIGHT + 0.01);

        // Path length never exceeds speed * dt, plus one push-off per contact
        let moved = (ball.pos - start).length();
        prop_assert!(moved <= speed * dt + 0.01 * MAX_SUBSTEP_ITERATIONS as f32);

        let inner = ball.inflate(-1e-4);
        for (_, brick) in state.bricks.iter_live() {
            prop_assert!(!brick.rect.overlaps(&inner));
        }
    }
}
