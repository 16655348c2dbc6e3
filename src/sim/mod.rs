//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Variable frame time, consumed in collision-bounded sub-steps
//! - Serve direction from a clock-seeded RNG owned by the state
//! - Stable iteration order (by brick slot)

pub mod collision;
pub mod geom;
pub mod layout;
pub mod physics;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::{CONTACT_EPSILON, Edges, Impact, compute_impact, push_away, reflect_direction};
pub use geom::Rect;
pub use layout::Wall;
pub use physics::{BrickHits, Contacts, WallHits, step_frame};
pub use state::{
    Ball, Brick, BrickField, BrickKind, Difficulty, GameEvent, GamePhase, GameState, Paddle,
    ResetTarget,
};
pub use tick::{FrameInput, MenuItem, NO_CONTROL, menu_header, menu_items, tick};
