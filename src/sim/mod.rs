//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame step only
//! - No randomness
//! - Stable iteration order (tile list order)
//! - No rendering or I/O dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_collision};
pub use state::{Ball, FrameSnapshot, Paddle, SimState, SimulationHistory, Tile, TileStatus};
pub use tick::{simulate, tick};
