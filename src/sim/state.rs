//! Simulation state and history types
//!
//! Tile geometry is immutable; only the per-tile status vector in
//! [`SimState`] changes from frame to frame.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::grid::Arena;
use crate::settings::Settings;

/// Whether a tile is still on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileStatus {
    #[default]
    Visible,
    Hidden,
}

/// One destructible calendar cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Top-left corner
    pub x: f64,
    pub y: f64,
    /// Resolved display color
    pub color: String,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    /// Pixels per frame
    pub vel: DVec2,
}

impl Ball {
    /// Ball centered horizontally near the bottom, launched at the configured angle
    pub fn launch(arena: &Arena, settings: &Settings) -> Self {
        let (sin, cos) = settings.launch_angle.sin_cos();
        Self {
            pos: DVec2::new(arena.width / 2.0, arena.height - settings.ball_start_offset),
            vel: DVec2::new(cos, sin) * settings.ball_speed,
        }
    }
}

/// The paddle; its y is fixed by [`Arena::paddle_y`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f64,
}

impl Paddle {
    pub fn centered(arena: &Arena, settings: &Settings) -> Self {
        Self {
            x: (arena.width - settings.paddle_width) / 2.0,
        }
    }

    /// Center the paddle under `target_x`, kept inside the padded canvas
    pub fn track(&mut self, target_x: f64, arena: &Arena, settings: &Settings) {
        let max_x = arena.width - settings.padding - settings.paddle_width;
        // min before max: a canvas narrower than the paddle pins it to the padding
        self.x = (target_x - settings.paddle_width / 2.0)
            .min(max_x)
            .max(settings.padding);
    }
}

/// Everything that changes between frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub ball: Ball,
    pub paddle: Paddle,
    /// Indexed like the tile list
    pub tiles: Vec<TileStatus>,
    /// Frames simulated so far
    pub frame: u32,
}

impl SimState {
    /// Initial state with every tile visible
    pub fn new(tile_count: usize, arena: &Arena, settings: &Settings) -> Self {
        Self {
            ball: Ball::launch(arena, settings),
            paddle: Paddle::centered(arena, settings),
            tiles: vec![TileStatus::Visible; tile_count],
            frame: 0,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|s| **s == TileStatus::Visible)
            .count()
    }

    pub fn any_visible(&self) -> bool {
        self.tiles.contains(&TileStatus::Visible)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            ball: self.ball.pos,
            paddle_x: self.paddle.x,
            tiles: self.tiles.clone(),
        }
    }
}

/// State captured after one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub ball: DVec2,
    pub paddle_x: f64,
    pub tiles: Vec<TileStatus>,
}

impl FrameSnapshot {
    pub fn visible_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|s| **s == TileStatus::Visible)
            .count()
    }
}

/// Ordered snapshots of one run; never empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationHistory {
    frames: Vec<FrameSnapshot>,
    /// Simulated frames between consecutive snapshots
    pub capture_stride: u32,
    /// Frames actually simulated
    pub frames_simulated: u32,
    /// Whether every tile was destroyed before the frame cap
    pub cleared: bool,
}

impl SimulationHistory {
    pub(crate) fn new(
        frames: Vec<FrameSnapshot>,
        capture_stride: u32,
        frames_simulated: u32,
        cleared: bool,
    ) -> Self {
        debug_assert!(!frames.is_empty());
        Self {
            frames,
            capture_stride,
            frames_simulated,
            cleared,
        }
    }

    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn last(&self) -> Option<&FrameSnapshot> {
        self.frames.last()
    }

    /// Index of the first snapshot in which tile `index` is hidden
    pub fn first_hidden(&self, index: usize) -> Option<usize> {
        self.frames
            .iter()
            .position(|f| f.tiles.get(index) != Some(&TileStatus::Visible))
    }

    /// True if tile `index` is hidden in the last snapshot
    pub fn hidden_at_end(&self, index: usize) -> bool {
        self.last()
            .and_then(|f| f.tiles.get(index))
            .is_some_and(|s| *s == TileStatus::Hidden)
    }
}
