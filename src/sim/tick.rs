//! Fixed-step simulation
//!
//! `tick` is the per-frame transition; `simulate` runs it until the board is
//! cleared or the frame cap is hit, recording snapshots along the way.

use super::collision::{Rect, circle_rect_collision};
use super::state::{SimState, SimulationHistory, Tile, TileStatus};
use crate::grid::Arena;
use crate::settings::Settings;

/// Advance the simulation by one frame
///
/// Order matters and matches the recorded animation:
/// paddle tracking (from the pre-move ball x), integration, wall reflection,
/// paddle bounce, tile hit (first visible tile in list order only), then the
/// bounds clamp.
pub fn tick(mut state: SimState, tiles: &[Tile], arena: &Arena, settings: &Settings) -> SimState {
    let radius = settings.ball_radius;
    let min = settings.ball_min();
    let max_x = arena.width - settings.padding - radius;
    let max_y = arena.height - settings.padding - radius;

    state.paddle.track(state.ball.pos.x, arena, settings);

    let ball = &mut state.ball;
    ball.pos += ball.vel;

    // Walls are tested against where the ball would be next frame
    let next = ball.pos + ball.vel;
    if next.x > max_x || next.x < min {
        ball.vel.x = -ball.vel.x;
    }
    // No bottom wall: the paddle is the floor
    if next.y < min {
        ball.vel.y = -ball.vel.y;
    }

    let next_bottom = ball.pos.y + ball.vel.y + radius;
    if ball.vel.y > 0.0 && next_bottom >= arena.paddle_y && ball.pos.y + radius <= arena.paddle_y
    {
        ball.vel.y = -ball.vel.y.abs();
        ball.pos.y = arena.paddle_y - radius;
    }

    let hit = tiles
        .iter()
        .zip(&state.tiles)
        .position(|(tile, status)| {
            *status == TileStatus::Visible
                && circle_rect_collision(
                    ball.pos,
                    radius,
                    &Rect::square(tile.x, tile.y, settings.tile_size),
                )
        });
    if let Some(index) = hit {
        state.tiles[index] = TileStatus::Hidden;
        ball.vel.y = -ball.vel.y;
    }

    // min before max so a degenerate canvas pins to the lower bound
    ball.pos.x = ball.pos.x.min(max_x).max(min);
    ball.pos.y = ball.pos.y.min(max_y).max(min);

    state.frame += 1;
    state
}

/// Run the breakout simulation over `tiles`
///
/// Pure and deterministic. The returned history always holds at least one
/// snapshot: when no frame is simulated (no tiles) the initial state is
/// recorded instead.
pub fn simulate(tiles: &[Tile], arena: &Arena, settings: &Settings) -> SimulationHistory {
    let stride = settings.capture_stride.max(1);
    let mut state = SimState::new(tiles.len(), arena, settings);
    let mut frames = Vec::new();

    log::debug!(
        "Simulating {} tiles on {}x{} canvas (cap {} frames)",
        tiles.len(),
        arena.width,
        arena.height,
        settings.max_frames
    );

    while state.any_visible() && state.frame < settings.max_frames {
        let frame = state.frame;
        state = tick(state, tiles, arena, settings);
        if frame % stride == 0 {
            frames.push(state.snapshot());
        }
    }

    let cleared = !state.any_visible();
    if !cleared {
        log::warn!(
            "Frame cap of {} reached with {} of {} tiles remaining",
            settings.max_frames,
            state.visible_count(),
            tiles.len()
        );
    }
    if frames.is_empty() {
        frames.push(state.snapshot());
    }

    log::info!(
        "Simulated {} frames, captured {} snapshots",
        state.frame,
        frames.len()
    );

    SimulationHistory::new(frames, stride, state.frame, cleared)
}
