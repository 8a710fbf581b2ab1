//! Keyframe encoding of a simulation history
//!
//! Ball and paddle get one keyframe per snapshot on a shared time axis.
//! Tiles change at most once (visible → hidden), so each destroyed tile
//! collapses to a four-point step and untouched tiles need no timeline.

use serde::{Deserialize, Serialize};

use crate::sim::SimulationHistory;

pub const OPAQUE: f64 = 1.0;
pub const TRANSPARENT: f64 = 0.0;

/// A `(time, value)` breakpoint with time normalized to `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
}

impl Keyframe {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// How one animated attribute evolves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeyframeEncoding {
    /// Constant for the whole animation
    Static(f64),
    /// Keyframes in non-decreasing time order
    Timeline(Vec<Keyframe>),
}

impl KeyframeEncoding {
    pub fn is_static(&self) -> bool {
        matches!(self, KeyframeEncoding::Static(_))
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        match self {
            KeyframeEncoding::Static(_) => &[],
            KeyframeEncoding::Timeline(frames) => frames,
        }
    }

    /// Value shown at the start of the animation
    pub fn initial(&self) -> f64 {
        match self {
            KeyframeEncoding::Static(value) => *value,
            KeyframeEncoding::Timeline(frames) => frames.first().map_or(0.0, |k| k.value),
        }
    }

    /// Step from opaque to transparent at `t`
    pub fn vanish_at(t: f64) -> Self {
        KeyframeEncoding::Timeline(vec![
            Keyframe::new(0.0, OPAQUE),
            Keyframe::new(t, OPAQUE),
            Keyframe::new(t, TRANSPARENT),
            Keyframe::new(1.0, TRANSPARENT),
        ])
    }

    /// One keyframe per value on `times`; a single value is static
    fn track(times: &[f64], values: impl Iterator<Item = f64>) -> Self {
        let mut frames: Vec<Keyframe> = times
            .iter()
            .zip(values)
            .map(|(&time, value)| Keyframe::new(time, value))
            .collect();
        if frames.len() <= 1 {
            return KeyframeEncoding::Static(frames.pop().map_or(0.0, |k| k.value));
        }
        KeyframeEncoding::Timeline(frames)
    }
}

/// Every animation of one render, sharing a duration and time axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSet {
    /// Snapshots in the history
    pub frame_count: usize,
    /// Playback length in seconds
    pub duration: f64,
    /// `i / (N - 1)` for each snapshot
    pub key_times: Vec<f64>,
    pub ball_x: KeyframeEncoding,
    pub ball_y: KeyframeEncoding,
    pub paddle_x: KeyframeEncoding,
    /// Opacity per tile, indexed like the tile list
    pub tiles: Vec<KeyframeEncoding>,
}

/// Normalized time of snapshot `index` out of `count`
///
/// A single-snapshot history has nothing to interpolate over; every index
/// maps to 0.
#[inline]
pub fn normalized_time(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

/// Encode a history into keyframes
///
/// `seconds_per_frame` is the playback duration of one simulated frame.
pub fn encode(history: &SimulationHistory, seconds_per_frame: f64) -> AnimationSet {
    let frames = history.frames();
    let count = frames.len();
    let key_times: Vec<f64> = (0..count).map(|i| normalized_time(i, count)).collect();

    let tile_count = frames.first().map_or(0, |f| f.tiles.len());
    let tiles = (0..tile_count)
        .map(|index| match history.first_hidden(index) {
            None => KeyframeEncoding::Static(OPAQUE),
            Some(hidden_at) => KeyframeEncoding::vanish_at(normalized_time(hidden_at, count)),
        })
        .collect::<Vec<_>>();

    let animated = tiles.iter().filter(|t| !t.is_static()).count();
    log::debug!(
        "Encoded {} snapshots: {} of {} tiles animated",
        count,
        animated,
        tile_count
    );

    AnimationSet {
        frame_count: count,
        duration: count as f64 * seconds_per_frame * f64::from(history.capture_stride),
        ball_x: KeyframeEncoding::track(&key_times, frames.iter().map(|f| f.ball.x)),
        ball_y: KeyframeEncoding::track(&key_times, frames.iter().map(|f| f.ball.y)),
        paddle_x: KeyframeEncoding::track(&key_times, frames.iter().map(|f| f.paddle_x)),
        key_times,
        tiles,
    }
}

impl AnimationSet {
    /// Tiles still on the board when the animation ends
    pub fn surviving_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_static()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Arena, ContributionGrid, Palette};
    use crate::settings::Settings;
    use crate::sim::simulate;

    fn run(grid: &ContributionGrid, settings: &Settings) -> (SimulationHistory, AnimationSet) {
        let tiles = grid.tiles(Palette::Light, settings);
        let arena = Arena::for_grid(grid, settings);
        let history = simulate(&tiles, &arena, settings);
        let anim = encode(&history, settings.seconds_per_frame);
        (history, anim)
    }

    fn full_grid(weeks: usize) -> ContributionGrid {
        ContributionGrid::new(vec![vec![Some("#9be9a8".to_string()); 7]; weeks])
    }

    #[test]
    fn test_normalized_time() {
        assert_eq!(normalized_time(0, 1), 0.0);
        assert_eq!(normalized_time(0, 5), 0.0);
        assert_eq!(normalized_time(2, 5), 0.5);
        assert_eq!(normalized_time(4, 5), 1.0);
    }

    #[test]
    fn test_vanish_at_is_a_step() {
        let enc = KeyframeEncoding::vanish_at(0.25);
        let times: Vec<f64> = enc.keyframes().iter().map(|k| k.time).collect();
        let values: Vec<f64> = enc.keyframes().iter().map(|k| k.value).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.25, 1.0]);
        assert_eq!(values, vec![1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_tile_encodings_match_history() {
        let settings = Settings::default();
        let (history, anim) = run(&full_grid(6), &settings);
        let n = history.len();

        assert_eq!(anim.tiles.len(), 42);
        for (i, enc) in anim.tiles.iter().enumerate() {
            if history.hidden_at_end(i) {
                let frames = enc.keyframes();
                assert_eq!(frames.len(), 4);
                assert!(frames.windows(2).all(|w| w[0].time <= w[1].time));
                assert!(frames.iter().all(|k| (0.0..=1.0).contains(&k.time)));
                let f = history.first_hidden(i).unwrap();
                assert_eq!(frames[1].time, f as f64 / (n - 1) as f64);
            } else {
                assert_eq!(*enc, KeyframeEncoding::Static(OPAQUE));
            }
        }
    }

    #[test]
    fn test_survivors_stay_static_when_capped() {
        let settings = Settings {
            max_frames: 200,
            ..Default::default()
        };
        let (history, anim) = run(&full_grid(53), &settings);
        assert!(!history.cleared);
        assert_eq!(anim.surviving_tiles(), history.last().unwrap().visible_count());
        assert!(anim.surviving_tiles() > 0);
    }

    #[test]
    fn test_tracks_align_with_key_times() {
        let settings = Settings::default();
        let (history, anim) = run(&full_grid(3), &settings);

        assert_eq!(anim.frame_count, history.len());
        assert_eq!(anim.key_times.len(), history.len());
        assert_eq!(anim.key_times.first(), Some(&0.0));
        assert_eq!(anim.key_times.last(), Some(&1.0));
        for track in [&anim.ball_x, &anim.ball_y, &anim.paddle_x] {
            assert_eq!(track.keyframes().len(), history.len());
        }
        assert_eq!(anim.ball_y.keyframes()[0].value, history.frames()[0].ball.y);
        assert_eq!(anim.duration, history.len() as f64 * settings.seconds_per_frame);
    }

    #[test]
    fn test_empty_board_is_static() {
        let settings = Settings::default();
        let grid = ContributionGrid::new(vec![vec![None; 7]; 4]);
        let (history, anim) = run(&grid, &settings);

        assert_eq!(history.len(), 1);
        assert_eq!(anim.key_times, vec![0.0]);
        assert!(anim.tiles.is_empty());
        assert!(anim.ball_x.is_static());
        assert!(anim.ball_y.is_static());
        assert!(anim.paddle_x.is_static());
        assert_eq!(anim.ball_x.initial(), history.frames()[0].ball.x);
        assert!(anim.duration.is_finite());
    }

    #[test]
    fn test_stride_scales_duration() {
        let settings = Settings {
            capture_stride: 2,
            ..Default::default()
        };
        let (history, anim) = run(&full_grid(2), &settings);
        assert_eq!(anim.duration, history.len() as f64 * settings.seconds_per_frame * 2.0);
    }
}
