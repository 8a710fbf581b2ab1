//! Simulation and rendering tunables
//!
//! Every geometry, speed and formatting constant lives here so the simulator
//! and encoder can be driven with alternate layouts in tests.

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::SettingsError;

/// Tunables for one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    /// Empty border around the play area (pixels)
    pub padding: f64,

    // === Paddle ===
    pub paddle_width: f64,
    pub paddle_height: f64,
    /// Corner radius of the paddle rectangle
    pub paddle_radius: f64,
    /// Gap between the last row of tiles and the paddle
    pub paddle_gap: f64,
    pub paddle_color: String,

    // === Ball ===
    pub ball_radius: f64,
    /// Pixels travelled per frame
    pub ball_speed: f64,
    /// Launch angle in radians (negative is up)
    pub launch_angle: f64,
    /// Starting height above the canvas bottom
    pub ball_start_offset: f64,
    pub ball_color: String,

    // === Tiles ===
    pub tile_size: f64,
    pub tile_gap: f64,
    pub tile_radius: f64,
    /// Days per calendar column
    pub rows_per_column: usize,

    // === Timeline ===
    /// Record one snapshot every `capture_stride` frames
    pub capture_stride: u32,
    /// Playback duration of one simulated frame
    pub seconds_per_frame: f64,
    /// Hard cap on simulated frames
    pub max_frames: u32,
    /// Decimals kept for positions in the output
    pub value_precision: usize,
    /// Decimals kept for key times in the output
    pub time_precision: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            padding: consts::PADDING,

            paddle_width: consts::PADDLE_WIDTH,
            paddle_height: consts::PADDLE_HEIGHT,
            paddle_radius: consts::PADDLE_RADIUS,
            paddle_gap: consts::PADDLE_GAP,
            paddle_color: consts::ACCENT_COLOR.to_string(),

            ball_radius: consts::BALL_RADIUS,
            ball_speed: consts::BALL_SPEED,
            launch_angle: -std::f64::consts::FRAC_PI_4,
            ball_start_offset: consts::BALL_START_OFFSET,
            ball_color: consts::ACCENT_COLOR.to_string(),

            tile_size: consts::TILE_SIZE,
            tile_gap: consts::TILE_GAP,
            tile_radius: consts::TILE_RADIUS,
            rows_per_column: consts::DAYS_PER_WEEK,

            capture_stride: 1,
            seconds_per_frame: consts::SECONDS_PER_FRAME,
            max_frames: consts::MAX_FRAMES,
            value_precision: 1,
            time_precision: 4,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulator cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.capture_stride == 0 {
            return Err(SettingsError::Invalid("capture_stride must be at least 1".into()));
        }
        if self.max_frames == 0 {
            return Err(SettingsError::Invalid("max_frames must be at least 1".into()));
        }
        if self.rows_per_column == 0 {
            return Err(SettingsError::Invalid("rows_per_column must be at least 1".into()));
        }
        if !(self.seconds_per_frame.is_finite() && self.seconds_per_frame > 0.0) {
            return Err(SettingsError::Invalid(
                "seconds_per_frame must be a positive number".into(),
            ));
        }

        let lengths = [
            ("padding", self.padding),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_radius", self.paddle_radius),
            ("paddle_gap", self.paddle_gap),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("ball_start_offset", self.ball_start_offset),
            ("tile_size", self.tile_size),
            ("tile_gap", self.tile_gap),
            ("tile_radius", self.tile_radius),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if !self.launch_angle.is_finite() {
            return Err(SettingsError::Invalid("launch_angle must be finite".into()));
        }

        Ok(())
    }

    /// Horizontal/vertical distance between neighbouring tile origins
    #[inline]
    pub fn tile_pitch(&self) -> f64 {
        self.tile_size + self.tile_gap
    }

    /// Inner edge of the play area for the ball center
    #[inline]
    pub fn ball_min(&self) -> f64 {
        self.padding + self.ball_radius
    }
}
