//! Contribution Breakout - a contribution calendar played as Breakout
//!
//! Core modules:
//! - `grid`: Calendar colors → tiles and canvas geometry
//! - `sim`: Deterministic simulation (physics, collisions, frame history)
//! - `anim`: Frame history → compact keyframe encodings
//! - `renderer`: SVG document output
//! - `settings`: Tunable geometry, speeds and output precision

pub mod anim;
pub mod error;
pub mod grid;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use anim::{AnimationSet, Keyframe, KeyframeEncoding, encode};
pub use error::{Error, GridError, SettingsError};
pub use grid::{Arena, ContributionGrid, Palette};
pub use renderer::{minify, render_document};
pub use settings::Settings;
pub use sim::{SimulationHistory, Tile, simulate};

/// Default configuration constants
pub mod consts {
    /// Border around the canvas (pixels)
    pub const PADDING: f64 = 15.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f64 = 75.0;
    pub const PADDLE_HEIGHT: f64 = 10.0;
    pub const PADDLE_RADIUS: f64 = 5.0;
    /// Space between the last tile row and the paddle
    pub const PADDLE_GAP: f64 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 8.0;
    /// Pixels per frame
    pub const BALL_SPEED: f64 = 10.0;
    pub const BALL_START_OFFSET: f64 = 30.0;

    /// Tile defaults
    pub const TILE_SIZE: f64 = 12.0;
    pub const TILE_GAP: f64 = 3.0;
    pub const TILE_RADIUS: f64 = 3.0;
    pub const DAYS_PER_WEEK: usize = 7;

    /// Ball and paddle fill
    pub const ACCENT_COLOR: &str = "#1F6FEB";

    /// Playback rate (30 FPS)
    pub const SECONDS_PER_FRAME: f64 = 1.0 / 30.0;
    /// Simulation cap; guarantees termination on layouts that never clear
    pub const MAX_FRAMES: u32 = 30_000;
}

/// Render one palette of the calendar as a minified animated SVG
pub fn generate_svg(
    grid: &ContributionGrid,
    palette: Palette,
    settings: &Settings,
) -> Result<String, SettingsError> {
    settings.validate()?;

    let tiles = grid.tiles(palette, settings);
    let arena = Arena::for_grid(grid, settings);
    log::info!(
        "Rendering {} palette: {} weeks, {} tiles",
        palette.as_str(),
        grid.week_count(),
        tiles.len()
    );

    let history = simulate(&tiles, &arena, settings);
    let animations = encode(&history, settings.seconds_per_frame);
    let svg = minify(&render_document(&arena, &tiles, &animations, settings));

    log::info!(
        "{} SVG: {} bytes, {:.1}s loop",
        palette.as_str(),
        svg.len(),
        animations.duration
    );
    Ok(svg)
}

/// Render every palette concurrently
///
/// Each render simulates its own tile list, so the runs share nothing but
/// the read-only grid and settings.
pub fn generate_all(
    grid: &ContributionGrid,
    settings: &Settings,
) -> Result<Vec<(Palette, String)>, SettingsError> {
    settings.validate()?;

    std::thread::scope(|scope| {
        let handles: Vec<_> = Palette::ALL
            .iter()
            .map(|&palette| (palette, scope.spawn(move || generate_svg(grid, palette, settings))))
            .collect();

        handles
            .into_iter()
            .map(|(palette, handle)| {
                let svg = handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))?;
                Ok((palette, svg))
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> ContributionGrid {
        let shades = ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"];
        ContributionGrid::new(
            (0..12)
                .map(|w| {
                    (0..7)
                        .map(|d| match (w * 7 + d) % 6 {
                            5 => None,
                            i => Some(shades[i].to_string()),
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_generate_is_deterministic() {
        let grid = sample_grid();
        let settings = Settings::default();
        let a = generate_svg(&grid, Palette::Light, &settings).unwrap();
        let b = generate_svg(&grid, Palette::Light, &settings).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_all_matches_sequential() {
        let grid = sample_grid();
        let settings = Settings::default();
        let all = generate_all(&grid, &settings).unwrap();

        assert_eq!(all.len(), 2);
        for (palette, svg) in all {
            assert_eq!(svg, generate_svg(&grid, palette, &settings).unwrap());
        }
    }

    #[test]
    fn test_palettes_share_motion() {
        // Color never affects physics, so both documents animate identically
        let grid = sample_grid();
        let settings = Settings::default();
        let light = generate_svg(&grid, Palette::Light, &settings).unwrap();
        let dark = generate_svg(&grid, Palette::Dark, &settings).unwrap();

        let cx = |svg: &str| {
            let start = svg.find(r#"attributeName="cx""#).unwrap();
            svg[start..].split("/>").next().unwrap().to_string()
        };
        assert_eq!(cx(&light), cx(&dark));
        assert_ne!(light, dark);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            capture_stride: 0,
            ..Default::default()
        };
        assert!(generate_svg(&sample_grid(), Palette::Light, &settings).is_err());
        assert!(generate_all(&sample_grid(), &settings).is_err());
    }

    #[test]
    fn test_empty_calendar() {
        let grid = ContributionGrid::default();
        let svg = generate_svg(&grid, Palette::Dark, &Settings::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }
}
