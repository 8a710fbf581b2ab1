//! Contribution calendar → tile layout
//!
//! The calendar arrives as weeks (columns) of days (rows), each day either a
//! hex color or absent. Absent days produce no tile.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::settings::Settings;
use crate::sim::Tile;

/// Darkest shade of the dark calendar palette, used for unknown colors
pub const DARK_FALLBACK: &str = "#151B23";

/// Light calendar colors and their dark-mode counterparts
pub const LIGHT_TO_DARK: [(&str, &str); 5] = [
    ("#ebedf0", "#151B23"),
    ("#9be9a8", "#033A16"),
    ("#40c463", "#196C2E"),
    ("#30a14e", "#2EA043"),
    ("#216e39", "#56D364"),
];

/// Color scheme for tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Palette {
    /// Source colors as supplied
    #[default]
    Light,
    /// Source colors remapped through [`LIGHT_TO_DARK`]
    Dark,
}

impl Palette {
    pub const ALL: [Palette; 2] = [Palette::Light, Palette::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Palette::Light => "light",
            Palette::Dark => "dark",
        }
    }

    /// Resolve the display color of one calendar cell
    pub fn resolve(&self, color: &str) -> String {
        match self {
            Palette::Light => color.to_string(),
            Palette::Dark => LIGHT_TO_DARK
                .iter()
                .find(|(light, _)| light.eq_ignore_ascii_case(color))
                .map(|(_, dark)| *dark)
                .unwrap_or(DARK_FALLBACK)
                .to_string(),
        }
    }
}

/// Weeks × days of optional hex colors
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributionGrid {
    pub weeks: Vec<Vec<Option<String>>>,
}

impl ContributionGrid {
    pub fn new(weeks: Vec<Vec<Option<String>>>) -> Self {
        Self { weeks }
    }

    /// Parse `[[color|null, ...], ...]`
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of calendar columns
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Color at `[week][day]`, treating empty strings as absent
    pub fn cell(&self, week: usize, day: usize) -> Option<&str> {
        self.weeks
            .get(week)
            .and_then(|days| days.get(day))
            .and_then(|cell| cell.as_deref())
            .filter(|color| !color.is_empty())
    }

    /// Build tiles in column-major order with palette-resolved colors
    pub fn tiles(&self, palette: Palette, settings: &Settings) -> Vec<Tile> {
        let rows = settings.rows_per_column;
        for (week, days) in self.weeks.iter().enumerate() {
            if days.len() > rows {
                log::warn!(
                    "Week {} has {} days, ignoring all past {}",
                    week,
                    days.len(),
                    rows
                );
            }
        }

        let pitch = settings.tile_pitch();
        let mut tiles = Vec::new();
        for week in 0..self.week_count() {
            for day in 0..rows {
                let Some(color) = self.cell(week, day) else {
                    continue;
                };
                tiles.push(Tile {
                    x: week as f64 * pitch + settings.padding,
                    y: day as f64 * pitch + settings.padding,
                    color: palette.resolve(color),
                });
            }
        }
        tiles
    }
}

/// Canvas geometry derived from the calendar size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    /// Top edge of the paddle
    pub paddle_y: f64,
}

impl Arena {
    pub fn new(weeks: usize, settings: &Settings) -> Self {
        let pitch = settings.tile_pitch();
        let width = weeks as f64 * pitch + settings.padding * 2.0 - settings.tile_gap;
        let tiles_height = settings.rows_per_column as f64 * pitch - settings.tile_gap;
        let paddle_y = settings.padding + tiles_height + settings.paddle_gap;
        let height = paddle_y + settings.paddle_height + settings.padding;
        Self {
            width,
            height,
            paddle_y,
        }
    }

    pub fn for_grid(grid: &ContributionGrid, settings: &Settings) -> Self {
        Self::new(grid.week_count(), settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(color: &str) -> Option<String> {
        Some(color.to_string())
    }

    #[test]
    fn test_dark_palette_maps_every_known_color() {
        for (light, dark) in LIGHT_TO_DARK {
            assert_eq!(Palette::Dark.resolve(light), dark);
            assert_eq!(Palette::Dark.resolve(&light.to_uppercase()), dark);
        }
    }

    #[test]
    fn test_dark_palette_fallback() {
        assert_eq!(Palette::Dark.resolve("#123456"), DARK_FALLBACK);
        assert_eq!(Palette::Dark.resolve("green"), DARK_FALLBACK);
    }

    #[test]
    fn test_light_palette_passthrough() {
        assert_eq!(Palette::Light.resolve("#9BE9A8"), "#9BE9A8");
        assert_eq!(Palette::Light.resolve("#123456"), "#123456");
    }

    #[test]
    fn test_tiles_skip_absent_days() {
        let grid = ContributionGrid::new(vec![
            vec![cell("#ebedf0"), None, cell("#40c463")],
            vec![None, cell(""), cell("#216e39")],
        ]);
        let settings = Settings::default();
        let tiles = grid.tiles(Palette::Light, &settings);

        assert_eq!(tiles.len(), 3);
        assert_eq!((tiles[0].x, tiles[0].y), (15.0, 15.0));
        assert_eq!((tiles[1].x, tiles[1].y), (15.0, 45.0));
        assert_eq!((tiles[2].x, tiles[2].y), (30.0, 45.0));
        assert_eq!(tiles[2].color, "#216e39");
    }

    #[test]
    fn test_tiles_ignore_extra_days() {
        let grid = ContributionGrid::new(vec![vec![cell("#ebedf0"); 9]]);
        let tiles = grid.tiles(Palette::Dark, &Settings::default());
        assert_eq!(tiles.len(), 7);
        assert!(tiles.iter().all(|t| t.color == "#151B23"));
    }

    #[test]
    fn test_arena_geometry() {
        let arena = Arena::new(53, &Settings::default());
        assert_eq!(arena.width, 53.0 * 15.0 + 30.0 - 3.0);
        assert_eq!(arena.paddle_y, 15.0 + 102.0 + 100.0);
        assert_eq!(arena.height, 217.0 + 10.0 + 15.0);
    }

    #[test]
    fn test_grid_from_json() {
        let grid = ContributionGrid::from_json(r##"[["#ebedf0", null], [null, "#30a14e"]]"##)
            .unwrap();
        assert_eq!(grid.week_count(), 2);
        assert_eq!(grid.cell(1, 1), Some("#30a14e"));
        assert_eq!(grid.cell(0, 1), None);
        assert_eq!(grid.cell(5, 0), None);

        assert!(ContributionGrid::from_json(r#"{"weeks": 3}"#).is_err());
    }
}
