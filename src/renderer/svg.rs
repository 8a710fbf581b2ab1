//! SVG document assembly
//!
//! Pure string building: no value is computed here that the simulation or
//! encoder did not already decide.

use std::sync::LazyLock;

use regex::Regex;

use crate::anim::{AnimationSet, Keyframe, KeyframeEncoding};
use crate::grid::Arena;
use crate::settings::Settings;
use crate::sim::Tile;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Join keyframe values with a fixed number of decimals
fn format_values(frames: &[Keyframe], precision: usize) -> String {
    frames
        .iter()
        .map(|k| format!("{:.*}", precision, k.value))
        .collect::<Vec<_>>()
        .join(";")
}

/// Join keyframe times with a fixed number of decimals
fn format_times(frames: &[Keyframe], precision: usize) -> String {
    frames
        .iter()
        .map(|k| format!("{:.*}", precision, k.time))
        .collect::<Vec<_>>()
        .join(";")
}

/// Looping `<animate>` element for a position track
fn animate_position(attribute: &str, frames: &[Keyframe], duration: f64, settings: &Settings) -> String {
    format!(
        r#"<animate attributeName="{attribute}" values="{}" keyTimes="{}" dur="{duration}s" repeatCount="indefinite"/>"#,
        format_values(frames, settings.value_precision),
        format_times(frames, settings.time_precision),
    )
}

/// A position attribute: either fixed on the element or animated inside it
struct Positioned {
    attribute: String,
    animation: String,
}

fn position(
    name: &str,
    encoding: &KeyframeEncoding,
    duration: f64,
    settings: &Settings,
) -> Positioned {
    match encoding {
        KeyframeEncoding::Static(value) => Positioned {
            attribute: format!(r#" {name}="{:.*}""#, settings.value_precision, value),
            animation: String::new(),
        },
        KeyframeEncoding::Timeline(frames) => Positioned {
            attribute: String::new(),
            animation: animate_position(name, frames, duration, settings),
        },
    }
}

fn render_tile(tile: &Tile, opacity: &KeyframeEncoding, duration: f64, settings: &Settings) -> String {
    let size = settings.tile_size;
    match opacity {
        KeyframeEncoding::Static(value) => format!(
            r#"<rect x="{}" y="{}" width="{size}" height="{size}" rx="{}" fill="{}" opacity="{value}"/>"#,
            tile.x, tile.y, settings.tile_radius, tile.color,
        ),
        KeyframeEncoding::Timeline(frames) => {
            let values = frames
                .iter()
                .map(|k| k.value.to_string())
                .collect::<Vec<_>>()
                .join(";");
            format!(
                r#"<rect x="{}" y="{}" width="{size}" height="{size}" rx="{}" fill="{}">
        <animate attributeName="opacity"
          values="{values}"
          keyTimes="{}"
          dur="{duration}s"
          fill="freeze"
          repeatCount="indefinite"/>
      </rect>"#,
                tile.x,
                tile.y,
                settings.tile_radius,
                tile.color,
                format_times(frames, settings.time_precision),
            )
        }
    }
}

/// Build the full SVG document
///
/// `animations.tiles` must be indexed like `tiles`.
pub fn render_document(
    arena: &Arena,
    tiles: &[Tile],
    animations: &AnimationSet,
    settings: &Settings,
) -> String {
    let duration = animations.duration;

    let bricks: String = tiles
        .iter()
        .zip(&animations.tiles)
        .map(|(tile, opacity)| render_tile(tile, opacity, duration, settings))
        .collect();

    let paddle_x = position("x", &animations.paddle_x, duration, settings);
    let ball_x = position("cx", &animations.ball_x, duration, settings);
    let ball_y = position("cy", &animations.ball_y, duration, settings);

    let svg = format!(
        r#"
<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="{SVG_NS}">
  {bricks}
  <rect{px} y="{py}" width="{pw}" height="{ph}" rx="{pr}" fill="{pc}">
    {pa}
  </rect>
  <circle{bx}{by} r="{r}" fill="{bc}">
    {bxa}
    {bya}
  </circle>
</svg>
    "#,
        w = arena.width,
        h = arena.height,
        px = paddle_x.attribute,
        py = arena.paddle_y,
        pw = settings.paddle_width,
        ph = settings.paddle_height,
        pr = settings.paddle_radius,
        pc = settings.paddle_color,
        pa = paddle_x.animation,
        bx = ball_x.attribute,
        by = ball_y.attribute,
        r = settings.ball_radius,
        bc = settings.ball_color,
        bxa = ball_x.animation,
        bya = ball_y.animation,
    );

    svg.trim().to_string()
}

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("static pattern"));
static BETWEEN_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("static pattern"));

/// Collapse whitespace runs, drop whitespace between tags and remove newlines
pub fn minify(svg: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(svg, " ");
    let joined = BETWEEN_TAGS.replace_all(&collapsed, "><");
    joined.replace('\n', "")
}
