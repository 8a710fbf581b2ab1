//! Contribution Breakout entry point
//!
//! Reads a contribution grid (JSON, weeks of day colors) from stdin and
//! writes the animated SVG to stdout. Pass `--dark` for the dark palette.

use std::io::Read;
use std::process::ExitCode;

use contrib_breakout::{ContributionGrid, Error, Palette, Settings, generate_svg};

fn run(palette: Palette) -> Result<String, Error> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let grid = ContributionGrid::from_json(&input)?;
    Ok(generate_svg(&grid, palette, &Settings::default())?)
}

fn main() -> ExitCode {
    env_logger::init();

    let palette = if std::env::args().skip(1).any(|arg| arg == "--dark") {
        Palette::Dark
    } else {
        Palette::Light
    };
    log::info!("Contribution Breakout starting ({} palette)", palette.as_str());

    match run(palette) {
        Ok(svg) => {
            println!("{svg}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to generate SVG: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
