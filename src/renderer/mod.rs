//! Document rendering
//!
//! Turns static geometry plus encoded animations into a self-contained
//! animated SVG.

pub mod svg;

pub use svg::{minify, render_document};
