//! Procedural binary-digit spiral.
//!
//! Glyphs are laid out on a single Archimedean spiral indexed by glyph number. Each frame the
//! radius of every glyph is perturbed by a traveling sine wobble, glyphs pushed past the maximum
//! radius are skipped, and the rest are faded toward the edge and painted in one of two colors.

pub mod config;
pub mod layout;
pub mod renderer;
pub mod segment;
