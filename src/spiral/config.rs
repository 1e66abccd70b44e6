use crate::foundation::core::Rgb8;
use crate::foundation::error::{SparkError, SparkResult};

/// Two-color palette glyphs alternate between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Palette {
    /// Pink.
    pub primary: Rgb8,
    /// Purple.
    pub secondary: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgb8::new(255, 110, 180),
            secondary: Rgb8::new(192, 132, 252),
        }
    }
}

/// Tuning constants for one spiral.
///
/// Lengths ending in `_frac` are fractions of the surface side; `_px` values are logical pixels
/// and get scaled by the device pixel ratio.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpiralConfig {
    /// Number of glyphs on a non-empty surface.
    pub glyph_budget: u32,
    /// Outer radius as a fraction of the side.
    pub max_radius_frac: f64,
    /// Radial distance between successive turns as a fraction of the side.
    pub spacing_frac: f64,

    /// Wobble amplitude in units of `spacing`.
    pub wobble_amplitude: f64,
    /// Wobble cycles per radian of `theta`.
    pub wobble_frequency: f64,
    /// Time advanced per rendered frame.
    pub time_step: f64,

    /// Alpha at (and beyond) the outer edge.
    pub alpha_floor: f64,
    /// Alpha of a fully opaque glyph at the center.
    pub alpha_peak: f64,

    /// Lower bound of the opacity assigned at build time.
    pub initial_opacity_min: f64,
    /// Lower bound of the opacity assigned on each glitch.
    pub glitch_opacity_min: f64,
    /// Shortest glitch interval in frames.
    pub glitch_interval_min: u32,
    /// Random span added on top of `glitch_interval_min`.
    pub glitch_interval_span: u32,
    /// Upper bound (exclusive) of the initial glitch timer.
    pub glitch_timer_span: u32,

    /// Glyph size in logical pixels.
    pub glyph_px: f64,
    /// Radial band width, in logical pixels, of the color alternation.
    pub color_band_px: f64,
    /// Glyph colors.
    pub palette: Palette,

    /// Seed for the digit hash and the glitch generator.
    pub seed: u64,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            glyph_budget: 900,
            max_radius_frac: 0.46,
            spacing_frac: 0.012,
            wobble_amplitude: 0.35,
            wobble_frequency: 3.0,
            time_step: 0.02,
            alpha_floor: 0.12,
            alpha_peak: 0.9,
            initial_opacity_min: 0.3,
            glitch_opacity_min: 0.2,
            glitch_interval_min: 40,
            glitch_interval_span: 120,
            glitch_timer_span: 120,
            glyph_px: 11.0,
            color_band_px: 30.0,
            palette: Palette::default(),
            seed: 0x10E5_BA4C,
        }
    }
}

impl SpiralConfig {
    /// Check every constant against the ranges the renderer relies on.
    pub fn validate(&self) -> SparkResult<()> {
        fn positive(name: &str, v: f64) -> SparkResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(SparkError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
            Ok(())
        }
        fn unit(name: &str, v: f64) -> SparkResult<()> {
            if !(0.0..=1.0).contains(&v) {
                return Err(SparkError::validation(format!(
                    "{name} must be within [0, 1] (got {v})"
                )));
            }
            Ok(())
        }

        if self.glyph_budget == 0 {
            return Err(SparkError::validation("glyph_budget must be >= 1"));
        }
        positive("max_radius_frac", self.max_radius_frac)?;
        positive("spacing_frac", self.spacing_frac)?;
        if self.spacing_frac > self.max_radius_frac {
            return Err(SparkError::validation(
                "spacing_frac must be <= max_radius_frac",
            ));
        }
        if !self.wobble_amplitude.is_finite() || self.wobble_amplitude < 0.0 {
            return Err(SparkError::validation(
                "wobble_amplitude must be finite and >= 0",
            ));
        }
        if !self.wobble_frequency.is_finite() {
            return Err(SparkError::validation("wobble_frequency must be finite"));
        }
        if !self.time_step.is_finite() {
            return Err(SparkError::validation("time_step must be finite"));
        }
        unit("alpha_floor", self.alpha_floor)?;
        unit("alpha_peak", self.alpha_peak)?;
        if self.alpha_floor > self.alpha_peak {
            return Err(SparkError::validation("alpha_floor must be <= alpha_peak"));
        }
        unit("initial_opacity_min", self.initial_opacity_min)?;
        unit("glitch_opacity_min", self.glitch_opacity_min)?;
        if self.glitch_interval_min == 0 {
            return Err(SparkError::validation("glitch_interval_min must be >= 1"));
        }
        positive("glyph_px", self.glyph_px)?;
        positive("color_band_px", self.color_band_px)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spiral/config.rs"]
mod tests;
