use crate::foundation::math::Rng64;
use crate::spiral::config::SpiralConfig;

/// The digit a segment displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `'0'`
    Zero,
    /// `'1'`
    One,
}

impl Symbol {
    /// Map a bit to its symbol.
    pub fn from_bit(bit: bool) -> Self {
        if bit { Self::One } else { Self::Zero }
    }

    /// The other digit.
    pub fn flipped(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }

    /// Rendered character.
    pub fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
        }
    }
}

/// One glyph on the spiral.
///
/// `theta` and `base_radius` are structural and never change after the set is built; the symbol,
/// opacity and glitch counters are updated in place every painted frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Position of the glyph along the spiral.
    pub index: u32,
    /// Angle in radians.
    pub theta: f64,
    /// Radius before wobble, in device pixels.
    pub base_radius: f64,
    pub symbol: Symbol,
    /// Base opacity in `[0, 1]`, before the distance fade.
    pub opacity: f64,
    /// Frames counted since the last flip.
    pub glitch_timer: u32,
    /// Frame count at which the next flip happens.
    pub glitch_interval: u32,
}

impl Segment {
    /// Advance the glitch counter by one frame.
    ///
    /// Returns `true` when the segment flipped: the symbol toggles, the timer resets to 0 and a
    /// fresh interval and opacity are drawn from `rng`.
    pub fn tick_glitch(&mut self, rng: &mut Rng64, cfg: &SpiralConfig) -> bool {
        self.glitch_timer = self.glitch_timer.saturating_add(1);
        if self.glitch_timer < self.glitch_interval {
            return false;
        }
        self.symbol = self.symbol.flipped();
        self.glitch_timer = 0;
        self.glitch_interval = draw_interval(rng.next_f64_01(), cfg);
        self.opacity = draw_opacity(rng.next_f64_01(), cfg.glitch_opacity_min);
        true
    }
}

/// Map a unit sample onto `[min, min + span)` frames.
pub(crate) fn draw_interval(u: f64, cfg: &SpiralConfig) -> u32 {
    let extra = (u * f64::from(cfg.glitch_interval_span)).floor() as u32;
    cfg.glitch_interval_min
        .saturating_add(extra.min(cfg.glitch_interval_span.saturating_sub(1)))
}

/// Map a unit sample onto `[min, 1]`.
pub(crate) fn draw_opacity(u: f64, min: f64) -> f64 {
    (min + u * (1.0 - min)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/spiral/segment.rs"]
mod tests;
