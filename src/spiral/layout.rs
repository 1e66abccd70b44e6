use std::f64::consts::TAU;

use crate::foundation::core::SurfaceSize;
use crate::foundation::math::hash01;
use crate::spiral::config::SpiralConfig;
use crate::spiral::segment::{Segment, Symbol, draw_interval, draw_opacity};

// Independent hash lanes per segment.
const LANE_BIT: u64 = 0;
const LANE_OPACITY: u64 = 1;
const LANE_TIMER: u64 = 2;
const LANE_INTERVAL: u64 = 3;

/// Size-derived constants of one spiral layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralGeometry {
    /// Backing-store width in device pixels.
    pub width: u32,
    /// Backing-store height in device pixels.
    pub height: u32,
    /// Side of the layout square.
    pub side: f64,
    /// Glyphs whose final radius exceeds this are not painted.
    pub max_radius: f64,
    /// Radial distance between successive turns.
    pub spacing: f64,
    /// Angle of the last glyph.
    pub total_theta: f64,
    /// Number of segments.
    pub count: u32,
    /// Device pixel ratio the layout was computed for.
    pub dpr: f64,
}

impl SpiralGeometry {
    /// Derive the layout constants for a surface.
    pub fn new(size: SurfaceSize, cfg: &SpiralConfig) -> Self {
        let (width, height) = size.backing();
        let side = f64::from(width.min(height));
        let max_radius = cfg.max_radius_frac * side;
        let spacing = cfg.spacing_frac * side;
        let total_theta = if spacing > 0.0 {
            (max_radius / spacing) * TAU
        } else {
            0.0
        };
        let count = if side > 0.0 { cfg.glyph_budget } else { 0 };
        Self {
            width,
            height,
            side,
            max_radius,
            spacing,
            total_theta,
            count,
            dpr: if width == 0 { 0.0 } else { size.device_pixel_ratio },
        }
    }

    /// Angle of glyph `i`.
    pub fn theta(&self, i: u32) -> f64 {
        if self.count <= 1 {
            return 0.0;
        }
        (f64::from(i) / f64::from(self.count - 1)) * self.total_theta
    }

    /// Radius of the spiral at `theta`, before wobble.
    pub fn base_radius(&self, theta: f64) -> f64 {
        (theta / TAU) * self.spacing
    }

    /// Surface midpoint in device pixels.
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Angular step between consecutive glyphs.
    pub fn tightness(&self) -> f64 {
        if self.count <= 1 {
            return 0.0;
        }
        self.total_theta / f64::from(self.count - 1)
    }
}

/// Build the full segment set for a surface.
///
/// Digits, base opacity and initial glitch phase are hashed from `(seed, index)`, so rebuilding at
/// any size reproduces the same digit per index.
pub fn build_segments(geom: &SpiralGeometry, cfg: &SpiralConfig) -> Vec<Segment> {
    let seed = cfg.seed;
    (0..geom.count)
        .map(|i| {
            let idx = u64::from(i);
            let theta = geom.theta(i);
            let timer_span = f64::from(cfg.glitch_timer_span);
            Segment {
                index: i,
                theta,
                base_radius: geom.base_radius(theta),
                symbol: Symbol::from_bit(hash01(seed, idx, LANE_BIT) >= 0.5),
                opacity: draw_opacity(hash01(seed, idx, LANE_OPACITY), cfg.initial_opacity_min),
                glitch_timer: (hash01(seed, idx, LANE_TIMER) * timer_span).floor() as u32,
                glitch_interval: draw_interval(hash01(seed, idx, LANE_INTERVAL), cfg),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/spiral/layout.rs"]
mod tests;
