use crate::foundation::core::{Point, Rgb8, SurfaceSize};
use crate::foundation::error::SparkResult;
use crate::foundation::math::Rng64;
use crate::render::surface::{GlyphPaint, GlyphSurface};
use crate::spiral::config::SpiralConfig;
use crate::spiral::layout::{SpiralGeometry, build_segments};
use crate::spiral::segment::Segment;

const GLITCH_STREAM: u64 = 0x6A09_E667_F3BC_C908;

/// Background the surface is cleared to before each frame (straight RGBA8).
pub const DEFAULT_BACKGROUND: [u8; 4] = [18, 12, 24, 255];

/// Where and how one segment is painted in the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Final radius including wobble.
    pub radius: f64,
    /// Glyph center in device pixels.
    pub center: Point,
    /// Alpha after the distance fade, within `[alpha_floor, alpha_peak]`.
    pub alpha: f64,
    /// Palette entry chosen by the radius/angle band parity.
    pub color: Rgb8,
}

/// Per-frame counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Segments painted.
    pub painted: u32,
    /// Segments beyond the maximum radius this frame.
    pub skipped: u32,
    /// Segments whose digit flipped this frame.
    pub flipped: u32,
}

/// Generates the spiral glyph field and repaints it once per frame.
///
/// All animation state (segments, time, glitch generator) lives on the instance; independent
/// renderers never influence each other.
#[derive(Clone, Debug)]
pub struct SpiralRenderer {
    cfg: SpiralConfig,
    geom: SpiralGeometry,
    segments: Vec<Segment>,
    time: f64,
    rng: Rng64,
    background: [u8; 4],
    frames_rendered: u64,
}

impl SpiralRenderer {
    /// Validate `cfg` and build the segment set for `size`.
    pub fn new(cfg: SpiralConfig, size: SurfaceSize) -> SparkResult<Self> {
        cfg.validate()?;
        let geom = SpiralGeometry::new(size, &cfg);
        let mut renderer = Self {
            rng: Rng64::new(cfg.seed ^ GLITCH_STREAM),
            segments: Vec::new(),
            geom,
            cfg,
            time: 0.0,
            background: DEFAULT_BACKGROUND,
            frames_rendered: 0,
        };
        renderer.rebuild(size);
        Ok(renderer)
    }

    /// Replace the clear color.
    pub fn with_background(mut self, rgba: [u8; 4]) -> Self {
        self.background = rgba;
        self
    }

    /// Throw away every segment and regenerate for `size`.
    ///
    /// Time, glitch phase and the glitch generator restart from scratch.
    pub fn rebuild(&mut self, size: SurfaceSize) {
        self.geom = SpiralGeometry::new(size, &self.cfg);
        self.segments = build_segments(&self.geom, &self.cfg);
        self.time = 0.0;
        self.rng = Rng64::new(self.cfg.seed ^ GLITCH_STREAM);
        self.frames_rendered = 0;
        tracing::debug!(
            count = self.geom.count,
            width = self.geom.width,
            height = self.geom.height,
            max_radius = self.geom.max_radius,
            "spiral segments rebuilt"
        );
    }

    pub fn config(&self) -> &SpiralConfig {
        &self.cfg
    }

    pub fn geometry(&self) -> &SpiralGeometry {
        &self.geom
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Mutable access for hosts that want to seed glitch state.
    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }

    /// Current animation time.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn background(&self) -> [u8; 4] {
        self.background
    }

    /// Placement of segment `index` at the current time, or `None` if it is out of range or beyond
    /// the maximum radius.
    pub fn place(&self, index: usize) -> Option<Placement> {
        let seg = self.segments.get(index)?;
        placement(&self.cfg, &self.geom, self.time, seg)
    }

    /// Alpha for a base `opacity` at final radius `radius`.
    pub fn alpha_at(&self, opacity: f64, radius: f64) -> f64 {
        faded_alpha(&self.cfg, &self.geom, opacity, radius)
    }

    /// Paint one frame and advance time by `time_step`.
    pub fn render_frame<S: GlyphSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        let Self {
            cfg,
            geom,
            segments,
            time,
            rng,
            background,
            frames_rendered,
        } = self;

        let glyph_px = cfg.glyph_px * geom.dpr;
        let mut stats = FrameStats::default();

        surface.clear(*background);
        for seg in segments.iter_mut() {
            if wobbled_radius(cfg, geom, *time, seg) > geom.max_radius {
                stats.skipped += 1;
                continue;
            }
            if seg.tick_glitch(rng, cfg) {
                stats.flipped += 1;
            }
            let Some(p) = placement(cfg, geom, *time, seg) else {
                continue;
            };
            surface.paint_glyph(&GlyphPaint {
                symbol: seg.symbol,
                center: p.center,
                size_px: glyph_px,
                rgba: p.color.with_alpha(p.alpha),
            });
            stats.painted += 1;
        }
        surface.present();

        *time += cfg.time_step;
        *frames_rendered += 1;
        tracing::trace!(
            painted = stats.painted,
            skipped = stats.skipped,
            flipped = stats.flipped,
            time = *time,
            "spiral frame"
        );
        stats
    }
}

fn wobbled_radius(cfg: &SpiralConfig, geom: &SpiralGeometry, time: f64, seg: &Segment) -> f64 {
    let wobble =
        cfg.wobble_amplitude * geom.spacing * (seg.theta * cfg.wobble_frequency + time).sin();
    (seg.base_radius + wobble).max(0.0)
}

fn faded_alpha(cfg: &SpiralConfig, geom: &SpiralGeometry, opacity: f64, radius: f64) -> f64 {
    let fade = if geom.max_radius > 0.0 {
        (1.0 - radius / geom.max_radius).clamp(0.0, 1.0)
    } else {
        0.0
    };
    cfg.alpha_floor + (cfg.alpha_peak - cfg.alpha_floor) * opacity.clamp(0.0, 1.0) * fade
}

fn placement(
    cfg: &SpiralConfig,
    geom: &SpiralGeometry,
    time: f64,
    seg: &Segment,
) -> Option<Placement> {
    let radius = wobbled_radius(cfg, geom, time, seg);
    if radius > geom.max_radius {
        return None;
    }
    let (cx, cy) = geom.center();
    let center = Point::new(cx + seg.theta.cos() * radius, cy + seg.theta.sin() * radius);

    let band = cfg.color_band_px * geom.dpr;
    let color = if (seg.base_radius / band + seg.theta).rem_euclid(2.0) > 1.0 {
        cfg.palette.secondary
    } else {
        cfg.palette.primary
    };

    Some(Placement {
        radius,
        center,
        alpha: faded_alpha(cfg, geom, seg.opacity, radius),
        color,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/spiral/renderer.rs"]
mod tests;
