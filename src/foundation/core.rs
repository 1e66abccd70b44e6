use crate::foundation::error::{SparkError, SparkResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Absolute 0-based frame index of an animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> SparkResult<Self> {
        if start.0 > end.0 {
            return Err(SparkError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SparkResult<Self> {
        if den == 0 {
            return Err(SparkError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SparkError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Straight-alpha RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach a `0.0..=1.0` alpha, producing straight RGBA8.
    pub fn with_alpha(self, alpha: f64) -> [u8; 4] {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }
}

/// Usable drawing-surface size as reported by the host.
///
/// `width`/`height` are logical (CSS) pixels; the backing store is scaled by
/// `device_pixel_ratio`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
    /// Device pixel density.
    #[serde(default = "default_dpr")]
    pub device_pixel_ratio: f64,
}

fn default_dpr() -> f64 {
    1.0
}

impl SurfaceSize {
    /// Size at pixel density 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Return a copy with the given pixel density.
    pub fn with_dpr(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = dpr;
        self
    }

    /// Backing-store dimensions in device pixels.
    ///
    /// A non-finite or non-positive density collapses the surface to zero.
    pub fn backing(self) -> (u32, u32) {
        let dpr = self.device_pixel_ratio;
        if !dpr.is_finite() || dpr <= 0.0 {
            return (0, 0);
        }
        let scale = |v: u32| (f64::from(v) * dpr).round().clamp(0.0, f64::from(u32::MAX)) as u32;
        (scale(self.width), scale(self.height))
    }

    /// Side of the square the spiral is laid out in, in device pixels.
    pub fn side(self) -> u32 {
        let (w, h) = self.backing();
        w.min(h)
    }

    /// Validate the host-supplied density.
    pub fn validate(self) -> SparkResult<()> {
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(SparkError::validation(
                "device_pixel_ratio must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
