use crate::foundation::core::Point;
use crate::foundation::error::SparkResult;
use crate::spiral::segment::Symbol;

/// One glyph paint call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPaint {
    /// Digit to draw.
    pub symbol: Symbol,
    /// Glyph center in device pixels.
    pub center: Point,
    /// Em size in device pixels.
    pub size_px: f64,
    /// Straight-alpha fill color.
    pub rgba: [u8; 4],
}

/// A drawing surface the spiral paints into, one full repaint per frame.
///
/// A frame is `clear`, any number of `paint_glyph` calls, then `present`. Zero-sized surfaces
/// accept every call and draw nothing.
pub trait GlyphSurface {
    /// Backing-store size in device pixels.
    fn size(&self) -> (u32, u32);

    /// Reallocate the backing store. Previous contents are discarded.
    fn resize(&mut self, width: u32, height: u32) -> SparkResult<()>;

    /// Start a frame by filling the whole surface with `rgba` (straight alpha).
    fn clear(&mut self, rgba: [u8; 4]);

    /// Paint one glyph centered on `paint.center`.
    fn paint_glyph(&mut self, paint: &GlyphPaint);

    /// Finish the frame. Painting is only guaranteed visible after this returns.
    fn present(&mut self) {}
}

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of pixel `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
