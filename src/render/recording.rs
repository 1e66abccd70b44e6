use crate::foundation::error::SparkResult;
use crate::render::surface::{GlyphPaint, GlyphSurface};

/// Surface that keeps the paint calls of the last frame instead of pixels.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    clear_rgba: Option<[u8; 4]>,
    pending: Vec<GlyphPaint>,
    presented: Vec<GlyphPaint>,
    frames_presented: u64,
}

impl RecordingSurface {
    /// Surface of the given backing size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Glyphs of the last presented frame, in paint order.
    pub fn glyphs(&self) -> &[GlyphPaint] {
        &self.presented
    }

    /// Color of the last clear, if any.
    pub fn clear_color(&self) -> Option<[u8; 4]> {
        self.clear_rgba
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl GlyphSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> SparkResult<()> {
        self.width = width;
        self.height = height;
        self.pending.clear();
        self.presented.clear();
        Ok(())
    }

    fn clear(&mut self, rgba: [u8; 4]) {
        self.clear_rgba = Some(rgba);
        self.pending.clear();
    }

    fn paint_glyph(&mut self, paint: &GlyphPaint) {
        self.pending.push(*paint);
    }

    fn present(&mut self) {
        self.presented = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}
