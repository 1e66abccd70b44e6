use crate::foundation::core::{Affine, BezPath};
use crate::foundation::error::{SparkError, SparkResult};
use crate::render::glyph::GlyphOutlines;
use crate::render::surface::{FrameRGBA, GlyphPaint, GlyphSurface};

/// CPU raster surface powered by `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    target: Option<CpuTarget>,
    glyphs: Option<GlyphOutlines>,
}

struct CpuTarget {
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuSurface {
    /// Allocate a surface. Either dimension may be zero; such a surface draws nothing.
    pub fn new(width: u32, height: u32) -> SparkResult<Self> {
        let mut surface = Self {
            width: 0,
            height: 0,
            target: None,
            glyphs: None,
        };
        surface.resize(width, height)?;
        Ok(surface)
    }

    /// Copy out the last presented frame (premultiplied RGBA8).
    pub fn frame(&self) -> FrameRGBA {
        let data = self
            .target
            .as_ref()
            .map(|t| t.pixmap.data_as_u8_slice().to_vec())
            .unwrap_or_default();
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        }
    }

    fn outlines_for(&mut self, size_px: f64) -> &GlyphOutlines {
        let stale = self
            .glyphs
            .as_ref()
            .is_none_or(|g| g.size_px().to_bits() != size_px.to_bits());
        if stale {
            self.glyphs = Some(GlyphOutlines::new(size_px));
        }
        self.glyphs.get_or_insert_with(|| GlyphOutlines::new(size_px))
    }
}

impl GlyphSurface for CpuSurface {
    fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn resize(&mut self, width: u32, height: u32) -> SparkResult<()> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| SparkError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| SparkError::render("surface height exceeds u16"))?;

        self.width = width_u16;
        self.height = height_u16;
        self.target = (width_u16 > 0 && height_u16 > 0).then(|| CpuTarget {
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            ctx: None,
        });
        Ok(())
    }

    fn clear(&mut self, rgba: [u8; 4]) {
        let (w, h) = (self.width, self.height);
        let Some(target) = self.target.as_mut() else {
            return;
        };
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
        target.ctx = Some(ctx);
    }

    fn paint_glyph(&mut self, paint: &GlyphPaint) {
        if self.target.as_ref().is_none_or(|t| t.ctx.is_none()) {
            return;
        }
        let path = bezpath_to_cpu(self.outlines_for(paint.size_px).outline(paint.symbol));
        let Some(ctx) = self.target.as_mut().and_then(|t| t.ctx.as_mut()) else {
            return;
        };
        let [r, g, b, a] = paint.rgba;
        ctx.set_transform(affine_to_cpu(Affine::translate(paint.center.to_vec2())));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_path(&path);
    }

    fn present(&mut self) {
        let Some(target) = self.target.as_mut() else {
            return;
        };
        let Some(mut ctx) = target.ctx.take() else {
            return;
        };
        ctx.flush();
        ctx.render_to_pixmap(&mut target.pixmap);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
