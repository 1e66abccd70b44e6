use kurbo::{BezPath, Cap, Ellipse, Join, Shape, Stroke, StrokeOpts};

use crate::spiral::segment::Symbol;

const TOLERANCE: f64 = 0.05;

/// Fillable outlines of the two digits at one em size, centered on the origin.
#[derive(Clone, Debug)]
pub struct GlyphOutlines {
    size_px: f64,
    zero: BezPath,
    one: BezPath,
}

impl GlyphOutlines {
    /// Build outlines for an em of `size_px` device pixels.
    pub fn new(size_px: f64) -> Self {
        let em = size_px.max(0.0);
        let style = Stroke::new(em * 0.11)
            .with_caps(Cap::Round)
            .with_join(Join::Round);
        let opts = StrokeOpts::default();

        let ring = Ellipse::new((0.0, 0.0), (em * 0.24, em * 0.34), 0.0);
        let zero = kurbo::stroke(ring.path_elements(TOLERANCE), &style, &opts, TOLERANCE);

        let mut stem = BezPath::new();
        stem.move_to((-em * 0.14, -em * 0.22));
        stem.line_to((em * 0.02, -em * 0.34));
        stem.line_to((em * 0.02, em * 0.34));
        stem.move_to((-em * 0.14, em * 0.34));
        stem.line_to((em * 0.18, em * 0.34));
        let one = kurbo::stroke(stem, &style, &opts, TOLERANCE);

        Self {
            size_px: em,
            zero,
            one,
        }
    }

    /// Em size the outlines were built for.
    pub fn size_px(&self) -> f64 {
        self.size_px
    }

    /// Outline for `symbol`.
    pub fn outline(&self, symbol: Symbol) -> &BezPath {
        match symbol {
            Symbol::Zero => &self.zero,
            Symbol::One => &self.one,
        }
    }
}
