//! Drawing surfaces the spiral paints into.

/// CPU raster surface (`vello_cpu`).
pub mod cpu;
/// Vector outlines of the two digits.
pub mod glyph;
/// Surface that records paint calls.
pub mod recording;
/// Surface trait and frame readback type.
pub mod surface;
