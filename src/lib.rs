//! lovespark renders the binary-digit spiral: a field of `0`/`1` glyphs laid out along a spiral,
//! wobbling, flickering and fading toward its edge.
//!
//! - [`SpiralRenderer`] owns the generated glyph field and paints one frame per call into any
//!   [`GlyphSurface`].
//! - [`SpiralInstance`] binds a renderer to a host surface and a [`FrameScheduler`], handling
//!   resize and visibility.
//! - [`RenderSession`] renders frames headlessly on the CPU and streams them into a [`FrameSink`].
#![forbid(unsafe_code)]

mod foundation;

/// Frame sinks (in-memory, PNG sequence, ffmpeg MP4).
pub mod encode;
/// Host scheduling and surface lifecycle.
pub mod host;
/// Drawing surfaces.
pub mod render;
/// Offline rendering.
pub mod session;
/// The spiral generator and renderer.
pub mod spiral;

pub use crate::foundation::core::{
    Affine, BezPath, Fps, FrameIndex, FrameRange, Point, Rgb8, SurfaceSize, Vec2,
};
pub use crate::foundation::error::{SparkError, SparkResult};
pub use crate::foundation::math::Rng64;

pub use crate::encode::ffmpeg::{FfmpegSink, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::host::instance::{SpiralInstance, SurfaceProvider, SurfaceRegistry};
pub use crate::host::scheduler::{FrameRequestId, FrameScheduler, ManualScheduler};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::recording::RecordingSurface;
pub use crate::render::surface::{FrameRGBA, GlyphPaint, GlyphSurface};
pub use crate::session::render_session::{RenderSession, RenderStats};
pub use crate::session::scene::SceneConfig;
pub use crate::spiral::config::{Palette, SpiralConfig};
pub use crate::spiral::layout::{SpiralGeometry, build_segments};
pub use crate::spiral::renderer::{DEFAULT_BACKGROUND, FrameStats, Placement, SpiralRenderer};
pub use crate::spiral::segment::{Segment, Symbol};
