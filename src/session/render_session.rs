use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, FrameRange, SurfaceSize};
use crate::foundation::error::SparkResult;
use crate::render::cpu::CpuSurface;
use crate::render::surface::FrameRGBA;
use crate::session::scene::SceneConfig;
use crate::spiral::renderer::{FrameStats, SpiralRenderer};

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Glyphs painted across all pushed frames.
    pub glyphs_painted: u64,
    /// Digit flips across all pushed frames.
    pub glyphs_flipped: u64,
}

/// Headless renderer for a scene.
///
/// Frame `n` is the image the live loop shows after `n` earlier frames; seeking backwards replays
/// from a fresh build so any frame renders identically regardless of access order.
pub struct RenderSession {
    renderer: SpiralRenderer,
    surface: CpuSurface,
    size: SurfaceSize,
    fps: Fps,
}

impl RenderSession {
    /// Validate the scene and allocate the CPU surface.
    pub fn new(scene: &SceneConfig) -> SparkResult<Self> {
        scene.validate()?;
        let (w, h) = scene.surface.backing();
        let renderer = SpiralRenderer::new(scene.spiral.clone(), scene.surface)?
            .with_background(scene.background);
        Ok(Self {
            renderer,
            surface: CpuSurface::new(w, h)?,
            size: scene.surface,
            fps: scene.fps,
        })
    }

    pub fn renderer(&self) -> &SpiralRenderer {
        &self.renderer
    }

    /// Backing size of produced frames.
    pub fn frame_size(&self) -> (u32, u32) {
        self.size.backing()
    }

    /// Render frame `frame` and read it back.
    pub fn render_frame(&mut self, frame: FrameIndex) -> FrameRGBA {
        self.render_frame_with_stats(frame).0
    }

    fn render_frame_with_stats(&mut self, frame: FrameIndex) -> (FrameRGBA, FrameStats) {
        if frame.0 < self.renderer.frames_rendered() {
            self.renderer.rebuild(self.size);
        }
        while self.renderer.frames_rendered() < frame.0 {
            self.renderer.render_frame(&mut self.surface);
        }
        let stats = self.renderer.render_frame(&mut self.surface);
        (self.surface.frame(), stats)
    }

    /// Render a frame range in order and stream frames into `sink`.
    #[tracing::instrument(skip(self, sink), fields(frames = range.len_frames()))]
    pub fn render_range(
        &mut self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> SparkResult<RenderStats> {
        let (width, height) = self.frame_size();
        sink.begin(SinkConfig {
            width,
            height,
            fps: self.fps,
            background: self.renderer.background(),
        })?;

        let mut stats = RenderStats::default();
        for f in range.start.0..range.end.0 {
            let idx = FrameIndex(f);
            let (frame, fs) = self.render_frame_with_stats(idx);
            sink.push_frame(idx, &frame)?;
            stats.frames_total += 1;
            stats.glyphs_painted += u64::from(fs.painted);
            stats.glyphs_flipped += u64::from(fs.flipped);
        }

        sink.end()?;
        tracing::info!(
            frames = stats.frames_total,
            painted = stats.glyphs_painted,
            "range rendered"
        );
        Ok(stats)
    }
}
