use std::collections::HashMap;

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::SparkResult;
use crate::host::scheduler::{FrameRequestId, FrameScheduler};
use crate::render::surface::GlyphSurface;
use crate::spiral::config::SpiralConfig;
use crate::spiral::renderer::{FrameStats, SpiralRenderer};

/// Lookup of host drawing surfaces by their external id.
pub trait SurfaceProvider {
    type Surface: GlyphSurface;

    /// Hand over the surface registered as `id`, if there is one.
    fn surface_by_id(&mut self, id: &str) -> Option<Self::Surface>;

    /// Take back a surface handed out by `surface_by_id` that could not be used.
    fn restore_surface(&mut self, id: &str, surface: Self::Surface);
}

/// In-process [`SurfaceProvider`] keyed by id.
#[derive(Debug)]
pub struct SurfaceRegistry<S> {
    surfaces: HashMap<String, S>,
}

impl<S> Default for SurfaceRegistry<S> {
    fn default() -> Self {
        Self {
            surfaces: HashMap::new(),
        }
    }
}

impl<S> SurfaceRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `surface` under `id`, replacing any previous one.
    pub fn insert(&mut self, id: impl Into<String>, surface: S) {
        self.surfaces.insert(id.into(), surface);
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl<S: GlyphSurface> SurfaceProvider for SurfaceRegistry<S> {
    type Surface = S;

    fn surface_by_id(&mut self, id: &str) -> Option<S> {
        self.surfaces.remove(id)
    }

    fn restore_surface(&mut self, id: &str, surface: S) {
        self.surfaces.insert(id.to_owned(), surface);
    }
}

/// A spiral bound to one host surface and one scheduler.
///
/// At most one frame request is outstanding at any time. Hiding the page cancels it; showing the
/// page requests a fresh one. Callbacks for ids other than the pending one are ignored.
pub struct SpiralInstance<S: GlyphSurface, H: FrameScheduler> {
    id: String,
    renderer: SpiralRenderer,
    surface: S,
    scheduler: H,
    pending: Option<FrameRequestId>,
    visible: bool,
}

impl<S: GlyphSurface, H: FrameScheduler> SpiralInstance<S, H> {
    /// Look up surface `id`, size it, build the spiral and request the first frame.
    ///
    /// A missing surface is not an error: nothing starts and `Ok(None)` is returned. The size and
    /// config are validated before the surface is taken; a surface that fails to resize is given
    /// back to `provider`.
    pub fn attach<P>(
        provider: &mut P,
        id: &str,
        size: SurfaceSize,
        cfg: SpiralConfig,
        scheduler: H,
    ) -> SparkResult<Option<Self>>
    where
        P: SurfaceProvider<Surface = S>,
    {
        size.validate()?;
        let renderer = SpiralRenderer::new(cfg, size)?;
        let Some(mut surface) = provider.surface_by_id(id) else {
            tracing::debug!(id, "no drawing surface with this id; spiral not started");
            return Ok(None);
        };
        let (w, h) = size.backing();
        if let Err(err) = surface.resize(w, h) {
            provider.restore_surface(id, surface);
            return Err(err);
        }

        let mut instance = Self {
            id: id.to_owned(),
            renderer,
            surface,
            scheduler,
            pending: None,
            visible: true,
        };
        instance.schedule();
        tracing::debug!(id, width = w, height = h, "spiral attached");
        Ok(Some(instance))
    }

    /// Replace the renderer's clear color.
    pub fn with_background(mut self, rgba: [u8; 4]) -> Self {
        self.renderer = self.renderer.with_background(rgba);
        self
    }

    /// Host callback for a fired frame request.
    ///
    /// Renders one frame and requests the next one. Returns `None` for stale or cancelled ids.
    pub fn on_frame(&mut self, id: FrameRequestId) -> Option<FrameStats> {
        if self.pending != Some(id) {
            tracing::trace!(instance = %self.id, ?id, "ignoring stale frame callback");
            return None;
        }
        self.pending = None;
        if !self.visible {
            return None;
        }
        let stats = self.renderer.render_frame(&mut self.surface);
        self.schedule();
        Some(stats)
    }

    /// Host visibility signal.
    pub fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.schedule();
        } else if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        tracing::debug!(instance = %self.id, visible, "visibility changed");
    }

    /// Host resize signal: reallocate the surface and rebuild every segment.
    pub fn resize(&mut self, size: SurfaceSize) -> SparkResult<()> {
        size.validate()?;
        let (w, h) = size.backing();
        self.surface.resize(w, h)?;
        self.renderer.rebuild(size);
        Ok(())
    }

    /// Cancel any pending request and hand back the surface and scheduler.
    pub fn detach(mut self) -> (S, H) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        (self.surface, self.scheduler)
    }

    fn schedule(&mut self) {
        if self.pending.is_none() && self.visible {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The request currently outstanding, if any.
    pub fn pending(&self) -> Option<FrameRequestId> {
        self.pending
    }

    pub fn renderer(&self) -> &SpiralRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut SpiralRenderer {
        &mut self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &H {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut H {
        &mut self.scheduler
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/instance.rs"]
mod tests;
