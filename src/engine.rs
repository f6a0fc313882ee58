//! Per-canvas engine core: the event and frame entry points the host drives.
//!
//! `EngineCore` composes one [`ParticleField`] with the pointer tracker, the
//! release controller and the resize adapter. It holds no platform handles,
//! so every behaviour the browser host relies on can be exercised natively.
//!
//! Non-interactive layers accept the same calls; pointer, blur and visibility
//! events are simply ignored for them.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use rand::RngCore;

use crate::config::FieldConfig;
use crate::consts::{CLUSTER_RADIUS_PX, DAMPING};
use crate::pointer::{Point, PointerTracker};
use crate::release::{ReleaseController, ReleaseMode};
use crate::render::{self, FrameStats, Surface};
use crate::resize::{BufferSize, ResizeAdapter, Viewport};
use crate::simulation::{ParticleField, StepInput};
use crate::theme::{ThemeSource, resolve_color};

/// What happened during one [`EngineCore::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Influence factor used for this frame.
    pub influence: f64,
    /// Whether an idle release started on this frame.
    pub released: bool,
}

/// Core engine state for one canvas layer.
pub struct EngineCore {
    field: ParticleField,
    pointer: PointerTracker,
    release: ReleaseController,
    resize: ResizeAdapter,
    buffer: BufferSize,
}

impl EngineCore {
    /// Size the layer for `viewport` and spawn its particles.
    ///
    /// `now_ms` starts the pointer idle clock. Theme-driven layers take their
    /// initial colour from `theme`.
    pub fn new(
        config: FieldConfig,
        viewport: Viewport,
        now_ms: f64,
        rng: Box<dyn RngCore>,
        theme: &dyn ThemeSource,
    ) -> Self {
        let mut field = ParticleField::new(config, viewport.width, viewport.height, rng);
        if field.config().fill.is_none() {
            field.refresh_color(&resolve_color(theme));
        }
        Self::from_field(field, viewport, now_ms)
    }

    /// Wrap an existing field. Its extent should already match `viewport`.
    #[must_use]
    pub fn from_field(field: ParticleField, viewport: Viewport, now_ms: f64) -> Self {
        let resize = ResizeAdapter::new();
        let buffer = resize.buffer_size(viewport);
        Self { field, pointer: PointerTracker::new(now_ms), release: ReleaseController::new(), resize, buffer }
    }

    // --- Queries ---

    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[must_use]
    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    #[must_use]
    pub fn release_mode(&self) -> ReleaseMode {
        self.release.mode()
    }

    /// Backing buffer size from the most recent resize.
    #[must_use]
    pub fn buffer(&self) -> BufferSize {
        self.buffer
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.field.config().interactive
    }

    // --- Events ---

    /// A pointer-move event at `point` (CSS pixels).
    pub fn on_pointer_move(&mut self, point: Point, now_ms: f64) {
        if !self.is_interactive() {
            return;
        }
        self.pointer.on_move(point, now_ms);
        self.release.on_pointer_move();
    }

    /// The window lost focus. Returns `true` if a release started.
    pub fn on_blur(&mut self, now_ms: f64) -> bool {
        self.force_release(now_ms)
    }

    /// The document became hidden. Returns `true` if a release started.
    pub fn on_visibility_hidden(&mut self, now_ms: f64) -> bool {
        self.force_release(now_ms)
    }

    /// The viewport changed; returns the new backing buffer size.
    pub fn on_resize(&mut self, viewport: Viewport) -> BufferSize {
        self.buffer = self.resize.buffer_size(viewport);
        self.field.resize(viewport.width, viewport.height);
        self.buffer
    }

    // --- Frame ---

    /// Advance the layer by one frame.
    pub fn tick(&mut self, now_ms: f64, theme: &dyn ThemeSource) -> TickReport {
        let frame = self.field.advance_frame();
        if self.field.config().fill.is_none() && self.field.color_due() {
            self.field.refresh_color(&resolve_color(theme));
        }

        if !self.is_interactive() {
            self.field.step(StepInput { pointer: None, influence: 0.0, damping: DAMPING });
            return TickReport { frame, influence: 0.0, released: false };
        }

        let influence = self.release.influence(now_ms);
        let field = &self.field;
        let origin = self
            .release
            .check_idle(now_ms, &self.pointer, frame, |at| field.count_within(at, CLUSTER_RADIUS_PX));
        if let Some(origin) = origin {
            self.field.apply_release_impulse(origin);
        }

        self.field.step(StepInput { pointer: self.pointer.position(), influence, damping: self.release.damping() });
        TickReport { frame, influence, released: origin.is_some() }
    }

    /// Draw the current state.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `surface`.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<FrameStats, S::Error> {
        render::draw_frame(surface, &self.field)
    }

    fn force_release(&mut self, now_ms: f64) -> bool {
        if !self.is_interactive() || !self.release.trigger(now_ms, true) {
            return false;
        }
        if let Some(origin) = self.pointer.position() {
            self.field.apply_release_impulse(origin);
        }
        true
    }
}
