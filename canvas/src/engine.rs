use particle_field::config::FieldConfig;
use particle_field::engine::EngineCore;
use particle_field::pointer::Point;
use particle_field::render::FrameStats;
use particle_field::resize::{BufferSize, Viewport};
use particle_field::theme::ThemeSource;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::render::CanvasSurface;

/// One particle layer bound to its canvas. Wraps `EngineCore`, which holds
/// all logic that doesn't depend on the canvas element.
pub struct Engine {
    id: &'static str,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Spawn the layer and size its backing buffer for `viewport`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the initial context transform cannot be applied.
    pub fn new(
        id: &'static str,
        (canvas, ctx): (HtmlCanvasElement, CanvasRenderingContext2d),
        config: FieldConfig,
        viewport: Viewport,
        now_ms: f64,
        seed: u64,
        theme: &dyn ThemeSource,
    ) -> Result<Self, JsValue> {
        let rng = Box::new(SmallRng::seed_from_u64(seed));
        let core = EngineCore::new(config, viewport, now_ms, rng, theme);
        let engine = Self { id, canvas, ctx, core };
        engine.apply_buffer(engine.core.buffer())?;
        log::debug!("{id}: mounted {} particles", engine.core.field().len());
        Ok(engine)
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    // --- Input events ---

    pub fn on_pointer_move(&mut self, point: Point, now_ms: f64) {
        self.core.on_pointer_move(point, now_ms);
    }

    pub fn on_blur(&mut self, now_ms: f64) {
        if self.core.on_blur(now_ms) {
            log::debug!("{}: release forced by blur", self.id);
        }
    }

    pub fn on_visibility_hidden(&mut self, now_ms: f64) {
        if self.core.on_visibility_hidden(now_ms) {
            log::debug!("{}: release forced by hidden document", self.id);
        }
    }

    // --- Viewport ---

    /// Resize the backing buffer and rescale the layer.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the context transform cannot be applied.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), JsValue> {
        let buffer = self.core.on_resize(viewport);
        self.apply_buffer(buffer)
    }

    /// Resizing the buffer resets the context, so the DPR transform is
    /// reapplied every time.
    fn apply_buffer(&self, buffer: BufferSize) -> Result<(), JsValue> {
        self.canvas.set_width(buffer.width);
        self.canvas.set_height(buffer.height);
        self.ctx.set_transform(buffer.scale, 0.0, 0.0, buffer.scale, 0.0, 0.0)
    }

    // --- Frame ---

    /// Step the simulation and draw it. Draw failures are logged and the
    /// next frame runs normally.
    pub fn frame(&mut self, now_ms: f64, theme: &dyn ThemeSource) {
        let report = self.core.tick(now_ms, theme);
        if report.released {
            log::debug!("{}: idle release at frame {}", self.id, report.frame);
        }
        if let Err(err) = self.render() {
            log::warn!("{}: frame {} draw failed: {err:?}", self.id, report.frame);
        }
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self) -> Result<FrameStats, JsValue> {
        self.core.render(&mut CanvasSurface::new(&self.ctx))
    }
}
