//! Rendering: the [`Surface`] implementation over a 2D canvas context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Frame composition lives in [`particle_field::render`]; this adapter only
//! maps its primitives onto `Canvas2D` calls in CSS pixel coordinates. The
//! device pixel ratio is applied once per resize as the context transform.
//!
//! Fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::f64::consts::TAU;

use particle_field::pointer::Point;
use particle_field::render::{Glow, Surface};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Draws onto a borrowed 2D context.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface<'_> {
    type Error = JsValue;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill_rect(x, y, width, height);
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.clear_rect(x, y, width, height);
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str, glow: Option<Glow<'_>>) -> Result<(), JsValue> {
        match glow {
            Some(glow) => {
                self.ctx.set_shadow_color(glow.color);
                self.ctx.set_shadow_blur(glow.blur);
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
        self.ctx.set_fill_style_str(fill);
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &str, width: f64) -> Result<(), JsValue> {
        // Lines keep whatever shadow the last particle left set.
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        Ok(())
    }
}
