//! Browser glue: canvas lookup, viewport and theme reads, passive listeners.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use particle_field::resize::Viewport;
use particle_field::theme::ThemeSource;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Document, Element, Event, EventTarget, HtmlCanvasElement,
    Window,
};

/// CSS custom property holding the interactive particle colour.
pub const PARTICLE_COLOR_PROPERTY: &str = "--particle-color";

/// Reasons a layer could not be mounted.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("canvas #{0} not found")]
    MissingCanvas(&'static str),
    #[error("element #{0} is not a canvas")]
    NotCanvas(&'static str),
    #[error("2d context unavailable on #{0}")]
    NoContext(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// Current time on the same clock as `requestAnimationFrame` timestamps.
#[must_use]
pub fn now_ms(window: &Window) -> f64 {
    window.performance().map_or(0.0, |p| p.now())
}

/// The window's CSS viewport and device pixel ratio.
#[must_use]
pub fn viewport(window: &Window) -> Viewport {
    let width = js_number(window.inner_width());
    let height = js_number(window.inner_height());
    Viewport::new(width, height, window.device_pixel_ratio())
}

fn js_number(value: Result<JsValue, JsValue>) -> f64 {
    match value {
        Ok(value) => value.as_f64().unwrap_or(0.0),
        Err(_) => 0.0,
    }
}

/// Look up a canvas by id and obtain its 2D context.
///
/// # Errors
///
/// Returns [`MountError`] when the element is missing, is not a canvas, or
/// has no 2D context.
pub fn canvas_2d(
    document: &Document,
    id: &'static str,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), MountError> {
    let canvas = document
        .get_element_by_id(id)
        .ok_or(MountError::MissingCanvas(id))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MountError::NotCanvas(id))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or(MountError::NoContext(id))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| MountError::NoContext(id))?;
    Ok((canvas, ctx))
}

/// Reads the particle colour from the document element's computed style.
pub struct CssTheme {
    window: Window,
    root: Option<Element>,
}

impl CssTheme {
    #[must_use]
    pub fn new(window: Window, document: &Document) -> Self {
        Self { window, root: document.document_element() }
    }
}

impl ThemeSource for CssTheme {
    fn particle_color(&self) -> Option<String> {
        let root = self.root.as_ref()?;
        let Ok(Some(style)) = self.window.get_computed_style(root) else {
            return None;
        };
        match style.get_property_value(PARTICLE_COLOR_PROPERTY) {
            Ok(value) => Some(value),
            Err(_) => None,
        }
    }
}

/// Derive a per-layer seed from one `Math.random()` draw.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn layer_seed(random: f64, layer: u64) -> u64 {
    let unit = if random.is_finite() { random.clamp(0.0, 1.0) } else { 0.0 };
    let bits = (unit * 9_007_199_254_740_992.0) as u64;
    bits ^ layer.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// A passive event listener that can be removed again.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Register `handler` for `event` on `target` as a passive listener.
    ///
    /// # Errors
    ///
    /// Returns the browser error if registration fails.
    pub fn add(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), event, callback })
    }

    /// Unregister the listener; the closure is freed when `self` drops.
    pub fn remove(self) {
        let result = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
        if let Err(err) = result {
            log::warn!("failed to remove {} listener: {err:?}", self.event);
        }
    }
}
