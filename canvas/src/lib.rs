//! Browser host for the landing-page particle layers.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It binds
//! [`particle_field`] engines to the page's three `<canvas>` elements, feeds
//! them DOM events and drives one `requestAnimationFrame` loop per layer.
//! The page calls [`ParticleFields::mount`] once and [`ParticleFields::stop`]
//! when it tears down.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Per-canvas [`engine::Engine`] wrapping the testable core |
//! | [`frame_loop`] | Self re-arming animation frame loop with a run flag |
//! | [`dom`] | Canvas lookup, viewport/theme reads, passive listeners |
//! | [`render`] | `Surface` implementation over `CanvasRenderingContext2d` |

pub mod dom;
pub mod engine;
pub mod frame_loop;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use particle_field::config::{FieldConfig, FieldSetConfig};
use particle_field::pointer::Point;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, MouseEvent, VisibilityState, Window};

use crate::dom::{CssTheme, Listener, MountError};
use crate::engine::Engine;
use crate::frame_loop::FrameLoop;

/// Canvas ids, front to back: the interactive layer, the soft background and
/// the top overlay.
pub const FOREGROUND_CANVAS: &str = "particles";
pub const BACKGROUND_CANVAS: &str = "particles-background";
pub const EXTRA_CANVAS: &str = "extra-particles";

static LOGGING: Once = Once::new();

fn init_logging() {
    LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_ok() {
            log::debug!("console logger installed");
        }
    });
}

type Layers = Rc<Vec<Rc<RefCell<Engine>>>>;

/// The mounted particle layers of one page.
#[wasm_bindgen]
pub struct ParticleFields {
    loops: Vec<FrameLoop>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ParticleFields {
    /// Mount every layer with the built-in presets.
    ///
    /// # Errors
    ///
    /// Rejects when there is no window or document. Missing canvases are
    /// skipped rather than reported.
    pub fn mount() -> Result<ParticleFields, JsValue> {
        Self::mount_set(FieldSetConfig::default())
    }

    /// Mount with per-layer overrides, e.g. `{"background": {"count": 60}}`.
    ///
    /// # Errors
    ///
    /// Rejects on malformed or invalid configuration, and when there is no
    /// window or document.
    #[wasm_bindgen(js_name = mountWithConfig)]
    pub fn mount_with_config(json: &str) -> Result<ParticleFields, JsValue> {
        let config = FieldSetConfig::from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        Self::mount_set(config)
    }

    /// Stop every frame loop and remove every listener. Idempotent.
    pub fn stop(&mut self) {
        let running = self.running_layers();
        for frames in &self.loops {
            frames.stop();
        }
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        if running > 0 {
            log::debug!("stopped {running} particle layers");
        }
    }

    /// Number of layers whose loop is still running.
    #[wasm_bindgen(getter, js_name = runningLayers)]
    #[must_use]
    pub fn running_layers(&self) -> usize {
        self.loops.iter().filter(|frames| frames.is_running()).count()
    }
}

impl ParticleFields {
    fn mount_set(config: FieldSetConfig) -> Result<ParticleFields, JsValue> {
        init_logging();
        let window = web_sys::window().ok_or_else(|| js_error(&MountError::NoWindow))?;
        let document = window.document().ok_or_else(|| js_error(&MountError::NoDocument))?;
        let theme = Rc::new(CssTheme::new(window.clone(), &document));
        let seed = js_sys::Math::random();

        let specs = [
            (FOREGROUND_CANVAS, config.foreground),
            (BACKGROUND_CANVAS, config.background),
            (EXTRA_CANVAS, config.extra),
        ];
        let mut engines = Vec::new();
        let mut loops = Vec::new();
        for (layer, (id, layer_config)) in (0_u64..).zip(specs) {
            let mounted = mount_layer(&window, &document, id, layer_config, dom::layer_seed(seed, layer), &theme);
            match mounted {
                Ok((engine, frames)) => {
                    engines.push(engine);
                    loops.push(frames);
                }
                Err(err) => log::debug!("skipping layer {id}: {err}"),
            }
        }

        let mut fields = ParticleFields { loops, listeners: Vec::with_capacity(4) };
        if let Err(err) = register_listeners(&window, &document, &Rc::new(engines), &mut fields.listeners) {
            fields.stop();
            return Err(err);
        }
        log::debug!("mounted {} particle layers", fields.loops.len());
        Ok(fields)
    }
}

impl Drop for ParticleFields {
    fn drop(&mut self) {
        self.stop();
    }
}

fn mount_layer(
    window: &Window,
    document: &Document,
    id: &'static str,
    config: FieldConfig,
    seed: u64,
    theme: &Rc<CssTheme>,
) -> Result<(Rc<RefCell<Engine>>, FrameLoop), MountError> {
    let surface = dom::canvas_2d(document, id)?;
    let viewport = dom::viewport(window);
    let engine = Engine::new(id, surface, config, viewport, dom::now_ms(window), seed, theme.as_ref())?;
    let engine = Rc::new(RefCell::new(engine));
    let frames = FrameLoop::start(window, Rc::clone(&engine), Rc::clone(theme))?;
    Ok((engine, frames))
}

fn register_listeners(
    window: &Window,
    document: &Document,
    engines: &Layers,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    {
        let engines = Rc::clone(engines);
        let window_for_cb = window.clone();
        listeners.push(Listener::add(window, "mousemove", move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let point = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            let now = dom::now_ms(&window_for_cb);
            for_each_engine(&engines, |engine| engine.on_pointer_move(point, now));
        })?);
    }

    {
        let engines = Rc::clone(engines);
        let window_for_cb = window.clone();
        listeners.push(Listener::add(window, "blur", move |_event: Event| {
            let now = dom::now_ms(&window_for_cb);
            for_each_engine(&engines, |engine| engine.on_blur(now));
        })?);
    }

    {
        let engines = Rc::clone(engines);
        let window_for_cb = window.clone();
        let document_for_cb = document.clone();
        listeners.push(Listener::add(document, "visibilitychange", move |_event: Event| {
            if document_for_cb.visibility_state() != VisibilityState::Hidden {
                return;
            }
            let now = dom::now_ms(&window_for_cb);
            for_each_engine(&engines, |engine| engine.on_visibility_hidden(now));
        })?);
    }

    {
        let engines = Rc::clone(engines);
        let window_for_cb = window.clone();
        listeners.push(Listener::add(window, "resize", move |_event: Event| {
            let viewport = dom::viewport(&window_for_cb);
            for_each_engine(&engines, |engine| {
                if let Err(err) = engine.resize(viewport) {
                    log::warn!("{}: resize failed: {err:?}", engine.id());
                }
            });
        })?);
    }

    Ok(())
}

fn for_each_engine(engines: &Layers, mut f: impl FnMut(&mut Engine)) {
    for engine in engines.iter() {
        if let Ok(mut engine) = engine.try_borrow_mut() {
            f(&mut engine);
        }
    }
}

fn js_error(err: &MountError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
