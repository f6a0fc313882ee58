//! `requestAnimationFrame` loop for one layer.
//!
//! The callback re-arms itself at the end of each frame while the layer's
//! [`RunFlag`] is set. The closure holds a handle to itself through a shared
//! slot; [`FrameLoop::stop`] empties that slot, which breaks the cycle and
//! frees the closure together with the engine it captured.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use particle_field::lifecycle::RunFlag;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use crate::dom::CssTheme;
use crate::engine::Engine;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct FrameLoop {
    window: Window,
    flag: RunFlag,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Schedule the first frame for `engine`.
    ///
    /// # Errors
    ///
    /// Returns the browser error if the first frame cannot be requested.
    pub fn start(window: &Window, engine: Rc<RefCell<Engine>>, theme: Rc<CssTheme>) -> Result<Self, JsValue> {
        let flag = RunFlag::new();
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let cb = {
            let window = window.clone();
            let flag = flag.clone();
            let pending = Rc::clone(&pending);
            let callback = Rc::clone(&callback);
            Closure::wrap(Box::new(move |ts: f64| {
                pending.set(None);
                if !flag.is_running() {
                    return;
                }
                if let Ok(mut engine) = engine.try_borrow_mut() {
                    engine.frame(ts, theme.as_ref());
                }
                if !flag.is_running() {
                    return;
                }
                if let Some(cb) = callback.borrow().as_ref() {
                    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => pending.set(Some(id)),
                        Err(err) => log::warn!("frame re-arm failed: {err:?}"),
                    }
                }
            }) as Box<dyn FnMut(f64)>)
        };

        let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        pending.set(Some(id));
        *callback.borrow_mut() = Some(cb);
        Ok(Self { window: window.clone(), flag, pending, callback })
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.flag.is_running()
    }

    /// End the loop: clear the run flag, cancel the pending frame and free
    /// the callback. Safe to call more than once.
    pub fn stop(&self) {
        if !self.flag.stop() {
            return;
        }
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancel frame {id} failed: {err:?}");
            }
        }
        self.callback.borrow_mut().take();
    }
}
