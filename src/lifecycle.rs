//! Run flag shared between a frame loop and whoever may stop it.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::cell::Cell;
use std::rc::Rc;

/// Shared on/off switch for one animation loop.
///
/// Clones observe the same state. A loop checks [`RunFlag::is_running`]
/// before re-arming its next frame; once stopped it never restarts.
#[derive(Debug, Clone)]
pub struct RunFlag(Rc<Cell<bool>>);

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl RunFlag {
    /// A flag in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.0.get()
    }

    /// Stop the loop. Returns `true` if this call changed the state.
    pub fn stop(&self) -> bool {
        self.0.replace(false)
    }
}
