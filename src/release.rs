//! Release state machine: decides how strongly the pointer attracts particles.
//!
//! DESIGN
//! ======
//! A pointer left idle over the field pulls particles into a tight static ring.
//! After a long idle period with a dense cluster, or when the page loses focus,
//! the controller starts a *release*: attraction fades out over five seconds
//! along an ease-out-cubic curve, then stays off until the pointer moves again.
//!
//! ```text
//!            idle + dense / blur / hidden          5000 ms elapsed
//!   Active ───────────────────────────────▶ Releasing ─────────────▶ Suppressed
//!     ▲                                        │                        │
//!     └──────────────── pointer move ──────────┴────────────────────────┘
//! ```
//!
//! The influence factor is recomputed from the clock every frame; the
//! Releasing → Suppressed transition happens inside that computation.
//!
//! A forced trigger while Suppressed still runs a full release (kick and
//! release damping) but attraction stays off for its whole duration, and the
//! controller falls back to Suppressed when it ends.

#[cfg(test)]
#[path = "release_test.rs"]
mod release_test;

use crate::consts::{CLUSTER_THRESHOLD, DAMPING, IDLE_MS, RELEASE_DAMPING, RELEASE_MS, RELEASE_SAMPLE_FRAMES};
use crate::pointer::{Point, PointerTracker};

/// Current phase of the release cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseMode {
    /// Pointer attraction at full strength.
    #[default]
    Active,
    /// Attraction fading out after a release trigger.
    Releasing,
    /// Attraction off until the next pointer move.
    Suppressed,
}

/// Ease-out-cubic curve on `[0, 1]`: `1 - (1 - t)^3`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Owns [`ReleaseMode`] and the release start time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseController {
    mode: ReleaseMode,
    release_start_ms: f64,
    /// Attraction stays off until the next pointer move.
    suppressed: bool,
}

impl ReleaseController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    /// When the current (or last) release started.
    #[must_use]
    pub fn release_start_ms(&self) -> f64 {
        self.release_start_ms
    }

    /// A genuine pointer move: abort any release and restore full attraction.
    pub fn on_pointer_move(&mut self) {
        if self.mode != ReleaseMode::Active {
            log::debug!("release: {:?} -> Active (pointer moved)", self.mode);
        }
        self.mode = ReleaseMode::Active;
        self.suppressed = false;
    }

    /// Start a release at `now_ms`.
    ///
    /// Returns `true` when a release actually (re)started and the caller
    /// should apply the dispersal impulse. An unforced trigger is ignored
    /// unless active; a forced one always (re)starts the clock, and from
    /// Suppressed it releases without restoring attraction.
    pub fn trigger(&mut self, now_ms: f64, forced: bool) -> bool {
        match self.mode {
            ReleaseMode::Releasing | ReleaseMode::Suppressed if !forced => false,
            ReleaseMode::Active | ReleaseMode::Releasing | ReleaseMode::Suppressed => {
                log::debug!("release: {:?} -> Releasing (forced: {forced})", self.mode);
                self.mode = ReleaseMode::Releasing;
                self.release_start_ms = now_ms;
                true
            }
        }
    }

    /// Run the idle check for this frame.
    ///
    /// Only samples on frames divisible by the sampling interval, while
    /// active, with a known pointer that has been idle long enough. `density`
    /// is asked for the number of particles near the pointer; a release
    /// starts when that count exceeds the cluster threshold. Returns the
    /// pointer position the release was triggered around.
    pub fn check_idle(
        &mut self,
        now_ms: f64,
        pointer: &PointerTracker,
        frame: u64,
        density: impl FnOnce(Point) -> usize,
    ) -> Option<Point> {
        if self.mode != ReleaseMode::Active || frame % RELEASE_SAMPLE_FRAMES != 0 {
            return None;
        }
        let origin = pointer.position()?;
        if pointer.idle_ms(now_ms) < IDLE_MS {
            return None;
        }
        let nearby = density(origin);
        if nearby > CLUSTER_THRESHOLD && self.trigger(now_ms, false) {
            return Some(origin);
        }
        None
    }

    /// Eased fade progress of the current release in `[0, 1]`.
    ///
    /// Zero while active, one once suppressed.
    #[must_use]
    pub fn fade_progress(&self, now_ms: f64) -> f64 {
        match self.mode {
            ReleaseMode::Active => 0.0,
            ReleaseMode::Releasing => ease_out_cubic(self.elapsed_fraction(now_ms)),
            ReleaseMode::Suppressed => 1.0,
        }
    }

    /// The influence factor for this frame, in `[0, 1]`.
    ///
    /// Completes the release (Releasing → Suppressed) once the fade has run
    /// its full duration.
    pub fn influence(&mut self, now_ms: f64) -> f64 {
        match self.mode {
            ReleaseMode::Active => 1.0,
            ReleaseMode::Suppressed => 0.0,
            ReleaseMode::Releasing => {
                let t = self.elapsed_fraction(now_ms);
                if t >= 1.0 {
                    log::debug!("release: Releasing -> Suppressed");
                    self.mode = ReleaseMode::Suppressed;
                    self.suppressed = true;
                    return 0.0;
                }
                if self.suppressed { 0.0 } else { 1.0 - ease_out_cubic(t) }
            }
        }
    }

    /// Impulse damping factor for the current mode.
    #[must_use]
    pub fn damping(&self) -> f64 {
        if self.mode == ReleaseMode::Releasing { RELEASE_DAMPING } else { DAMPING }
    }

    fn elapsed_fraction(&self, now_ms: f64) -> f64 {
        ((now_ms - self.release_start_ms) / RELEASE_MS).clamp(0.0, 1.0)
    }
}
