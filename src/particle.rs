//! A single particle and its two motion channels.
//!
//! `dx`/`dy` is the drift channel: small, persistent, set once at spawn.
//! `vx`/`vy` is the impulse channel: fed by pointer attraction and release
//! kicks, damped every frame. Both are added to the position every frame and
//! each is reflected at the canvas edges on its own.

#[cfg(test)]
#[path = "particle_test.rs"]
mod particle_test;

use rand::{Rng, RngCore};

use crate::config::FieldConfig;
use crate::consts::DEFAULT_PARTICLE_COLOR;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Drift velocity.
    pub dx: f64,
    pub dy: f64,
    /// Impulse velocity.
    pub vx: f64,
    pub vy: f64,
    pub color: String,
    radius: f64,
}

impl Particle {
    /// Build a particle with explicit state. `radius` must be positive.
    #[must_use]
    pub fn new(x: f64, y: f64, radius: f64, color: impl Into<String>) -> Self {
        Self { x, y, dx: 0.0, dy: 0.0, vx: 0.0, vy: 0.0, color: color.into(), radius }
    }

    /// Spawn a particle at a random position inside `width` × `height`.
    ///
    /// Draw order from `rng` is position, radius, drift, impulse.
    pub fn spawn(rng: &mut dyn RngCore, width: f64, height: f64, config: &FieldConfig) -> Self {
        let x = rng.random::<f64>() * width;
        let y = rng.random::<f64>() * height;
        let radius = config.radius_min + rng.random::<f64>() * config.radius_span;
        let dx = centered(rng, config.drift_spread);
        let dy = centered(rng, config.drift_spread);
        let (vx, vy) = if config.impulse_spread > 0.0 {
            (centered(rng, config.impulse_spread), centered(rng, config.impulse_spread))
        } else {
            (0.0, 0.0)
        };
        let color = config.fill.as_deref().unwrap_or(DEFAULT_PARTICLE_COLOR).to_owned();
        Self { x, y, dx, dy, vx, vy, color, radius }
    }

    /// Radius in CSS pixels; fixed at creation.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance to `(x, y)`.
    #[must_use]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Uniform sample in `[-spread / 2, spread / 2)`.
fn centered(rng: &mut dyn RngCore, spread: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * spread
}
