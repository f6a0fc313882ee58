//! Particle field simulation: one fixed-size particle set per canvas.
//!
//! DESIGN
//! ======
//! A field is created once with `config.count` particles and never grows or
//! shrinks. Each frame moves every particle by its drift, optionally pulls
//! its impulse velocity toward the pointer, integrates and damps the impulse,
//! softly limits it, and finally reflects both velocity channels at the edges.
//!
//! Positions are never clamped during a step; a particle may sit a fraction
//! of a pixel outside the field for one frame before the reflected velocity
//! brings it back.
//!
//! Non-interactive layers use the same type with `interactive = false`; with
//! no initial impulse they reduce to pure drift with edge reflection.

#[cfg(test)]
#[path = "simulation_test.rs"]
mod simulation_test;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::FieldConfig;
use crate::consts::{
    ATTRACTION_RADIUS_PX, ATTRACTION_STRENGTH, COLOR_SAMPLE_FRAMES, RELEASE_IMPULSE_RADIUS_PX, RELEASE_RADIAL_KICK,
    RELEASE_SWIRL, SOFT_LIMIT_FACTOR, SOFT_SPEED_LIMIT,
};
use crate::particle::Particle;
use crate::pointer::Point;

/// Per-frame inputs to [`ParticleField::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInput {
    /// Current pointer position, if known.
    pub pointer: Option<Point>,
    /// Attraction multiplier in `[0, 1]`.
    pub influence: f64,
    /// Multiplicative impulse damping for this frame.
    pub damping: f64,
}

/// The particles of one canvas plus the state needed to advance them.
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    frame: u64,
    rng: Box<dyn RngCore>,
}

impl ParticleField {
    /// Spawn `config.count` particles inside `width` × `height` CSS pixels.
    #[must_use]
    pub fn new(config: FieldConfig, width: f64, height: f64, mut rng: Box<dyn RngCore>) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle::spawn(&mut *rng, width, height, &config))
            .collect();
        Self { config, particles, width, height, frame: 0, rng }
    }

    /// Build a field around an explicit particle set; `config.count` follows it.
    #[must_use]
    pub fn with_particles(
        mut config: FieldConfig,
        width: f64,
        height: f64,
        particles: Vec<Particle>,
        rng: Box<dyn RngCore>,
    ) -> Self {
        config.count = particles.len();
        Self { config, particles, width, height, frame: 0, rng }
    }

    /// Like [`ParticleField::new`] with a small fast generator seeded from `seed`.
    #[must_use]
    pub fn seeded(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
        Self::new(config, width, height, Box::new(SmallRng::seed_from_u64(seed)))
    }

    #[must_use]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Field width in CSS pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Field height in CSS pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of frames advanced so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Count a new frame and return its number (the first frame is 1).
    pub fn advance_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// Whether this frame should re-read the theme colour.
    #[must_use]
    pub fn color_due(&self) -> bool {
        self.frame % COLOR_SAMPLE_FRAMES == 0
    }

    /// Assign `color` to every particle.
    pub fn refresh_color(&mut self, color: &str) {
        for p in &mut self.particles {
            if p.color != color {
                color.clone_into(&mut p.color);
            }
        }
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self, input: StepInput) {
        let attractor = if self.config.interactive && input.influence > 0.0 {
            input.pointer
        } else {
            None
        };
        let (width, height) = (self.width, self.height);

        for p in &mut self.particles {
            p.x += p.dx;
            p.y += p.dy;

            if let Some(target) = attractor {
                let ax = target.x - p.x;
                let ay = target.y - p.y;
                let distance = ax.hypot(ay);
                if distance < ATTRACTION_RADIUS_PX {
                    let force = ATTRACTION_STRENGTH * (1.0 - distance / ATTRACTION_RADIUS_PX) * input.influence;
                    p.vx += ax * force;
                    p.vy += ay * force;
                }
            }

            p.x += p.vx;
            p.y += p.vy;
            p.vx *= input.damping;
            p.vy *= input.damping;

            if p.vx.abs() > SOFT_SPEED_LIMIT {
                p.vx *= SOFT_LIMIT_FACTOR;
            }
            if p.vy.abs() > SOFT_SPEED_LIMIT {
                p.vy *= SOFT_LIMIT_FACTOR;
            }

            if p.x <= 0.0 || p.x >= width {
                p.vx = -p.vx;
            }
            if p.y <= 0.0 || p.y >= height {
                p.vy = -p.vy;
            }

            // Drift reflects independently of the impulse channel.
            if p.x <= 0.0 || p.x >= width {
                p.dx = -p.dx;
            }
            if p.y <= 0.0 || p.y >= height {
                p.dy = -p.dy;
            }
        }
    }

    /// Number of particles strictly within `radius` of `point`.
    #[must_use]
    pub fn count_within(&self, point: Point, radius: f64) -> usize {
        let radius_sq = radius * radius;
        self.particles
            .iter()
            .filter(|p| {
                let dx = p.x - point.x;
                let dy = p.y - point.y;
                dx * dx + dy * dy < radius_sq
            })
            .count()
    }

    /// Kick particles near `origin` outward with a little random swirl.
    ///
    /// Every particle within the release radius gets a radial push away from
    /// `origin` plus a perpendicular component of random strength, so the
    /// dispersal does not form a perfect ring. Returns how many were kicked.
    pub fn apply_release_impulse(&mut self, origin: Point) -> usize {
        let mut kicked = 0;
        for p in &mut self.particles {
            let dx = p.x - origin.x;
            let dy = p.y - origin.y;
            let mut distance = dx.hypot(dy);
            if distance <= 0.0 {
                distance = 1.0;
            }
            if distance >= RELEASE_IMPULSE_RADIUS_PX {
                continue;
            }
            let nx = dx / distance;
            let ny = dy / distance;
            let swirl_x = RELEASE_SWIRL * (self.rng.random::<f64>() * 0.6);
            let swirl_y = RELEASE_SWIRL * (self.rng.random::<f64>() * 0.6);
            p.vx += nx * RELEASE_RADIAL_KICK - ny * swirl_x;
            p.vy += ny * RELEASE_RADIAL_KICK + nx * swirl_y;
            kicked += 1;
        }
        log::debug!("release impulse applied to {kicked} particles");
        kicked
    }

    /// Change the field extent, scaling positions so the layout is kept.
    ///
    /// An axis is only scaled when both the old and new extent are positive,
    /// so collapsing to zero and back leaves positions where they were.
    pub fn resize(&mut self, width: f64, height: f64) {
        let scale = |old: f64, new: f64| if old > 0.0 && new > 0.0 { new / old } else { 1.0 };
        let sx = scale(self.width, width);
        let sy = scale(self.height, height);
        for p in &mut self.particles {
            p.x *= sx;
            p.y *= sy;
        }
        self.width = width;
        self.height = height;
    }
}
