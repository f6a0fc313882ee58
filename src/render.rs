//! Rendering: draws one particle field onto a 2D drawing surface.
//!
//! This module only reads simulation state. It talks to the platform through
//! the [`Surface`] trait, which the browser host implements over
//! `CanvasRenderingContext2d` and the tests implement as a command recorder.
//!
//! All surface calls propagate errors via `Result<(), Surface::Error>`. The
//! caller decides what a failed frame means; the browser host logs and keeps
//! its loop running.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{LINK_ALPHA, LINK_DISTANCE_PX, LINK_WIDTH, MAX_LINKS_PER_PARTICLE};
use crate::particle::Particle;
use crate::pointer::Point;
use crate::simulation::ParticleField;

/// Shadow applied when filling a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow<'a> {
    pub color: &'a str,
    pub blur: f64,
}

/// The drawing primitives the renderer needs. Coordinates are CSS pixels.
pub trait Surface {
    type Error;

    /// Fill a rectangle with a (possibly translucent) style.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the platform call fails.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) -> Result<(), Self::Error>;

    /// Clear a rectangle to transparent.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the platform call fails.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), Self::Error>;

    /// Fill a circle, optionally with a blurred shadow.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the platform call fails.
    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str, glow: Option<Glow<'_>>)
    -> Result<(), Self::Error>;

    /// Stroke a straight line.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if the platform call fails.
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &str, width: f64) -> Result<(), Self::Error>;
}

/// A proximity link between two particles, by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    /// `1` at distance zero, falling linearly to `0` at the link distance.
    pub opacity: f64,
}

/// What a frame drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub links: usize,
}

/// Find the links to draw this frame.
///
/// Each particle scans forward through the particles after it and links to
/// those closer than `max_distance`, stopping after `cap` links. Links a
/// particle receives from earlier particles do not count toward its own cap.
#[must_use]
pub fn find_links(particles: &[Particle], max_distance: f64, cap: usize) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        let mut made = 0;
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            if made >= cap {
                break;
            }
            let distance = a.distance_to(b.x, b.y);
            if distance < max_distance {
                links.push(Link { from: i, to: j, opacity: 1.0 - distance / max_distance });
                made += 1;
            }
        }
    }
    links
}

/// Stroke style for a link of the given opacity.
#[must_use]
pub fn link_stroke(opacity: f64) -> String {
    format!("rgba(255, 255, 255, {})", opacity * LINK_ALPHA)
}

/// Draw the field: backdrop, particles, then links.
///
/// # Errors
///
/// Returns the first error reported by `surface`.
pub fn draw_frame<S: Surface>(surface: &mut S, field: &ParticleField) -> Result<FrameStats, S::Error> {
    let config = field.config();
    let (width, height) = (field.width(), field.height());

    // Layer 1: fade for trails, or wipe.
    match config.trail_fade.as_deref() {
        Some(fade) => surface.fill_rect(0.0, 0.0, width, height, fade)?,
        None => surface.clear_rect(0.0, 0.0, width, height)?,
    }

    // Layer 2: particles.
    for p in field.particles() {
        let glow = (config.glow_blur > 0.0).then(|| Glow {
            color: config.glow_color.as_deref().unwrap_or(&p.color),
            blur: config.glow_blur,
        });
        surface.fill_circle(Point::new(p.x, p.y), p.radius(), &p.color, glow)?;
    }

    // Layer 3: proximity links.
    let mut stats = FrameStats { particles: field.len(), links: 0 };
    if config.links {
        let particles = field.particles();
        for link in find_links(particles, LINK_DISTANCE_PX, MAX_LINKS_PER_PARTICLE) {
            let a = &particles[link.from];
            let b = &particles[link.to];
            surface.stroke_line(Point::new(a.x, a.y), Point::new(b.x, b.y), &link_stroke(link.opacity), LINK_WIDTH)?;
            stats.links += 1;
        }
    }

    Ok(stats)
}
