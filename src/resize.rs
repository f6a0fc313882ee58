//! Device-pixel-ratio aware sizing of canvas backing buffers.
//!
//! Particle math runs in CSS pixels. The backing buffer is sized at a clamped
//! device pixel ratio and the drawing transform scales by the same ratio, so
//! CSS coordinates land correctly at any buffer resolution.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::consts::MAX_DEVICE_PIXEL_RATIO;

/// Viewport size as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Raw device pixel ratio.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self { width, height, device_pixel_ratio }
    }
}

/// Backing buffer dimensions and the transform scale that goes with them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferSize {
    /// Buffer width in device pixels.
    pub width: u32,
    /// Buffer height in device pixels.
    pub height: u32,
    /// Uniform scale for the drawing transform.
    pub scale: f64,
}

/// Computes buffer sizes for a canvas layer.
#[derive(Debug, Clone, Copy)]
pub struct ResizeAdapter {
    max_ratio: f64,
}

impl Default for ResizeAdapter {
    fn default() -> Self {
        Self { max_ratio: MAX_DEVICE_PIXEL_RATIO }
    }
}

impl ResizeAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The ratio actually used: the device ratio capped at the maximum.
    ///
    /// Missing, zero, negative or non-finite ratios count as 1.
    #[must_use]
    pub fn effective_ratio(&self, device_pixel_ratio: f64) -> f64 {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        ratio.min(self.max_ratio)
    }

    /// Buffer size for `viewport`: `floor(css * min(dpr, max))` on each axis.
    #[must_use]
    pub fn buffer_size(&self, viewport: Viewport) -> BufferSize {
        let scale = self.effective_ratio(viewport.device_pixel_ratio);
        BufferSize {
            width: to_pixels(viewport.width * scale),
            height: to_pixels(viewport.height * scale),
            scale,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.floor().min(f64::from(u32::MAX)) as u32
}
