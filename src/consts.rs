//! Shared numeric constants for the particle field.

// ── Pointer attraction ──────────────────────────────────────────

/// Pointer attraction reaches this far, in CSS pixels.
pub const ATTRACTION_RADIUS_PX: f64 = 400.0;

/// Attraction gain at distance zero; falls off linearly to the radius.
pub const ATTRACTION_STRENGTH: f64 = 0.005;

// ── Impulse channel ─────────────────────────────────────────────

/// Per-frame impulse damping while the pointer is in charge.
pub const DAMPING: f64 = 0.995;

/// Per-frame impulse damping while a release is fading out.
pub const RELEASE_DAMPING: f64 = 0.98;

/// Impulse components above this magnitude are softly pulled back.
pub const SOFT_SPEED_LIMIT: f64 = 0.35;

/// Multiplier applied to an impulse component over the soft limit.
pub const SOFT_LIMIT_FACTOR: f64 = 0.9;

// ── Release ─────────────────────────────────────────────────────

/// Pointer idle time before a release may trigger.
pub const IDLE_MS: f64 = 20_000.0;

/// Duration of the influence fade once a release starts.
pub const RELEASE_MS: f64 = 5_000.0;

/// Density is sampled on frames divisible by this.
pub const RELEASE_SAMPLE_FRAMES: u64 = 20;

/// Radius of the density sample around the pointer.
pub const CLUSTER_RADIUS_PX: f64 = 160.0;

/// A release needs strictly more particles than this inside the cluster radius.
pub const CLUSTER_THRESHOLD: usize = 18;

/// Particles inside this radius receive the release impulse.
pub const RELEASE_IMPULSE_RADIUS_PX: f64 = 200.0;

/// Radial component of the release impulse.
pub const RELEASE_RADIAL_KICK: f64 = 0.6;

/// Tangential share of the release impulse (scaled by a random factor below 0.6).
pub const RELEASE_SWIRL: f64 = 0.3;

// ── Theme ───────────────────────────────────────────────────────

/// The theme colour is re-read on frames divisible by this.
pub const COLOR_SAMPLE_FRAMES: u64 = 10;

/// Colour used when the theme supplies nothing.
pub const DEFAULT_PARTICLE_COLOR: &str = "#FFFFFF";

// ── Resize ──────────────────────────────────────────────────────

/// Upper bound on the device pixel ratio used for backing buffers.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 1.5;

// ── Rendering ───────────────────────────────────────────────────

/// Translucent fill that leaves short trails on the interactive layer.
pub const TRAIL_FADE: &str = "rgba(0, 0, 0, 0.06)";

/// Shadow blur for glowing particles.
pub const GLOW_BLUR: f64 = 4.0;

/// Particles closer than this are linked.
pub const LINK_DISTANCE_PX: f64 = 120.0;

/// Maximum links a particle initiates per frame.
pub const MAX_LINKS_PER_PARTICLE: usize = 3;

/// Alpha applied on top of the distance falloff of a link.
pub const LINK_ALPHA: f64 = 0.3;

/// Stroke width of a link.
pub const LINK_WIDTH: f64 = 1.0;
