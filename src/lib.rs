//! Interactive particle field animation core.
//!
//! This crate holds everything about the landing-page particle layers that
//! does not touch the browser: spawning particles, stepping the physics,
//! tracking the pointer, running the idle release cycle, sizing backing
//! buffers and turning a frame into drawing commands. The `field-canvas`
//! crate binds it to `<canvas>` elements and `requestAnimationFrame`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Per-canvas [`engine::EngineCore`]: event and frame entry points |
//! | [`simulation`] | Fixed particle set and the per-frame step |
//! | [`particle`] | A single particle and its spawn rules |
//! | [`release`] | Active / Releasing / Suppressed state machine |
//! | [`pointer`] | Pointer position and idle clock |
//! | [`resize`] | DPR-capped backing buffer sizing |
//! | [`render`] | Frame drawing against the [`render::Surface`] trait |
//! | [`theme`] | Theme colour lookup |
//! | [`lifecycle`] | Run flag shared with a frame loop |
//! | [`config`] | Per-layer configuration and JSON overrides |
//! | [`error`] | Configuration errors |
//! | [`consts`] | Shared numeric constants |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod particle;
pub mod pointer;
pub mod release;
pub mod render;
pub mod resize;
pub mod simulation;
pub mod theme;
