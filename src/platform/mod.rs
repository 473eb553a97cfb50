//! Platform abstraction layer
//!
//! Hosts own the frame clock, the drawing surface and audio output:
//! - `native`: headless run against an in-memory surface and a simulated clock
//! - `web`: rough.js on an `<svg>`, an `<audio>` element, `requestAnimationFrame`

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;
