//! Bounce Box - a ball bouncing inside a sketchy 3D box
//!
//! Core modules:
//! - `sim`: Pure simulation (integrator, wall collisions)
//! - `projection`: Fake-perspective 3D to 2D mapping
//! - `wall` / `effect`: Box faces and their decaying impact overlays
//! - `animator`: Per-frame control loop tying physics, drawing and audio together
//! - `renderer`: Drawing service abstraction (sketchy renderer on the web)
//! - `audio`: Positional impact cue
//! - `platform`: Browser/native host glue
//! - `settings`: Data-driven configuration

pub mod animator;
pub mod audio;
pub mod effect;
pub mod error;
pub mod linear;
pub mod platform;
pub mod projection;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod wall;

pub use animator::{Animator, AnimatorPhase};
pub use error::Error;
pub use linear::LinearMap;
pub use projection::Projector;
pub use settings::{RedrawCadence, Settings};

use glam::{DVec2, DVec3};

/// A point in box-space.
///
/// x grows to the right, y grows up (the opposite of most screen coordinates),
/// z grows from the screen toward the viewer.
pub type Point3 = DVec3;
/// Velocity in box-space units per second.
pub type Vector3 = DVec3;
/// A point on the drawing surface.
pub type Point2 = DVec2;

/// Scene configuration constants
pub mod consts {
    /// Half the edge length of the box
    pub const BOX_MAX: f64 = 14.0;
    pub const BALL_RADIUS: f64 = 1.5;
    /// Initial velocity is uniform in [-MAX_INITIAL_SPEED, MAX_INITIAL_SPEED] per axis
    pub const MAX_INITIAL_SPEED: f64 = 25.0;

    /// Drawing surface is a 0..100 view box with one unit of margin
    pub const SCREEN_MIN: f64 = 1.0;
    pub const SCREEN_MAX: f64 = 99.0;

    /// Depth ratio at the near face and at the far face
    pub const DEPTH_RATIO_NEAR: f64 = 1.0;
    pub const DEPTH_RATIO_FAR: f64 = 0.5;

    /// Impact effect lifetime (ms)
    pub const EFFECT_DURATION_MS: f64 = 350.0;
    /// Overlay size ramp, as a fraction of the wall outline
    pub const EFFECT_SIZE_START: f64 = 0.025;
    pub const EFFECT_SIZE_END: f64 = 0.5;
    /// Overlay hatch gap ramp
    pub const EFFECT_GAP_START: f64 = 2.0;
    pub const EFFECT_GAP_END: f64 = 10.0;
    /// Overlay hatch weight ramp
    pub const EFFECT_WEIGHT_START: f64 = 0.85;
    pub const EFFECT_WEIGHT_END: f64 = 0.05;
    /// Overlay hatching is rotated this far from the wall's own hatching (degrees)
    pub const EFFECT_ANGLE_OFFSET: f64 = 45.0;

    /// Minimum spacing between overlay redraws (ms), plus up to this much jitter
    pub const EFFECT_REDRAW_MIN_MS: f64 = 100.0;
    pub const EFFECT_REDRAW_JITTER_MS: f64 = 75.0;

    /// Minimum spacing between ball redraws (ms), plus up to this much jitter
    pub const BALL_REDRAW_MIN_MS: f64 = 100.0;
    pub const BALL_REDRAW_JITTER_MS: f64 = 100.0;

    /// A ball pressed against the front face is drawn this much larger
    pub const SPLAT_SCALE: f64 = 2.5;

    /// Quietest impact (far face); the near face plays at full volume
    pub const AUDIO_FAR_VOLUME: f64 = 0.25;
}
