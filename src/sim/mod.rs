//! Deterministic simulation module
//!
//! Ball motion and wall collisions live here. This module must stay pure:
//! - Time comes in only as frame timestamps
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Axis, BallState, BoxBounds, CollisionEvent, Side, SimulationState, WallId};
pub use tick::advance;
