//! Simulation state and core types

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::{Point3, Vector3};

/// One of the three box-space axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Integration order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Which end of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Low,
    High,
}

/// A face of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallId {
    Left,
    Right,
    Bottom,
    Top,
    /// Far face, z = min
    Back,
    /// Near face, z = max (toward the viewer)
    Front,
}

impl WallId {
    pub const ALL: [WallId; 6] = [
        WallId::Left,
        WallId::Right,
        WallId::Bottom,
        WallId::Top,
        WallId::Back,
        WallId::Front,
    ];

    pub fn new(axis: Axis, side: Side) -> Self {
        match (axis, side) {
            (Axis::X, Side::Low) => WallId::Left,
            (Axis::X, Side::High) => WallId::Right,
            (Axis::Y, Side::Low) => WallId::Bottom,
            (Axis::Y, Side::High) => WallId::Top,
            (Axis::Z, Side::Low) => WallId::Back,
            (Axis::Z, Side::High) => WallId::Front,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            WallId::Left | WallId::Right => Axis::X,
            WallId::Bottom | WallId::Top => Axis::Y,
            WallId::Back | WallId::Front => Axis::Z,
        }
    }

    pub fn side(self) -> Side {
        match self {
            WallId::Left | WallId::Bottom | WallId::Back => Side::Low,
            WallId::Right | WallId::Top | WallId::Front => Side::High,
        }
    }
}

/// The cube the ball lives in. Centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxBounds {
    pub min: f64,
    pub max: f64,
    pub ball_radius: f64,
}

impl BoxBounds {
    pub fn new(box_max: f64, ball_radius: f64) -> Result<Self, Error> {
        if !(box_max.is_finite() && box_max > 0.0) {
            return Err(Error::InvalidSetting {
                name: "box_max",
                reason: format!("must be positive, got {box_max}"),
            });
        }
        if !(ball_radius > 0.0 && ball_radius < box_max) {
            return Err(Error::InvalidSetting {
                name: "ball_radius",
                reason: format!("must be in (0, {box_max}), got {ball_radius}"),
            });
        }
        Ok(Self {
            min: -box_max,
            max: box_max,
            ball_radius,
        })
    }

    /// Lowest legal coordinate for the ball's center
    #[inline]
    pub fn ball_min(&self) -> f64 {
        self.min + self.ball_radius
    }

    /// Highest legal coordinate for the ball's center
    #[inline]
    pub fn ball_max(&self) -> f64 {
        self.max - self.ball_radius
    }

    /// Box-space coordinate of a wall's plane
    pub fn wall_plane(&self, side: Side) -> f64 {
        match side {
            Side::Low => self.min,
            Side::High => self.max,
        }
    }

    /// Corners of a face, ordered for a polygon outline
    pub fn face_corners(&self, wall: WallId) -> [Point3; 4] {
        let (lo, hi) = (self.min, self.max);
        let plane = self.wall_plane(wall.side());
        match wall.axis() {
            Axis::X => [
                Point3::new(plane, lo, lo),
                Point3::new(plane, hi, lo),
                Point3::new(plane, hi, hi),
                Point3::new(plane, lo, hi),
            ],
            Axis::Y => [
                Point3::new(lo, plane, lo),
                Point3::new(hi, plane, lo),
                Point3::new(hi, plane, hi),
                Point3::new(lo, plane, hi),
            ],
            Axis::Z => [
                Point3::new(lo, lo, plane),
                Point3::new(hi, lo, plane),
                Point3::new(hi, hi, plane),
                Point3::new(lo, hi, plane),
            ],
        }
    }
}

/// Ball position and velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub position: Point3,
    pub velocity: Vector3,
    /// Timestamp of the last integration (ms). `None` until the first frame.
    pub last_update: Option<f64>,
}

/// Emitted when an axis had to be clamped back inside the box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    pub axis: Axis,
    pub side: Side,
    /// Ball center right after this axis was clamped
    pub position: Point3,
    /// Frame timestamp (ms)
    pub time: f64,
}

impl CollisionEvent {
    pub fn wall(&self) -> WallId {
        WallId::new(self.axis, self.side)
    }
}

/// Everything the integrator owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub bounds: BoxBounds,
    pub ball: BallState,
}

impl SimulationState {
    pub fn new(bounds: BoxBounds, position: Point3, velocity: Vector3) -> Self {
        Self {
            bounds,
            ball: BallState {
                position,
                velocity,
                last_update: None,
            },
        }
    }

    /// Ball placed uniformly inside the legal range, moving in a random direction
    pub fn random<R: Rng>(bounds: BoxBounds, max_speed: f64, rng: &mut R) -> Self {
        let (lo, hi) = (bounds.ball_min(), bounds.ball_max());
        let position = Point3::new(
            rng.random_range(lo..=hi),
            rng.random_range(lo..=hi),
            rng.random_range(lo..=hi),
        );
        let velocity = Vector3::new(
            rng.random_range(-max_speed..=max_speed),
            rng.random_range(-max_speed..=max_speed),
            rng.random_range(-max_speed..=max_speed),
        );
        Self::new(bounds, position, velocity)
    }

    /// Advance to frame timestamp `now` (ms). See [`super::tick::advance`].
    pub fn advance(&mut self, now: f64) -> Vec<CollisionEvent> {
        super::tick::advance(self, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_box_derived_range() {
        let bounds = BoxBounds::new(14.0, 1.5).unwrap();
        assert_eq!(bounds.min, -14.0);
        assert_eq!(bounds.ball_min(), -12.5);
        assert_eq!(bounds.ball_max(), 12.5);
    }

    #[test]
    fn test_box_rejects_bad_radius() {
        assert!(BoxBounds::new(14.0, 14.0).is_err());
        assert!(BoxBounds::new(14.0, 0.0).is_err());
        assert!(BoxBounds::new(-1.0, 0.5).is_err());
    }

    #[test]
    fn test_wall_id_round_trip() {
        for wall in WallId::ALL {
            assert_eq!(WallId::new(wall.axis(), wall.side()), wall);
        }
    }

    #[test]
    fn test_face_corners_lie_on_plane() {
        let bounds = BoxBounds::new(14.0, 1.5).unwrap();
        for wall in WallId::ALL {
            let plane = bounds.wall_plane(wall.side());
            for corner in bounds.face_corners(wall) {
                assert_eq!(corner[wall.axis().index()], plane);
            }
        }
    }

    #[test]
    fn test_random_start_inside_range() {
        let bounds = BoxBounds::new(14.0, 1.5).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let state = SimulationState::random(bounds, 25.0, &mut rng);
            for axis in Axis::ALL {
                let p = state.ball.position[axis.index()];
                let v = state.ball.velocity[axis.index()];
                assert!((-12.5..=12.5).contains(&p));
                assert!((-25.0..=25.0).contains(&v));
            }
            assert!(state.ball.last_update.is_none());
        }
    }

    #[test]
    fn test_random_is_seeded() {
        let bounds = BoxBounds::new(14.0, 1.5).unwrap();
        let a = SimulationState::random(bounds, 25.0, &mut Pcg32::seed_from_u64(99));
        let b = SimulationState::random(bounds, 25.0, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
