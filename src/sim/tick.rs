//! Variable timestep integration
//!
//! Advances the ball by the wall-clock time since the previous frame and
//! resolves wall penetration one axis at a time.

use super::state::{Axis, CollisionEvent, Side, SimulationState};

/// Advance the ball to frame timestamp `now` (ms).
///
/// The first call only records the time origin. Calls whose timestamp is not
/// after the previous one are ignored entirely, including the stored
/// timestamp, so a jittery clock can't rewind the reference time.
///
/// Axes are integrated in x, y, z order. Each axis that left the legal range is
/// clamped to the boundary and its velocity reflected to point back inside,
/// producing one event per axis. A corner hit therefore yields several events
/// in the same tick, each bounced independently.
///
/// A very large step can carry the ball past a wall and back within one call;
/// only the final position is checked.
pub fn advance(state: &mut SimulationState, now: f64) -> Vec<CollisionEvent> {
    let Some(last) = state.ball.last_update else {
        state.ball.last_update = Some(now);
        return Vec::new();
    };

    let dt = (now - last) / 1000.0;
    // NaN lands here too
    if !(dt > 0.0) {
        return Vec::new();
    }

    let ball_min = state.bounds.ball_min();
    let ball_max = state.bounds.ball_max();
    let ball = &mut state.ball;
    let mut events = Vec::new();

    for axis in Axis::ALL {
        let i = axis.index();
        ball.position[i] += ball.velocity[i] * dt;

        let side = if ball.position[i] < ball_min {
            ball.position[i] = ball_min;
            ball.velocity[i] = ball.velocity[i].abs();
            Side::Low
        } else if ball.position[i] > ball_max {
            ball.position[i] = ball_max;
            ball.velocity[i] = -ball.velocity[i].abs();
            Side::High
        } else {
            continue;
        };

        events.push(CollisionEvent {
            axis,
            side,
            position: ball.position,
            time: now,
        });
    }

    ball.last_update = Some(now);
    events
}
