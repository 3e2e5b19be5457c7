//! Timed position interpolation
//!
//! Each call eases from the *current* position toward the target by the
//! smoothstep of the elapsed fraction, so motion decelerates into the target.
//! Arrival is decided by distance, and once the duration has run out the
//! position snaps to the target, so a move always lands within one tick of
//! its duration. An arrived move always reports the exact target position.

use glam::Vec3;

use crate::consts::ARRIVAL_EPSILON;
use crate::smoothstep;

/// Result of advancing a move by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveStep {
    pub position: Vec3,
    /// Elapsed time to carry into the next tick (reset to 0 on arrival)
    pub elapsed: f32,
    pub arrived: bool,
}

/// Advance a move from `current` toward `target` by one tick of `dt`
pub fn advance(current: Vec3, target: Vec3, duration: f32, elapsed: f32, dt: f32) -> MoveStep {
    let (position, elapsed) = if duration.is_finite() && elapsed < duration {
        let t = smoothstep((elapsed / duration).clamp(0.0, 1.0));
        (current.lerp(target, t), elapsed + dt)
    } else {
        (target, elapsed)
    };

    let arrived = position.distance(target) <= ARRIVAL_EPSILON;
    MoveStep {
        position: if arrived { target } else { position },
        elapsed: if arrived { 0.0 } else { elapsed },
        arrived,
    }
}
