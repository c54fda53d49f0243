/*!
Frame-rate independent smoothing shared by both camera variants.

Two separate primitives:
- [`smooth_damp`]: critically damped spring for positions. Carries a velocity memory cell
  between calls and never overshoots the target.
- [`turn_toward`]: proportional turn-rate blend for orientations,
  `slerp(current, target, rate * dt)`. Not a spring; `rate` is a closure speed per second.
*/

use nalgebra as na;

use crate::{
    constants::{DIST_EPS, MIN_SMOOTH_TIME},
    types::{Quat, Vec3},
};

/// Move `current` toward `target` with a critically damped spring.
///
/// - `velocity` is read and updated; keep it alongside the damped value between calls.
/// - `smooth_time` is roughly the time to reach the target. It is clamped to
///   [`MIN_SMOOTH_TIME`], so very small values snap without dividing by zero.
/// - `dt <= 0` returns `current` unchanged.
///
/// The exponential decay uses the rational approximation
/// `1 / (1 + x + 0.48x² + 0.235x³)`, which stays stable for large `dt`. If the result would
/// pass the target it is clamped there and the velocity memory is cleared.
pub fn smooth_damp(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + change * omega) * dt;
    *velocity = (*velocity - temp * omega) * decay;

    let mut output = target + (change + temp) * decay;

    // Clamp overshoot: output moved past the target along the initial approach direction.
    let to_target = target - current;
    if to_target.dot(&(output - target)) > 0.0 {
        output = target;
        *velocity = Vec3::zeros();
    }

    output
}

/// Blend `current` toward `target` at `rate` per second.
///
/// The interpolation factor is `clamp(rate * dt, 0, 1)`. When the two orientations are
/// opposite (slerp undefined) the result snaps to `target`.
#[inline]
pub fn turn_toward(current: Quat, target: Quat, rate: f32, dt: f32) -> Quat {
    let t = (rate * dt).clamp(0.0, 1.0);
    if t >= 1.0 {
        return target;
    }
    if t <= 0.0 {
        return current;
    }

    current.try_slerp(&target, t, 1.0e-6).unwrap_or(target)
}

/// Orientation whose local +Z points along `dir` with local +Y as close to `up` as possible.
///
/// Returns `None` for a zero-length `dir`. If `dir` is parallel to `up`, world +Z is used as
/// the fallback up axis.
pub fn look_rotation(dir: Vec3, up: Vec3) -> Option<Quat> {
    if dir.norm_squared() <= DIST_EPS * DIST_EPS {
        return None;
    }

    let dir = dir.normalize();
    let up = if dir.cross(&up).norm_squared() <= DIST_EPS * DIST_EPS {
        Vec3::z()
    } else {
        up
    };

    Some(na::UnitQuaternion::face_towards(&dir, &up))
}
