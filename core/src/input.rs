use log::warn;

use crate::types::Vec3;

/// One tick's worth of already-sampled input.
///
/// - `x`: strafe axis in `[-1, 1]` (right is positive).
/// - `y`: jump axis, tri-state `-1 / 0 / 1`; only positive values request a jump.
/// - `z`: forward axis in `[-1, 1]`.
/// - `run`: run modifier held.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub run: bool,
}

impl InputSample {
    /// Build a sample from raw host values.
    ///
    /// Non-finite axes become 0, planar axes are clamped to `[-1, 1]`, and the jump axis is
    /// reduced to its sign.
    pub fn from_raw(x: f32, jump: f32, z: f32, run: bool) -> Self {
        let jump = sanitize_axis("jump", jump);
        Self {
            x: sanitize_axis("x", x),
            y: if jump == 0.0 { 0.0 } else { jump.signum() },
            z: sanitize_axis("z", z),
            run,
        }
    }

    #[inline]
    pub fn wants_jump(&self) -> bool {
        self.y > 0.0
    }
}

fn sanitize_axis(name: &str, value: f32) -> f32 {
    if !value.is_finite() {
        warn!("Discarding non-finite {name} axis value {value}");
        return 0.0;
    }
    value.clamp(-1.0, 1.0)
}

/// Zero `value` if its magnitude is within the deadzone.
#[inline]
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() > deadzone { value } else { 0.0 }
}

/// Map planar input to a local-space velocity.
///
/// Each axis is deadzone-filtered independently, then the 2D vector is normalized and scaled
/// by `speed`. Diagonal input therefore has the same magnitude as axis-aligned input. An
/// all-zero vector short-circuits to zero instead of being normalized.
///
/// The result is in the character's local frame with `y == 0`.
pub fn map_planar_input(x: f32, z: f32, deadzone: f32, speed: f32) -> Vec3 {
    let x = apply_deadzone(x, deadzone);
    let z = apply_deadzone(z, deadzone);

    if x == 0.0 && z == 0.0 {
        return Vec3::zeros();
    }

    let dir = Vec3::new(x, 0.0, z).normalize();
    dir * speed
}
