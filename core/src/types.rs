/*!
Core math aliases and pose types shared by the controller and camera modules.

This module intentionally contains no algorithms beyond frame conversions. It defines the
data exchanged between:
- the character controller (rigid-body pose, velocity)
- the portal teleport (source/destination frames)
- both camera variants (subject pose, camera pose)
- the scene query capability (world-space points and directions)

Conventions
- Units are meters and seconds.
- Right-handed, +Y up.
- A pose's local +Z axis is "forward"; cameras look along their local +Z.
*/

use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// A rigid transform (isometry) in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    #[inline]
    pub fn identity() -> Self {
        Self::from_translation(Vec3::zeros())
    }

    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::identity(),
        }
    }

    /// Convert to nalgebra `Isometry3` for use with Rapier scene queries.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(
            na::Translation3::new(self.translation.x, self.translation.y, self.translation.z),
            self.rotation,
        )
    }

    /// Local-space point to world space.
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * local
    }

    /// Local-space direction to world space (rotation only, no scale).
    #[inline]
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// World-space direction to this pose's local space.
    #[inline]
    pub fn inverse_transform_vector(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse_transform_vector(&world)
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }
}

/// Position plus the velocity memory used by [`crate::damping::smooth_damp`].
///
/// `velocity` is scratch state carried between ticks. Only the damping primitive should
/// write it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl MotionState {
    #[inline]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn default_pose_is_identity() {
        let pose = Pose::default();
        assert_eq!(pose.rotation, Quat::identity());
        assert_eq!(pose.translation, Vec3::zeros());
    }

    #[test]
    fn vector_round_trips_through_local_frame() {
        let pose = Pose::new(
            Vec3::new(3.0, -1.0, 7.0),
            Quat::from_axis_angle(&Vec3::y_axis(), 0.7),
        );
        let world = Vec3::new(1.0, 2.0, 3.0);

        let back = pose.transform_vector(pose.inverse_transform_vector(world));
        assert!((back - world).norm() < 1.0e-5);
    }

    #[test]
    fn quarter_turn_about_y_maps_forward_to_plus_x() {
        let pose = Pose::new(Vec3::zeros(), Quat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_2));
        let fwd = pose.forward();

        assert!((fwd - Vec3::x()).norm() < 1.0e-6);
        assert!((pose.up() - Vec3::y()).norm() < 1.0e-6);
    }
}
