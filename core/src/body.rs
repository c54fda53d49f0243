/*!
Rigid body and collider resources owned by a controlled entity.

The physics integrator is external: it reads [`RigidBody::velocity`] after each controller
tick, integrates, and writes the resulting pose back. The controller writes the body
directly only during a portal teleport.

Two poses are kept:
- `pose`: the body's own pose as last written by the integrator or a teleport.
- `transform`: the pose scene queries and readers observe. It only follows `pose` when
  [`RigidBody::commit_transform`] runs, so an instantaneous pose change is published in one
  step.
*/

use crate::{
    error::{ConfigError, check},
    types::{Pose, Quat, Vec3},
};

/// Dynamic rigid-body state relevant to the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    pose: Pose,
    transform: Pose,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub drag: f32,
    pub angular_drag: f32,
    /// Principal moments of inertia.
    pub inertia_tensor: Vec3,
    /// Orientation of the principal inertia axes.
    pub inertia_tensor_rotation: Quat,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::at(Pose::identity())
    }
}

impl RigidBody {
    /// A resting body with unit inertia at `pose`.
    pub fn at(pose: Pose) -> Self {
        Self {
            pose,
            transform: pose,
            velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            drag: 0.0,
            angular_drag: 0.05,
            inertia_tensor: Vec3::new(1.0, 1.0, 1.0),
            inertia_tensor_rotation: Quat::identity(),
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Pose published to scene queries and readers.
    #[inline]
    pub fn transform(&self) -> Pose {
        self.transform
    }

    /// Overwrite the body pose. Not visible through [`Self::transform`] until committed.
    #[inline]
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.pose.translation = position;
    }

    #[inline]
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.pose.rotation = rotation;
    }

    /// Publish the body pose to the transform.
    #[inline]
    pub fn commit_transform(&mut self) {
        self.transform = self.pose;
    }

    /// Is the published transform out of date?
    #[inline]
    pub fn has_pending_transform(&self) -> bool {
        self.transform != self.pose
    }
}

/// Rotational and dynamic body properties saved across a teleport.
///
/// Velocity is deliberately absent: a teleport remaps it instead of restoring it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidBodySnapshot {
    pub angular_drag: f32,
    pub angular_velocity: Vec3,
    pub drag: f32,
    pub inertia_tensor: Vec3,
    pub inertia_tensor_rotation: Quat,
}

impl RigidBodySnapshot {
    pub fn capture(body: &RigidBody) -> Self {
        Self {
            angular_drag: body.angular_drag,
            angular_velocity: body.angular_velocity,
            drag: body.drag,
            inertia_tensor: body.inertia_tensor,
            inertia_tensor_rotation: body.inertia_tensor_rotation,
        }
    }

    pub fn restore(&self, body: &mut RigidBody) {
        body.angular_drag = self.angular_drag;
        body.angular_velocity = self.angular_velocity;
        body.drag = self.drag;
        body.inertia_tensor = self.inertia_tensor;
        body.inertia_tensor_rotation = self.inertia_tensor_rotation;
    }
}

/// Snapshot the body's dynamic properties, then zero them (velocity included).
///
/// This keeps the solver from injecting angular impulses while the pose jumps.
pub fn interrupt_rigid_body(body: &mut RigidBody) -> RigidBodySnapshot {
    let snapshot = RigidBodySnapshot::capture(body);

    body.angular_drag = 0.0;
    body.angular_velocity = Vec3::zeros();
    body.drag = 0.0;
    body.inertia_tensor = Vec3::zeros();
    body.inertia_tensor_rotation = Quat::identity();
    body.velocity = Vec3::zeros();

    snapshot
}

/// Restore everything [`interrupt_rigid_body`] zeroed, except velocity.
#[inline]
pub fn return_rigid_body_properties(body: &mut RigidBody, snapshot: &RigidBodySnapshot) {
    snapshot.restore(body);
}

/// Y-aligned capsule collider attached to the controlled body.
///
/// `height` is the full tip-to-tip height; `center` is the offset of the capsule center from
/// the body origin in the body's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleCollider {
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl CapsuleCollider {
    pub fn new(center: Vec3, radius: f32, height: f32) -> Self {
        Self {
            center,
            radius,
            height,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check::finite("collider.center.x", self.center.x)?;
        check::finite("collider.center.y", self.center.y)?;
        check::finite("collider.center.z", self.center.z)?;
        check::positive("collider.radius", self.radius)?;
        check::positive("collider.height", self.height)?;
        Ok(())
    }

    /// Collider center in world space for a body at `pose`.
    #[inline]
    pub fn world_center(&self, pose: &Pose) -> Vec3 {
        pose.transform_point(self.center)
    }

    /// Cylinder half-length: distance from the center to each cap sphere center.
    #[inline]
    pub fn half_height(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spinning_body() -> RigidBody {
        RigidBody {
            velocity: Vec3::new(1.0, 2.0, 3.0),
            angular_velocity: Vec3::new(0.3, -0.2, 0.9),
            drag: 0.4,
            angular_drag: 0.25,
            inertia_tensor: Vec3::new(2.0, 1.5, 2.0),
            inertia_tensor_rotation: Quat::from_axis_angle(&Vec3::x_axis(), 0.3),
            ..RigidBody::at(Pose::from_translation(Vec3::new(0.0, 1.0, 0.0)))
        }
    }

    #[test]
    fn interrupt_zeroes_dynamic_properties() {
        let mut body = spinning_body();
        let _snapshot = interrupt_rigid_body(&mut body);

        assert_eq!(body.angular_velocity, Vec3::zeros());
        assert_eq!(body.velocity, Vec3::zeros());
        assert_eq!(body.drag, 0.0);
        assert_eq!(body.angular_drag, 0.0);
        assert_eq!(body.inertia_tensor, Vec3::zeros());
        assert_eq!(body.inertia_tensor_rotation, Quat::identity());
    }

    #[test]
    fn interrupt_then_return_restores_snapshotted_fields_exactly() {
        let original = spinning_body();
        let mut body = original;

        let snapshot = interrupt_rigid_body(&mut body);
        return_rigid_body_properties(&mut body, &snapshot);

        assert_eq!(body.angular_drag, original.angular_drag);
        assert_eq!(body.angular_velocity, original.angular_velocity);
        assert_eq!(body.drag, original.drag);
        assert_eq!(body.inertia_tensor, original.inertia_tensor);
        assert_eq!(body.inertia_tensor_rotation, original.inertia_tensor_rotation);
        // Velocity is remapped by the teleport, never restored.
        assert_eq!(body.velocity, Vec3::zeros());
    }

    #[test]
    fn pose_changes_are_published_on_commit() {
        let mut body = RigidBody::default();
        body.set_position(Vec3::new(4.0, 0.0, 0.0));

        assert!(body.has_pending_transform());
        assert_eq!(body.transform().translation, Vec3::zeros());

        body.commit_transform();
        assert!(!body.has_pending_transform());
        assert_eq!(body.transform().translation, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn collider_half_height_never_negative() {
        let sphere_like = CapsuleCollider::new(Vec3::zeros(), 0.5, 0.8);
        assert_eq!(sphere_like.half_height(), 0.0);

        let tall = CapsuleCollider::new(Vec3::zeros(), 0.5, 2.0);
        assert!((tall.half_height() - 0.5).abs() < 1.0e-6);
    }
}
