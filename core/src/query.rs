/*!
Scene query capabilities the simulation consumes.

The host owns collision geometry and answers synchronous queries against it. The core never
mutates the scene. A miss is a normal outcome (not grounded, not occluded), never an error.

[`crate::rapier_world::RapierQueryWorld`] implements [`SceneQuery`] for static geometry.
*/

use crate::{layers::LayerMask, types::Vec3};

/// A capsule to sweep: the segment `a..b` inflated by `radius`.
///
/// `a == b` degenerates into a sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleCast {
    pub a: Vec3,
    pub b: Vec3,
    pub radius: f32,
}

impl CapsuleCast {
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.a + self.b) * 0.5
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        (self.b - self.a).norm() * 0.5
    }
}

/// Nearest hit of a ray or sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance travelled along the (unit) direction before the hit (meters).
    pub distance: f32,
    /// World-space surface normal at the hit.
    pub normal: Vec3,
}

/// Synchronous collision queries against the host's scene.
///
/// `direction` arguments are expected to be unit length. Implementations must only report
/// colliders whose layer memberships are accepted by `mask`.
pub trait SceneQuery {
    /// Cast a ray and return the nearest hit within `max_distance`.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask)
    -> Option<RayHit>;

    /// Sweep a capsule and return the nearest hit within `max_distance`.
    fn sweep_capsule(
        &self,
        capsule: CapsuleCast,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        (**self).raycast(origin, direction, max_distance, mask)
    }

    fn sweep_capsule(
        &self,
        capsule: CapsuleCast,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        (**self).sweep_capsule(capsule, direction, max_distance, mask)
    }
}

/// Provides the center of a scene object's bounding volume (used by the orbit camera).
pub trait SceneBounds {
    fn bounds_center(&self) -> Vec3;
}

/// A fixed point is its own bounds center.
impl SceneBounds for Vec3 {
    #[inline]
    fn bounds_center(&self) -> Vec3 {
        *self
    }
}
