//! Scripted scene queries for unit tests.

use crate::{
    layers::LayerMask,
    query::{CapsuleCast, RayHit, SceneQuery},
    types::Vec3,
};

/// A scene with nothing in it.
pub struct EmptyScene;

impl SceneQuery for EmptyScene {
    fn raycast(&self, _: Vec3, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
        None
    }

    fn sweep_capsule(&self, _: CapsuleCast, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
        None
    }
}

/// Infinite wall on the plane `z = wall_z`. Sweeps never hit.
pub struct WallAtZ {
    pub wall_z: f32,
}

impl SceneQuery for WallAtZ {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        _: LayerMask,
    ) -> Option<RayHit> {
        if direction.z.abs() <= 1.0e-6 {
            return None;
        }
        let t = (self.wall_z - origin.z) / direction.z;
        (t >= 0.0 && t <= max_distance).then_some(RayHit {
            distance: t,
            normal: Vec3::z() * -direction.z.signum(),
        })
    }

    fn sweep_capsule(&self, _: CapsuleCast, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
        None
    }
}
