//! Stand-in for the host physics step: moves the controlled capsule by its velocity with
//! Rapier's kinematic character controller.

use rapier3d::{
    control::{CharacterAutostep, CharacterLength, KinematicCharacterController},
    na::{Isometry3, Translation3},
    prelude::{Capsule, Collider, ColliderHandle, QueryFilter},
};
use third_person_core::{
    Pose, RapierQueryWorld, ThirdPersonController, rapier_world::collider_layers,
};

pub struct KinematicIntegrator {
    kcc: KinematicCharacterController,
}

impl Default for KinematicIntegrator {
    fn default() -> Self {
        Self {
            kcc: KinematicCharacterController {
                autostep: Some(CharacterAutostep {
                    include_dynamic_bodies: false,
                    max_height: CharacterLength::Relative(0.4),
                    ..CharacterAutostep::default()
                }),
                offset: CharacterLength::Relative(0.025),
                ..KinematicCharacterController::default()
            },
        }
    }
}

impl KinematicIntegrator {
    /// Integrate the controller's body velocity over `dt` and hand the pose back.
    pub fn step(&self, world: &RapierQueryWorld, controller: &mut ThirdPersonController, dt: f32) {
        let mask = controller.query_mask();
        let accepts = |_: ColliderHandle, co: &Collider| mask.accepts(collider_layers(co));
        let pipeline = world.query_pipeline(QueryFilter::new().predicate(&accepts));

        let body = controller.body();
        let pose = body.pose();
        let collider = controller.collider();

        let shape = Capsule::new_y(collider.half_height(), collider.radius);
        let shape_pos = Isometry3::from_parts(
            Translation3::from(collider.world_center(&pose)),
            pose.rotation,
        );

        let correction = self.kcc.move_shape(
            dt,
            &pipeline,
            &shape,
            &shape_pos,
            body.velocity * dt,
            |_| {},
        );

        let moved = Pose::new(pose.translation + correction.translation, pose.rotation);
        controller.apply_integrated_pose(moved);
    }
}
