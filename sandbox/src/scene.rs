//! Static test level: a floor, a low wall behind the spawn point, a tower, and one portal pair.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use third_person_core::{
    CollisionLayer, ColliderShapeDef, LayerMask, PortalFrame, Pose, Quat, Vec3, WorldStaticDef,
};

pub const FLOOR_ID: u32 = 1;
pub const WALL_ID: u32 = 2;
pub const TOWER_ID: u32 = 3;

/// Distance from the entry portal center at which a traveller is sent through.
pub const PORTAL_RADIUS: f32 = 1.0;

pub fn world_defs() -> Vec<WorldStaticDef> {
    let environment = LayerMask::only(CollisionLayer::Environment);

    vec![
        WorldStaticDef {
            id: FLOOR_ID,
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
            layers: environment,
        },
        // Sits between the spawn point and the follow camera's ideal position.
        WorldStaticDef {
            id: WALL_ID,
            translation: Vector3::new(0.0, 1.5, -3.0),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(4.0, 1.5, 0.25),
            },
            layers: environment,
        },
        WorldStaticDef {
            id: TOWER_ID,
            translation: Vector3::new(12.0, 10.0, 6.0),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(3.0, 10.0, 3.0),
            },
            layers: environment,
        },
    ]
}

/// An entry/exit portal pair.
#[derive(Clone, Copy, Debug)]
pub struct PortalPair {
    pub entry: PortalFrame,
    pub exit: PortalFrame,
}

impl PortalPair {
    pub fn level() -> Self {
        Self {
            entry: PortalFrame::new(Pose::from_translation(Vec3::new(0.0, 1.0, 14.0))),
            exit: PortalFrame::new(Pose::new(
                Vec3::new(-30.0, 1.0, 0.0),
                Quat::from_axis_angle(&Vec3::y_axis(), -std::f32::consts::FRAC_PI_2),
            )),
        }
    }

    pub fn is_touching_entry(&self, position: Vec3) -> bool {
        (position - self.entry.pose.translation).norm() <= PORTAL_RADIUS
    }

    /// Map a traveller pose from the entry frame to the exit frame.
    pub fn carry(&self, pose: Pose) -> Pose {
        let relative = self.exit.pose.iso() * self.entry.pose.iso().inverse();
        let translation = relative.transform_point(&Point3::from(pose.translation)).coords;
        Pose::new(translation, relative.rotation * pose.rotation)
    }
}
