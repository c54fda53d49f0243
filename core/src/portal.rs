//! Portal frames, velocity remapping, and portal trigger tracking.
//!
//! The portal-pair geometry (where a traveller lands, how frames are paired) is owned by an
//! external system. This module only needs the two frames to carry velocity across, and
//! records trigger contacts so that system can decide when to teleport.

use serde::{Deserialize, Serialize};

use crate::types::{Pose, Vec3};

/// World pose of one portal. Read-only to the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalFrame {
    pub pose: Pose,
}

impl PortalFrame {
    #[inline]
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }
}

/// Carry a world-space velocity through a portal pair.
///
/// The velocity is expressed in `from`'s local frame, then re-expressed from `to`'s local
/// frame. Speed is preserved; heading relative to each portal is preserved.
#[inline]
pub fn remap_velocity(from: &PortalFrame, to: &PortalFrame, velocity: Vec3) -> Vec3 {
    let local = from.pose.inverse_transform_vector(velocity);
    to.pose.transform_vector(local)
}

/// Tag of the trigger volume reported by the host's trigger callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerTag {
    Portal,
    Other,
}

/// Contact flags for portal trigger volumes.
///
/// Set by the host's trigger callbacks; read and cleared by the portal-pair system.
/// Non-portal triggers are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PortalTriggers {
    pub entered: bool,
    pub inside: bool,
    pub exited: bool,
}

impl PortalTriggers {
    pub fn on_trigger_enter(&mut self, tag: TriggerTag) {
        if tag == TriggerTag::Portal {
            self.entered = true;
        }
    }

    pub fn on_trigger_stay(&mut self, tag: TriggerTag) {
        if tag == TriggerTag::Portal {
            self.inside = true;
        }
    }

    pub fn on_trigger_exit(&mut self, tag: TriggerTag) {
        if tag == TriggerTag::Portal {
            self.inside = false;
            self.exited = true;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quat;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).norm() < 1.0e-5
    }

    #[test]
    fn facing_portals_turn_velocity_by_their_relative_yaw() {
        let a = PortalFrame::new(Pose::from_translation(Vec3::new(0.0, 0.0, 10.0)));
        let b = PortalFrame::new(Pose::new(
            Vec3::new(20.0, 0.0, 0.0),
            Quat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_2),
        ));

        let out = remap_velocity(&a, &b, Vec3::new(0.0, 0.0, 4.0));

        assert!(approx(out, Vec3::new(4.0, 0.0, 0.0)), "{out:?}");
    }

    #[test]
    fn remap_preserves_speed() {
        let a = PortalFrame::new(Pose::new(
            Vec3::zeros(),
            Quat::from_euler_angles(0.2, 1.1, -0.4),
        ));
        let b = PortalFrame::new(Pose::new(
            Vec3::new(3.0, 1.0, 0.0),
            Quat::from_euler_angles(-0.7, 0.3, 2.0),
        ));
        let v = Vec3::new(1.0, -2.0, 0.5);

        assert!((remap_velocity(&a, &b, v).norm() - v.norm()).abs() < 1.0e-5);
    }

    #[test]
    fn remap_there_and_back_is_identity() {
        let a = PortalFrame::new(Pose::new(
            Vec3::new(-4.0, 0.0, 2.0),
            Quat::from_axis_angle(&Vec3::y_axis(), 0.8),
        ));
        let b = PortalFrame::new(Pose::new(
            Vec3::new(9.0, 3.0, -1.0),
            Quat::from_euler_angles(0.1, -2.4, 0.0),
        ));
        let v = Vec3::new(2.0, 5.0, -1.5);

        let back = remap_velocity(&b, &a, remap_velocity(&a, &b, v));
        assert!(approx(back, v));
    }

    #[test]
    fn only_portal_triggers_set_flags() {
        let mut triggers = PortalTriggers::default();

        triggers.on_trigger_enter(TriggerTag::Other);
        triggers.on_trigger_stay(TriggerTag::Other);
        triggers.on_trigger_exit(TriggerTag::Other);
        assert_eq!(triggers, PortalTriggers::default());

        triggers.on_trigger_enter(TriggerTag::Portal);
        triggers.on_trigger_stay(TriggerTag::Portal);
        assert!(triggers.entered && triggers.inside && !triggers.exited);

        triggers.on_trigger_exit(TriggerTag::Portal);
        assert!(triggers.entered && !triggers.inside && triggers.exited);

        triggers.clear();
        assert_eq!(triggers, PortalTriggers::default());
    }
}
