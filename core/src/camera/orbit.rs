/*!
Orbit camera around a static landmark.

The camera sits on the far side of the subject as seen from the landmark's bounds center,
`distance` further out, raised by `elevation_deg` as seen from that center. It damps toward
that spot and blends its rotation toward the subject.

No occlusion handling: the landmark is assumed to be the only large object and the camera
always sits outside it.
*/

use log::trace;

use crate::{
    constants::DIST_EPS,
    damping::{look_rotation, smooth_damp, turn_toward},
    error::ConfigError,
    query::SceneBounds,
    settings::OrbitCameraSettings,
    types::{MotionState, Pose, Quat, Vec3},
};

#[derive(Clone, Debug)]
pub struct OrbitCamera {
    settings: OrbitCameraSettings,
    motion: MotionState,
    rotation: Quat,
    /// Last valid planar direction from the bounds center to the subject.
    planar_dir: Vec3,
    target_position: Vec3,
}

impl OrbitCamera {
    pub fn new(settings: OrbitCameraSettings, initial: Pose) -> Result<Self, ConfigError> {
        settings.validate()?;

        Ok(Self {
            settings,
            motion: MotionState::at(initial.translation),
            rotation: initial.rotation,
            planar_dir: -Vec3::z(),
            target_position: initial.translation,
        })
    }

    /// Advance one fixed tick and return the new camera pose.
    pub fn fixed_tick(&mut self, subject: Vec3, bounds: &impl SceneBounds, dt: f32) -> Pose {
        let center = bounds.bounds_center();
        let (target, dir) = orbit_target(subject, center, self.planar_dir, &self.settings);
        self.planar_dir = dir;
        self.target_position = target;

        self.motion.position = smooth_damp(
            self.motion.position,
            target,
            &mut self.motion.velocity,
            self.settings.smooth_time,
            dt,
        );

        if let Some(look) = look_rotation(subject - self.motion.position, Vec3::y()) {
            self.rotation = turn_toward(self.rotation, look, self.settings.turn_rate, dt);
        }

        trace!("orbit camera: target={target:?} pos={:?}", self.motion.position);

        self.pose()
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::new(self.motion.position, self.rotation)
    }

    #[inline]
    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }
}

/// Camera target for `subject` orbiting `center`, plus the planar direction used.
///
/// `fallback_dir` is used when the subject is on the center's vertical axis.
pub fn orbit_target(
    subject: Vec3,
    center: Vec3,
    fallback_dir: Vec3,
    settings: &OrbitCameraSettings,
) -> (Vec3, Vec3) {
    let planar = Vec3::new(subject.x - center.x, 0.0, subject.z - center.z);
    let radius = planar.norm();
    let dir = if radius > DIST_EPS {
        planar / radius
    } else {
        fallback_dir
    };

    let dist = radius + settings.distance;
    let height = dist * settings.elevation_deg.to_radians().tan();

    let target = Vec3::new(
        center.x + dir.x * dist,
        subject.y + height,
        center.z + dir.z * dist,
    );
    (target, dir)
}
