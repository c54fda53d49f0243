/*!
Occlusion-aware follow camera.

Per fixed tick:
1. The ideal position is the configured offset in the subject's local frame.
2. Clip probes are built at the ideal position with the camera's current rotation.
3. Rays from the subject to each probe (ignoring the subject's layer) decide whether the view
   is occluded and how far the nearest obstruction is.
4. The camera damps toward the ideal position, or toward a pulled-in position when occluded.
5. The rotation always blends toward looking at the subject.
*/

use log::{debug, trace};

use crate::{
    camera::{
        clip::ClipProbeSet,
        occlusion::{OcclusionState, probe_occlusion},
    },
    constants::DIST_EPS,
    damping::{look_rotation, smooth_damp, turn_toward},
    error::ConfigError,
    layers::LayerMask,
    query::SceneQuery,
    settings::{CameraLens, FollowCameraSettings},
    types::{MotionState, Pose, Quat, Vec3},
};

#[derive(Clone, Debug)]
pub struct FollowCamera {
    settings: FollowCameraSettings,
    motion: MotionState,
    rotation: Quat,
    occlusion: OcclusionState,
    target_position: Vec3,
    query_mask: LayerMask,
}

impl FollowCamera {
    pub fn new(settings: FollowCameraSettings, initial: Pose) -> Result<Self, ConfigError> {
        settings.validate()?;

        Ok(Self {
            query_mask: LayerMask::all_except(settings.subject_layer),
            settings,
            motion: MotionState::at(initial.translation),
            rotation: initial.rotation,
            occlusion: OcclusionState::default(),
            target_position: initial.translation,
        })
    }

    /// Advance one fixed tick and return the new camera pose.
    pub fn fixed_tick(&mut self, subject: &Pose, query: &impl SceneQuery, dt: f32) -> Pose {
        self.target_position = subject.transform_point(self.settings.offset);

        let probes = ClipProbeSet::at(self.target_position, self.rotation, &self.settings.lens);
        let occlusion = probe_occlusion(query, subject.translation, &probes, self.query_mask);

        if occlusion.colliding != self.occlusion.colliding {
            if occlusion.colliding {
                debug!(
                    "Camera occluded, pulling in to {:.3}",
                    occlusion.adjustment_distance
                );
            } else {
                debug!("Camera view clear");
            }
        }
        self.occlusion = occlusion;

        let goal = if occlusion.colliding {
            pulled_in_position(subject, self.settings.offset, occlusion.adjustment_distance)
        } else {
            self.target_position
        };

        self.motion.position = smooth_damp(
            self.motion.position,
            goal,
            &mut self.motion.velocity,
            self.settings.smooth_time,
            dt,
        );

        if let Some(look) = look_rotation(subject.translation - self.motion.position, Vec3::y()) {
            self.rotation = turn_toward(self.rotation, look, self.settings.turn_rate, dt);
        }

        trace!(
            "follow camera: goal={goal:?} pos={:?} occluded={}",
            self.motion.position, occlusion.colliding
        );

        self.pose()
    }

    /// Replace the lens, e.g. after the viewport is resized.
    pub fn set_lens(&mut self, lens: CameraLens) -> Result<(), ConfigError> {
        lens.validate()?;
        self.settings.lens = lens;
        Ok(())
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::new(self.motion.position, self.rotation)
    }

    #[inline]
    pub fn occlusion(&self) -> OcclusionState {
        self.occlusion
    }

    /// Ideal (unoccluded) position computed on the last tick.
    #[inline]
    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    #[inline]
    pub fn settings(&self) -> &FollowCameraSettings {
        &self.settings
    }
}

/// Camera position pulled in to `distance` from the subject along the offset direction.
///
/// `distance` is a ray length measured from the subject, so the camera lands on the nearest
/// obstruction's side of the subject while keeping the offset's height-to-depth ratio.
pub fn pulled_in_position(subject: &Pose, offset: Vec3, distance: f32) -> Vec3 {
    let local = offset
        .try_normalize(DIST_EPS)
        .map(|dir| dir * distance)
        .unwrap_or_else(Vec3::zeros);

    subject.transform_point(local)
}
