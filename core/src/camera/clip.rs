//! Near-plane probe points for occlusion tests.

use crate::{
    settings::CameraLens,
    types::{Quat, Vec3},
};

/// Index of each point in [`ClipProbeSet::points`].
pub const TOP_LEFT: usize = 0;
pub const TOP_RIGHT: usize = 1;
pub const BOTTOM_LEFT: usize = 2;
pub const BOTTOM_RIGHT: usize = 3;
pub const CENTER: usize = 4;

/// Four near-plane corners plus the camera center, for one candidate camera pose.
///
/// Regenerated every tick; never carried across ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipProbeSet {
    pub points: [Vec3; 5],
}

impl ClipProbeSet {
    /// Probe points for a camera at `position` looking along `rotation * +Z`.
    ///
    /// Corner offsets in camera space are `(±x, ±y, near_clip)` with
    /// `x = tan(fov / 2) * near_clip` and `y = x / aspect`.
    pub fn at(position: Vec3, rotation: Quat, lens: &CameraLens) -> Self {
        let (x, y) = near_plane_half_extents(lens);
        let z = lens.near_clip;

        let corner = |cx: f32, cy: f32| position + rotation * Vec3::new(cx, cy, z);

        Self {
            points: [
                corner(-x, y),
                corner(x, y),
                corner(-x, -y),
                corner(x, -y),
                position,
            ],
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Vec3> {
        self.points.iter()
    }
}

/// Half width and half height of the near plane.
#[inline]
pub fn near_plane_half_extents(lens: &CameraLens) -> (f32, f32) {
    let half_fov = lens.field_of_view_deg.to_radians() * 0.5;
    let x = half_fov.tan() * lens.near_clip;
    (x, x / lens.aspect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn lens() -> CameraLens {
        CameraLens {
            field_of_view_deg: 90.0,
            aspect: 2.0,
            near_clip: 0.5,
        }
    }

    #[test]
    fn half_extents_use_radians() {
        let (x, y) = near_plane_half_extents(&lens());

        // tan(45deg) * 0.5
        assert!((x - 0.5).abs() < 1.0e-6);
        assert!((y - 0.25).abs() < 1.0e-6);
    }

    #[test]
    fn identity_pose_lays_out_corners_then_center() {
        let pos = Vec3::new(1.0, 2.0, 3.0);
        let set = ClipProbeSet::at(pos, Quat::identity(), &lens());

        assert_eq!(set.points[TOP_LEFT], pos + Vec3::new(-0.5, 0.25, 0.5));
        assert_eq!(set.points[TOP_RIGHT], pos + Vec3::new(0.5, 0.25, 0.5));
        assert_eq!(set.points[BOTTOM_LEFT], pos + Vec3::new(-0.5, -0.25, 0.5));
        assert_eq!(set.points[BOTTOM_RIGHT], pos + Vec3::new(0.5, -0.25, 0.5));
        assert_eq!(set.points[CENTER], pos);
    }

    #[test]
    fn corners_follow_camera_rotation() {
        let yaw = Quat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_2);
        let set = ClipProbeSet::at(Vec3::zeros(), yaw, &lens());

        // Camera looks along world +X; its right (+X local) becomes world -Z.
        let top_right = set.points[TOP_RIGHT];
        assert!((top_right - Vec3::new(0.5, 0.25, -0.5)).norm() < 1.0e-5);
        assert_eq!(set.iter().count(), 5);
    }
}
