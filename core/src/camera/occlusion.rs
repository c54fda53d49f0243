//! Subject-to-camera occlusion probing.
//!
//! Rays start at the subject and travel toward each clip probe, so a wall between viewer
//! and subject is found whichever side of it is thin.

use crate::{
    camera::clip::ClipProbeSet,
    constants::DIST_EPS,
    layers::LayerMask,
    query::SceneQuery,
    types::Vec3,
};

/// Occlusion derived from one tick's probe set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OcclusionState {
    /// At least one probe ray hit something before reaching its probe point.
    pub colliding: bool,
    /// Shortest hit distance across all probes, or 0 when nothing was hit.
    pub adjustment_distance: f32,
}

/// Cast one ray from `subject` to every probe point and summarize the hits.
///
/// Probe points that coincide with the subject are skipped.
pub fn probe_occlusion(
    query: &impl SceneQuery,
    subject: Vec3,
    probes: &ClipProbeSet,
    mask: LayerMask,
) -> OcclusionState {
    let nearest = probes
        .iter()
        .filter_map(|&point| {
            let delta = point - subject;
            let length = delta.norm();
            if length <= DIST_EPS {
                return None;
            }
            query.raycast(subject, delta / length, length, mask)
        })
        .map(|hit| hit.distance)
        .min_by(f32::total_cmp);

    match nearest {
        Some(distance) => OcclusionState {
            colliding: true,
            adjustment_distance: distance,
        },
        None => OcclusionState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layers::CollisionLayer,
        settings::CameraLens,
        test_support::{EmptyScene, WallAtZ},
        types::Quat,
    };

    fn probes_at(z: f32) -> ClipProbeSet {
        ClipProbeSet::at(Vec3::new(0.0, 0.0, z), Quat::identity(), &CameraLens::default())
    }

    #[test]
    fn clear_view_is_not_colliding() {
        let mask = LayerMask::all_except(CollisionLayer::Player);
        let state = probe_occlusion(&EmptyScene, Vec3::zeros(), &probes_at(-5.0), mask);

        assert_eq!(state, OcclusionState::default());
    }

    #[test]
    fn wall_behind_subject_occludes_and_reports_nearest_hit() {
        let mask = LayerMask::all_except(CollisionLayer::Player);
        let state = probe_occlusion(&WallAtZ { wall_z: -2.0 }, Vec3::zeros(), &probes_at(-5.0), mask);

        assert!(state.colliding);
        // The center probe lies straight behind the subject, so it hits first.
        assert!((state.adjustment_distance - 2.0).abs() < 1.0e-5);
    }

    #[test]
    fn wall_beyond_probes_does_not_occlude() {
        let mask = LayerMask::all();
        let state = probe_occlusion(&WallAtZ { wall_z: -8.0 }, Vec3::zeros(), &probes_at(-5.0), mask);

        assert!(!state.colliding);
        assert_eq!(state.adjustment_distance, 0.0);
    }

    #[test]
    fn probe_on_subject_is_skipped() {
        let state = probe_occlusion(
            &WallAtZ { wall_z: 0.0 },
            Vec3::zeros(),
            &ClipProbeSet {
                points: [Vec3::zeros(); 5],
            },
            LayerMask::all(),
        );

        assert!(!state.colliding);
    }
}
