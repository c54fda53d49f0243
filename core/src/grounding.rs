//! Grounding probe and vertical motion state machine.
//!
//! Every tick the controller:
//! 1. Recomputes `grounded` from a fresh downward capsule sweep ([`probe_ground`]). Nothing
//!    from the previous tick is trusted.
//! 2. Advances the vertical velocity with [`advance_vertical`]:
//!    - grounded + jump input  -> `jumping_speed` ([`VerticalPhase::GroundedJustJumped`])
//!    - grounded, no jump      -> 0 ([`VerticalPhase::GroundedIdle`])
//!    - airborne               -> `velocity -= gravity` ([`VerticalPhase::Airborne`])
//!
//! There is no jump buffering and no coyote time: a jump pressed on a tick where the sweep
//! does not confirm ground is dropped.

use crate::{
    body::CapsuleCollider,
    layers::LayerMask,
    query::{CapsuleCast, SceneQuery},
    settings::GroundProbeSettings,
    types::{Pose, Vec3},
};

/// Result of the vertical state machine for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalPhase {
    Airborne,
    GroundedIdle,
    /// Transient: lasts exactly the tick the jump impulse is applied.
    GroundedJustJumped,
}

impl VerticalPhase {
    #[inline]
    pub fn is_grounded(self) -> bool {
        !matches!(self, VerticalPhase::Airborne)
    }
}

/// Vertical motion state persisted across ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VerticalState {
    /// Result of the most recent ground probe.
    pub grounded: bool,
    /// Vertical speed; persists across ticks and is only zeroed by a landing without jump.
    pub vertical_velocity: f32,
}

/// Build the downward probe capsule for a collider at `pose`.
///
/// The segment is centered on the collider's world center, spans `settings.span` along
/// world up, and uses `collider.radius * settings.radius_scale` so side contact with walls
/// does not register as ground.
pub fn ground_probe_capsule(
    collider: &CapsuleCollider,
    pose: &Pose,
    settings: &GroundProbeSettings,
) -> CapsuleCast {
    let center = collider.world_center(pose);
    let half_span = Vec3::y() * (settings.span * 0.5);

    CapsuleCast {
        a: center - half_span,
        b: center + half_span,
        radius: collider.radius * settings.radius_scale,
    }
}

/// Sweep the probe capsule downward and report whether anything was hit.
pub fn probe_ground(
    query: &impl SceneQuery,
    collider: &CapsuleCollider,
    pose: &Pose,
    settings: &GroundProbeSettings,
    mask: LayerMask,
) -> bool {
    let capsule = ground_probe_capsule(collider, pose, settings);
    query
        .sweep_capsule(capsule, -Vec3::y(), settings.distance, mask)
        .is_some()
}

/// Advance vertical motion for one tick given this tick's fresh `grounded` flag.
pub fn advance_vertical(
    state: &mut VerticalState,
    grounded: bool,
    wants_jump: bool,
    jumping_speed: f32,
    gravity: f32,
) -> VerticalPhase {
    state.grounded = grounded;

    match (grounded, wants_jump) {
        (true, true) => {
            state.vertical_velocity = jumping_speed;
            VerticalPhase::GroundedJustJumped
        }
        (true, false) => {
            state.vertical_velocity = 0.0;
            VerticalPhase::GroundedIdle
        }
        (false, _) => {
            state.vertical_velocity -= gravity;
            VerticalPhase::Airborne
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layers::CollisionLayer, query::RayHit};
    use std::cell::{Cell, RefCell};

    /// Returns a fixed sweep result and records the last sweep request.
    struct FixedSweep {
        hit: bool,
        last: RefCell<Option<(CapsuleCast, Vec3, f32, LayerMask)>>,
        calls: Cell<u32>,
    }

    impl FixedSweep {
        fn new(hit: bool) -> Self {
            Self {
                hit,
                last: RefCell::new(None),
                calls: Cell::new(0),
            }
        }
    }

    impl SceneQuery for FixedSweep {
        fn raycast(&self, _: Vec3, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
            None
        }

        fn sweep_capsule(
            &self,
            capsule: CapsuleCast,
            direction: Vec3,
            max_distance: f32,
            mask: LayerMask,
        ) -> Option<RayHit> {
            self.calls.set(self.calls.get() + 1);
            *self.last.borrow_mut() = Some((capsule, direction, max_distance, mask));
            self.hit.then_some(RayHit {
                distance: 0.1,
                normal: Vec3::y(),
            })
        }
    }

    fn collider() -> CapsuleCollider {
        CapsuleCollider::new(Vec3::new(0.0, 1.0, 0.0), 0.5, 2.0)
    }

    #[test]
    fn any_hit_means_grounded() {
        let mask = LayerMask::all_except(CollisionLayer::Player);
        let settings = GroundProbeSettings::default();
        let pose = Pose::from_translation(Vec3::new(2.0, 0.0, 3.0));

        assert!(probe_ground(&FixedSweep::new(true), &collider(), &pose, &settings, mask));
        assert!(!probe_ground(&FixedSweep::new(false), &collider(), &pose, &settings, mask));
    }

    #[test]
    fn probe_uses_scaled_radius_down_direction_and_distance() {
        let query = FixedSweep::new(true);
        let mask = LayerMask::all_except(CollisionLayer::Player);
        let settings = GroundProbeSettings::default();
        let pose = Pose::from_translation(Vec3::new(2.0, 0.0, 3.0));

        probe_ground(&query, &collider(), &pose, &settings, mask);

        let (capsule, dir, dist, used_mask) = query.last.borrow().expect("sweep was issued");
        assert_eq!(query.calls.get(), 1);
        assert!((capsule.radius - 0.475).abs() < 1.0e-6);
        assert_eq!(capsule.a, capsule.b, "default probe is a sphere");
        assert_eq!(capsule.center(), Vec3::new(2.0, 1.0, 3.0));
        assert_eq!(dir, -Vec3::y());
        assert_eq!(dist, 0.85);
        assert_eq!(used_mask, mask);
    }

    #[test]
    fn probe_span_extends_segment_symmetrically() {
        let settings = GroundProbeSettings {
            span: 1.0,
            ..GroundProbeSettings::default()
        };
        let capsule = ground_probe_capsule(&collider(), &Pose::identity(), &settings);

        assert_eq!(capsule.a, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(capsule.b, Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn grounded_jump_sets_jumping_speed_exactly() {
        let mut state = VerticalState {
            grounded: true,
            vertical_velocity: -3.0,
        };

        let phase = advance_vertical(&mut state, true, true, 50.0, 0.75);

        assert_eq!(phase, VerticalPhase::GroundedJustJumped);
        assert_eq!(state.vertical_velocity, 50.0);
    }

    #[test]
    fn grounded_without_jump_clears_residual_velocity() {
        let mut state = VerticalState {
            grounded: false,
            vertical_velocity: -12.5,
        };

        let phase = advance_vertical(&mut state, true, false, 50.0, 0.75);

        assert_eq!(phase, VerticalPhase::GroundedIdle);
        assert_eq!(state.vertical_velocity, 0.0);
        assert!(state.grounded);
    }

    #[test]
    fn downward_jump_axis_on_ground_rests() {
        let sample = crate::input::InputSample::from_raw(0.0, -1.0, 0.0, false);
        let mut state = VerticalState {
            grounded: true,
            vertical_velocity: 0.0,
        };

        for _ in 0..3 {
            let phase = advance_vertical(&mut state, true, sample.wants_jump(), 50.0, 0.75);
            assert_eq!(phase, VerticalPhase::GroundedIdle);
            assert_eq!(state.vertical_velocity, 0.0);
        }
    }

    #[test]
    fn airborne_loses_exactly_gravity_per_tick() {
        let mut state = VerticalState {
            grounded: false,
            vertical_velocity: 50.0,
        };

        let expected = [49.25_f32, 48.5, 47.75, 47.0];
        for want in expected {
            let phase = advance_vertical(&mut state, false, false, 50.0, 0.75);
            assert_eq!(phase, VerticalPhase::Airborne);
            assert_eq!(state.vertical_velocity, want);
        }
    }

    #[test]
    fn jump_input_while_airborne_is_ignored() {
        let mut state = VerticalState {
            grounded: false,
            vertical_velocity: 1.0,
        };

        let phase = advance_vertical(&mut state, false, true, 50.0, 0.75);

        assert_eq!(phase, VerticalPhase::Airborne);
        assert_eq!(state.vertical_velocity, 0.25);
    }
}
