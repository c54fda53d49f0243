/*!
Third-person character controller.

Composes the grounding state machine, the planar input mapper, and the portal teleport
around one rigid body and its capsule collider.

Tick contract
- The host calls [`ThirdPersonController::fixed_tick`] once per fixed step with the latest
  input sample and its scene query capability.
- The controller writes the desired world-space velocity into its rigid body. It never moves
  the body itself; the external integrator reads the velocity, integrates it, and hands the
  new pose back through [`ThirdPersonController::apply_integrated_pose`].
- [`ThirdPersonController::teleport`] is the one operation that writes the pose directly. It
  completes within the call, so no reader can observe the interrupted body.

Dependencies are injected once through [`ControllerBuilder`] and validated there.
*/

use log::{debug, error, trace};

use crate::{
    body::{CapsuleCollider, RigidBody, interrupt_rigid_body, return_rigid_body_properties},
    error::ControllerError,
    grounding::{VerticalPhase, VerticalState, advance_vertical, probe_ground},
    input::{InputSample, map_planar_input},
    layers::LayerMask,
    portal::{PortalFrame, PortalTriggers, remap_velocity},
    query::SceneQuery,
    settings::ControllerSettings,
    types::{Pose, Quat, Vec3},
};

/// Cursor behavior the host should apply when the controller starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMode {
    Locked,
    Free,
}

/// What one fixed tick decided.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerTick {
    pub phase: VerticalPhase,
    pub grounded: bool,
    /// World-space velocity handed to the integrator.
    pub velocity: Vec3,
}

/// Collects and validates the controller's dependencies.
#[derive(Clone, Debug, Default)]
pub struct ControllerBuilder {
    settings: ControllerSettings,
    rigid_body: Option<RigidBody>,
    collider: Option<CapsuleCollider>,
}

impl ControllerBuilder {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            rigid_body: None,
            collider: None,
        }
    }

    pub fn rigid_body(mut self, body: RigidBody) -> Self {
        self.rigid_body = Some(body);
        self
    }

    pub fn collider(mut self, collider: CapsuleCollider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Validate everything and build the controller.
    ///
    /// Failures are logged at `error` level before being returned; the host should not
    /// tick an entity whose controller failed to build.
    pub fn build(self) -> Result<ThirdPersonController, ControllerError> {
        self.try_build().inspect_err(|err| {
            error!("Third-person controller rejected at setup: {err}");
        })
    }

    fn try_build(self) -> Result<ThirdPersonController, ControllerError> {
        self.settings.validate()?;

        let body = self.rigid_body.ok_or(ControllerError::MissingRigidBody)?;
        let collider = self.collider.ok_or(ControllerError::MissingCollider)?;
        collider
            .validate()
            .map_err(ControllerError::InvalidCollider)?;

        Ok(ThirdPersonController {
            query_mask: LayerMask::all_except(self.settings.layer),
            settings: self.settings,
            body,
            collider,
            vertical: VerticalState::default(),
            local_velocity: Vec3::zeros(),
            triggers: PortalTriggers::default(),
        })
    }
}

/// Physics-driven third-person character controller.
#[derive(Clone, Debug)]
pub struct ThirdPersonController {
    settings: ControllerSettings,
    body: RigidBody,
    collider: CapsuleCollider,
    vertical: VerticalState,
    /// Last velocity computed in the character's local frame.
    local_velocity: Vec3,
    /// Layers the controller's own queries may hit.
    query_mask: LayerMask,
    triggers: PortalTriggers,
}

impl ThirdPersonController {
    pub fn builder(settings: ControllerSettings) -> ControllerBuilder {
        ControllerBuilder::new(settings)
    }

    /// Run one simulation step.
    pub fn fixed_tick(&mut self, input: &InputSample, query: &impl SceneQuery) -> ControllerTick {
        let pose = self.body.transform();
        let was_grounded = self.vertical.grounded;

        let grounded = probe_ground(
            query,
            &self.collider,
            &pose,
            &self.settings.ground_probe,
            self.query_mask,
        );

        let speed = if input.run {
            self.settings.running_speed
        } else {
            self.settings.walking_speed
        };
        let planar = map_planar_input(input.x, input.z, self.settings.input_deadzone, speed);

        let phase = advance_vertical(
            &mut self.vertical,
            grounded,
            input.wants_jump(),
            self.settings.jumping_speed,
            self.settings.gravity,
        );

        match phase {
            VerticalPhase::GroundedJustJumped => {
                debug!("Jump at {:?}", pose.translation);
            }
            VerticalPhase::GroundedIdle if !was_grounded => {
                debug!("Landed at {:?}", pose.translation);
            }
            VerticalPhase::Airborne if was_grounded => {
                debug!("Left ground at {:?}", pose.translation);
            }
            _ => {}
        }

        self.local_velocity = Vec3::new(planar.x, self.vertical.vertical_velocity, planar.z);
        let velocity = pose.transform_vector(self.local_velocity);
        self.body.velocity = velocity;

        trace!(
            "tick: grounded={grounded} phase={phase:?} local={:?} world={velocity:?}",
            self.local_velocity
        );

        ControllerTick {
            phase,
            grounded,
            velocity,
        }
    }

    /// Relocate the body through a portal pair.
    ///
    /// 1. Snapshot and zero the body's dynamic properties.
    /// 2. Place the body at `position` / `rotation`.
    /// 3. Carry the pre-teleport velocity from `from`'s frame into `to`'s frame.
    /// 4. Take the vertical velocity from the remapped velocity, in the new local frame.
    /// 5. Commit the transform, then restore the snapshot.
    pub fn teleport(
        &mut self,
        from: &PortalFrame,
        to: &PortalFrame,
        position: Vec3,
        rotation: Quat,
    ) {
        let velocity_before = self.body.velocity;
        let snapshot = interrupt_rigid_body(&mut self.body);

        self.body.set_position(position);
        self.body.set_rotation(rotation);

        let velocity = remap_velocity(from, to, velocity_before);
        self.body.velocity = velocity;

        let local = Pose::new(position, rotation).inverse_transform_vector(velocity);
        self.vertical.vertical_velocity = local.y;
        self.local_velocity = local;

        self.body.commit_transform();
        return_rigid_body_properties(&mut self.body, &snapshot);

        debug!(
            "Teleported to {position:?}, velocity {velocity_before:?} -> {velocity:?}"
        );
    }

    /// Accept the pose produced by the external integrator and publish it.
    pub fn apply_integrated_pose(&mut self, pose: Pose) {
        self.body.set_pose(pose);
        self.body.commit_transform();
    }

    /// Result of the most recent ground probe.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.vertical.grounded
    }

    #[inline]
    pub fn vertical_state(&self) -> VerticalState {
        self.vertical
    }

    #[inline]
    pub fn local_velocity(&self) -> Vec3 {
        self.local_velocity
    }

    pub fn cursor_mode(&self) -> CursorMode {
        if self.settings.lock_cursor {
            CursorMode::Locked
        } else {
            CursorMode::Free
        }
    }

    #[inline]
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    #[inline]
    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    #[inline]
    pub fn collider(&self) -> &CapsuleCollider {
        &self.collider
    }

    /// Published pose of the controlled body.
    #[inline]
    pub fn pose(&self) -> Pose {
        self.body.transform()
    }

    #[inline]
    pub fn query_mask(&self) -> LayerMask {
        self.query_mask
    }

    #[inline]
    pub fn triggers(&self) -> &PortalTriggers {
        &self.triggers
    }

    #[inline]
    pub fn triggers_mut(&mut self) -> &mut PortalTriggers {
        &mut self.triggers
    }
}
