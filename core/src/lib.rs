pub mod body;
pub mod camera;
pub mod constants;
pub mod controller;
pub mod damping;
pub mod error;
pub mod grounding;
pub mod input;
pub mod layers;
pub mod portal;
pub mod query;
pub mod rapier_world;
pub mod schedule;
pub mod settings;
pub mod types;

#[cfg(test)]
mod test_support;

pub use body::{CapsuleCollider, RigidBody, RigidBodySnapshot};
pub use camera::{ClipProbeSet, FollowCamera, OcclusionState, OrbitCamera};
pub use controller::{ControllerBuilder, ControllerTick, CursorMode, ThirdPersonController};
pub use error::{ConfigError, ControllerError};
pub use grounding::{VerticalPhase, VerticalState};
pub use input::InputSample;
pub use layers::{CollisionLayer, LayerMask};
pub use portal::{PortalFrame, PortalTriggers, TriggerTag};
pub use query::{CapsuleCast, RayHit, SceneBounds, SceneQuery};
pub use rapier_world::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef};
pub use schedule::{FixedTimestep, InputLatch};
pub use settings::{
    CameraLens, ControllerSettings, FollowCameraSettings, GroundProbeSettings,
    OrbitCameraSettings,
};
pub use types::{MotionState, Pose, Quat, Vec3};
