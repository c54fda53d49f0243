//! Camera rigs: an occlusion-aware follow camera and a simpler orbit camera.
//!
//! Both run on the fixed tick, damp position with [`crate::damping::smooth_damp`], and blend
//! rotation toward the subject with [`crate::damping::turn_toward`].

pub mod clip;
pub mod follow;
pub mod occlusion;
pub mod orbit;

pub use clip::ClipProbeSet;
pub use follow::FollowCamera;
pub use occlusion::{OcclusionState, probe_occlusion};
pub use orbit::OrbitCamera;
