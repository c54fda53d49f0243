/*!
Default tuning values.

These constants seed the `Default` impls in [`crate::settings`]. Hosts override them per
controller or per camera; nothing in the simulation reads them directly at tick time.

Notes
- Distances are in meters, time in seconds, angles in degrees unless the name says otherwise.
- Speeds are m/s. Gravity is a speed removed once per fixed tick, so its effect scales with
  the tick rate.
*/

/// Walking speed (m/s).
pub const DEFAULT_WALKING_SPEED: f32 = 3.0;

/// Running speed while the run modifier is held (m/s).
pub const DEFAULT_RUNNING_SPEED: f32 = 6.0;

/// Vertical speed removed every airborne fixed tick.
///
/// Integrated by the controller itself, not by the physics engine.
pub const DEFAULT_GRAVITY: f32 = 0.75;

/// Vertical speed assigned on the tick a grounded jump starts.
pub const DEFAULT_JUMPING_SPEED: f32 = 50.0;

/// Axis magnitudes at or below this value are treated as zero.
pub const DEFAULT_INPUT_DEADZONE: f32 = 0.1;

/// Downward distance swept by the ground probe (meters).
pub const GROUND_PROBE_DISTANCE: f32 = 0.85;

/// Ground probe radius as a fraction of the collider radius.
///
/// Slightly smaller than the collider so wall contact is not mistaken for ground.
pub const GROUND_PROBE_RADIUS_SCALE: f32 = 0.95;

/// Length of the ground probe capsule segment (meters).
///
/// Zero degenerates the capsule into a sphere sweep.
pub const GROUND_PROBE_SPAN: f32 = 0.0;

/// Position smoothing time for both camera variants (seconds).
pub const DEFAULT_CAMERA_SMOOTH_TIME: f32 = 0.05;

/// Angular closure rate for camera look-at blending (per second).
///
/// Multiplied by the tick delta and clamped to `[0, 1]` before the slerp. At 100/s and a
/// 0.02 s tick the blend factor saturates, so the camera snaps to its look-at each tick.
pub const DEFAULT_CAMERA_TURN_RATE: f32 = 100.0;

/// Default follow-camera offset in the subject's local frame (meters).
pub const DEFAULT_CAMERA_OFFSET: [f32; 3] = [0.0, 2.0, -5.0];

/// Default horizontal field of view (degrees).
pub const DEFAULT_FIELD_OF_VIEW_DEG: f32 = 60.0;

/// Default viewport aspect ratio (width / height).
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Default near clip distance (meters).
pub const DEFAULT_NEAR_CLIP: f32 = 0.3;

/// Extra planar distance between the subject and the orbit camera (meters).
pub const DEFAULT_ORBIT_DISTANCE: f32 = 10.0;

/// Orbit camera elevation above the subject's horizon (degrees).
pub const DEFAULT_ORBIT_ELEVATION_DEG: f32 = 20.0;

/// Fixed simulation step (seconds).
pub const FIXED_TIMESTEP: f32 = 0.02;

/// Maximum number of fixed ticks run for a single variable-rate frame.
///
/// Frames longer than `FIXED_TIMESTEP * MAX_STEPS_PER_FRAME` drop the excess instead of
/// spiralling.
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// Practical small distance for comparisons (meters).
pub const DIST_EPS: f32 = 1.0e-6;

/// Minimum smoothing time accepted by the damping primitive (seconds).
pub const MIN_SMOOTH_TIME: f32 = 1.0e-4;
