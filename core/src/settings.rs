/*!
Configuration surface for the controller and both camera variants.

All values are process-resident tuning parameters. Each struct:
- defaults to the values in [`crate::constants`],
- deserializes from partial data (`#[serde(default)]`), so hosts can override single fields,
- exposes `validate()`, which constructors call before accepting the settings.
*/

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_ASPECT, DEFAULT_CAMERA_OFFSET, DEFAULT_CAMERA_SMOOTH_TIME,
        DEFAULT_CAMERA_TURN_RATE, DEFAULT_FIELD_OF_VIEW_DEG, DEFAULT_GRAVITY,
        DEFAULT_INPUT_DEADZONE, DEFAULT_JUMPING_SPEED, DEFAULT_NEAR_CLIP, DEFAULT_ORBIT_DISTANCE,
        DEFAULT_ORBIT_ELEVATION_DEG, DEFAULT_RUNNING_SPEED, DEFAULT_WALKING_SPEED,
        GROUND_PROBE_DISTANCE, GROUND_PROBE_RADIUS_SCALE, GROUND_PROBE_SPAN,
    },
    error::{ConfigError, check},
    layers::CollisionLayer,
    types::Vec3,
};

/// Character controller tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    pub walking_speed: f32,
    pub running_speed: f32,
    /// Vertical speed removed per airborne tick.
    pub gravity: f32,
    pub jumping_speed: f32,
    /// Axis magnitudes `<=` this are zeroed. Must be in `[0, 1)`.
    pub input_deadzone: f32,
    /// Ask the host to lock and hide the cursor when the controller starts.
    pub lock_cursor: bool,
    /// Layer the controlled entity lives on; excluded from its own queries.
    pub layer: CollisionLayer,
    pub ground_probe: GroundProbeSettings,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            walking_speed: DEFAULT_WALKING_SPEED,
            running_speed: DEFAULT_RUNNING_SPEED,
            gravity: DEFAULT_GRAVITY,
            jumping_speed: DEFAULT_JUMPING_SPEED,
            input_deadzone: DEFAULT_INPUT_DEADZONE,
            lock_cursor: false,
            layer: CollisionLayer::Player,
            ground_probe: GroundProbeSettings::default(),
        }
    }
}

impl ControllerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check::non_negative("walking_speed", self.walking_speed)?;
        check::non_negative("running_speed", self.running_speed)?;
        check::non_negative("gravity", self.gravity)?;
        check::non_negative("jumping_speed", self.jumping_speed)?;

        let deadzone = check::non_negative("input_deadzone", self.input_deadzone)?;
        if deadzone >= 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "input_deadzone",
                value: deadzone,
                min: 0.0,
                max: 1.0,
            });
        }

        self.ground_probe.validate()
    }
}

/// Downward capsule sweep used to decide whether the character is grounded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundProbeSettings {
    /// Sweep distance below the collider center (meters).
    pub distance: f32,
    /// Probe radius as a fraction of the collider radius.
    pub radius_scale: f32,
    /// Length of the probe capsule segment (meters). Zero sweeps a sphere.
    pub span: f32,
}

impl Default for GroundProbeSettings {
    fn default() -> Self {
        Self {
            distance: GROUND_PROBE_DISTANCE,
            radius_scale: GROUND_PROBE_RADIUS_SCALE,
            span: GROUND_PROBE_SPAN,
        }
    }
}

impl GroundProbeSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check::positive("ground_probe.distance", self.distance)?;
        check::positive("ground_probe.radius_scale", self.radius_scale)?;
        check::non_negative("ground_probe.span", self.span)?;
        Ok(())
    }
}

/// Camera projection parameters the clip-probe math needs.
///
/// `field_of_view_deg` is the full horizontal angle. Near-plane half extents are
/// `x = tan(fov / 2) * near_clip` and `y = x / aspect`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraLens {
    pub field_of_view_deg: f32,
    pub aspect: f32,
    pub near_clip: f32,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            field_of_view_deg: DEFAULT_FIELD_OF_VIEW_DEG,
            aspect: DEFAULT_ASPECT,
            near_clip: DEFAULT_NEAR_CLIP,
        }
    }
}

impl CameraLens {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check::within("lens.field_of_view_deg", self.field_of_view_deg, 0.0, 180.0)?;
        check::positive("lens.aspect", self.aspect)?;
        check::positive("lens.near_clip", self.near_clip)?;
        Ok(())
    }
}

/// Occlusion-aware follow camera tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowCameraSettings {
    /// Ideal camera position relative to the subject, in the subject's local frame.
    pub offset: Vec3,
    /// Position smoothing time (seconds).
    pub smooth_time: f32,
    /// Look-at blend rate (per second).
    pub turn_rate: f32,
    /// Layer of the tracked subject; occlusion rays ignore it.
    pub subject_layer: CollisionLayer,
    pub lens: CameraLens,
}

impl Default for FollowCameraSettings {
    fn default() -> Self {
        let [x, y, z] = DEFAULT_CAMERA_OFFSET;
        Self {
            offset: Vec3::new(x, y, z),
            smooth_time: DEFAULT_CAMERA_SMOOTH_TIME,
            turn_rate: DEFAULT_CAMERA_TURN_RATE,
            subject_layer: CollisionLayer::Player,
            lens: CameraLens::default(),
        }
    }
}

impl FollowCameraSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check::finite("offset.x", self.offset.x)?;
        check::finite("offset.y", self.offset.y)?;
        check::finite("offset.z", self.offset.z)?;
        check::positive("smooth_time", self.smooth_time)?;
        check::non_negative("turn_rate", self.turn_rate)?;
        self.lens.validate()
    }
}

/// Orbit ("around the tower") camera tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCameraSettings {
    /// Planar distance added beyond the subject, away from the bounds center (meters).
    pub distance: f32,
    /// Elevation of the camera above the subject as seen from the bounds center (degrees).
    pub elevation_deg: f32,
    pub smooth_time: f32,
    pub turn_rate: f32,
}

impl Default for OrbitCameraSettings {
    fn default() -> Self {
        Self {
            distance: DEFAULT_ORBIT_DISTANCE,
            elevation_deg: DEFAULT_ORBIT_ELEVATION_DEG,
            smooth_time: DEFAULT_CAMERA_SMOOTH_TIME,
            turn_rate: DEFAULT_CAMERA_TURN_RATE,
        }
    }
}

impl OrbitCameraSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check::non_negative("distance", self.distance)?;
        check::within("elevation_deg", self.elevation_deg, -90.0, 90.0)?;
        check::positive("smooth_time", self.smooth_time)?;
        check::non_negative("turn_rate", self.turn_rate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ControllerSettings::default().validate(), Ok(()));
        assert_eq!(FollowCameraSettings::default().validate(), Ok(()));
        assert_eq!(OrbitCameraSettings::default().validate(), Ok(()));
    }

    #[test]
    fn deadzone_of_one_is_rejected() {
        let settings = ControllerSettings {
            input_deadzone: 1.0,
            ..ControllerSettings::default()
        };

        assert!(matches!(
            settings.validate(),
            Err(ConfigError::OutOfRange {
                field: "input_deadzone",
                ..
            })
        ));
    }

    #[test]
    fn nan_speed_is_rejected() {
        let settings = ControllerSettings {
            walking_speed: f32::NAN,
            ..ControllerSettings::default()
        };

        assert!(matches!(
            settings.validate(),
            Err(ConfigError::NonFinite {
                field: "walking_speed",
                ..
            })
        ));
    }

    #[test]
    fn lens_with_zero_aspect_is_rejected() {
        let settings = FollowCameraSettings {
            lens: CameraLens {
                aspect: 0.0,
                ..CameraLens::default()
            },
            ..FollowCameraSettings::default()
        };

        assert_eq!(
            settings.validate(),
            Err(ConfigError::NotPositive {
                field: "lens.aspect",
                value: 0.0
            })
        );
    }

    #[test]
    fn vertical_orbit_elevation_is_rejected() {
        let settings = OrbitCameraSettings {
            elevation_deg: 90.0,
            ..OrbitCameraSettings::default()
        };

        assert!(settings.validate().is_err());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let settings: ControllerSettings =
            serde_json::from_str(r#"{ "walking_speed": 4.5, "ground_probe": { "span": 0.2 } }"#)
                .unwrap();

        assert_eq!(settings.walking_speed, 4.5);
        assert_eq!(settings.running_speed, DEFAULT_RUNNING_SPEED);
        assert_eq!(settings.ground_probe.span, 0.2);
        assert_eq!(settings.ground_probe.distance, GROUND_PROBE_DISTANCE);
    }
}
