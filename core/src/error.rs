use thiserror::Error;

/// A tuning value that cannot produce a stable simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("`{field}` must be > 0, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be within {min}..{max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Setup failures for a [`crate::controller::ThirdPersonController`].
///
/// All of these are fatal for the controller instance being built: every tick assumes the
/// rigid body and collider are present and valid, so a partially initialized controller is
/// never handed out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("controlled entity requires a rigid body")]
    MissingRigidBody,

    #[error("controlled entity requires a capsule collider")]
    MissingCollider,

    #[error("capsule collider is invalid: {0}")]
    InvalidCollider(ConfigError),

    #[error("invalid controller settings: {0}")]
    Config(#[from] ConfigError),
}

/// Field validation helpers shared by the settings structs.
pub(crate) mod check {
    use super::ConfigError;

    pub fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::NonFinite { field, value })
        }
    }

    pub fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
        if finite(field, value)? < 0.0 {
            return Err(ConfigError::Negative { field, value });
        }
        Ok(value)
    }

    pub fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
        if finite(field, value)? <= 0.0 {
            return Err(ConfigError::NotPositive { field, value });
        }
        Ok(value)
    }

    /// Exclusive on both ends.
    pub fn within(field: &'static str, value: f32, min: f32, max: f32) -> Result<f32, ConfigError> {
        let v = finite(field, value)?;
        if v <= min || v >= max {
            return Err(ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
        Ok(v)
    }
}
