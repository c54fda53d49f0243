use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use third_person_core::{
    ControllerSettings, FollowCameraSettings, OrbitCameraSettings,
    constants::{FIXED_TIMESTEP, MAX_STEPS_PER_FRAME},
};

/// Everything the sandbox reads from `--config`. Missing sections keep their defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub controller: ControllerSettings,
    pub follow_camera: FollowCameraSettings,
    pub orbit_camera: OrbitCameraSettings,
    pub character: CharacterConfig,
    pub fixed_step: f32,
    pub max_steps_per_frame: u32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            controller: ControllerSettings::default(),
            follow_camera: FollowCameraSettings::default(),
            orbit_camera: OrbitCameraSettings::default(),
            character: CharacterConfig::default(),
            fixed_step: FIXED_TIMESTEP,
            max_steps_per_frame: MAX_STEPS_PER_FRAME,
        }
    }
}

/// Spawn point and capsule of the simulated character.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub spawn: [f32; 3],
    pub radius: f32,
    pub height: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 1.0, 0.0],
            radius: 0.5,
            height: 2.0,
        }
    }
}

impl SandboxConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
