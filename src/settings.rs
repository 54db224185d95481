use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

/// Tunable simulation parameters, loadable from a TOML file.
#[derive(Debug, Clone, Copy, PartialEq, Resource, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Magnitude of the gravitational acceleration, m/s^2.
    pub gravity_magnitude: f32,
    /// Entity pairs farther apart than this skip the broad phase entirely.
    pub broad_phase_cull_distance: f32,
    /// Fixed simulation step in seconds.
    pub fixed_time_step: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity_magnitude: 9.81,
            broad_phase_cull_distance: 10.0,
            fixed_time_step: 1.0 / 60.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("deserialization error: {0}")]
    Serde(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    SerdeSer(#[from] toml::ser::Error),
}

impl PhysicsSettings {
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
