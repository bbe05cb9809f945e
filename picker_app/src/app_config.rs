//! Application settings
//!
//! Everything has a default, so the binary runs without a config file. A file
//! only needs the values it changes:
//!
//! ```toml
//! input = { script = "inputs/hover_maja.ron" }
//!
//! [engine]
//! media_path = "/opt/workshop/media"
//! device = "null"
//!
//! [camera]
//! position = [50.0, 50.0, -60.0]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use scene_engine::config::{Config, ConfigError};
use scene_engine::foundation::math::Vec3;
use scene_engine::input::InputScript;
use scene_engine::EngineConfig;

use crate::avatars;

/// Camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World position
    pub position: [f32; 3],
    /// Look-at target
    pub target: [f32; 3],
}

impl CameraConfig {
    /// Position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Target as a vector
    pub fn target(&self) -> Vec3 {
        Vec3::from(self.target)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [50.0, 50.0, -60.0],
            target: [-70.0, 30.0, -60.0],
        }
    }
}

/// Where headless runs take their input from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    /// Built-in sweep over all avatars
    #[default]
    Sweep,
    /// RON input script file
    Script(PathBuf),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Engine and window settings
    pub engine: EngineConfig,
    /// Camera placement
    pub camera: CameraConfig,
    /// Input for headless devices
    pub input: InputSource,
}

impl Config for AppConfig {}

impl AppConfig {
    /// Load from `path`, or use defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                log::info!("Loading configuration from {:?}", path);
                Self::load_from_file(path)?
            }
            None => Self::default(),
        };
        config.engine.validate()?;
        Ok(config)
    }

    /// Input script for this run
    pub fn input_script(&self) -> Result<InputScript, ConfigError> {
        match &self.input {
            InputSource::Sweep => Ok(avatars::sweep_script(&self.camera, &self.engine.window)),
            InputSource::Script(path) => {
                let script = InputScript::load_from_file(path)?;
                log::info!("Loaded {} input frames from {:?}", script.len(), path);
                Ok(script)
            }
        }
    }
}
