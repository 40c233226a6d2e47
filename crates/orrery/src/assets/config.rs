use serde::{Deserialize, Serialize};

use crate::core::bodies::BodyDesc;
use crate::core::time::TimeConfig;
use crate::error::ConfigResult;
use crate::renderer::camera::CameraConfig;
use crate::systems::lighting::IlluminationConfig;

/// Complete description of a simulated system.
/// Loaded from JSON or taken from `presets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub illumination: IlluminationConfig,
    /// Body descriptors; exactly one must have no parent.
    #[serde(default)]
    pub bodies: Vec<BodyDesc>,
}

impl SystemConfig {
    /// Parse a config from a JSON string. Bodies are checked when the tree
    /// is built; call `validate` for the other sections.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the time, camera and illumination sections.
    pub fn validate(&self) -> ConfigResult<()> {
        self.time.validate()?;
        self.camera.validate()?;
        self.illumination.validate()
    }
}
