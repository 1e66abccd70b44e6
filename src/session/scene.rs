use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::foundation::core::{Fps, SurfaceSize};
use crate::foundation::error::{SparkError, SparkResult};
use crate::spiral::config::SpiralConfig;
use crate::spiral::renderer::DEFAULT_BACKGROUND;

/// Everything needed to render the spiral offline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Spiral tuning.
    pub spiral: SpiralConfig,
    /// Output surface.
    pub surface: SurfaceSize,
    /// Output frame rate.
    pub fps: Fps,
    /// Clear color, straight RGBA8.
    pub background: [u8; 4],
    /// Default number of frames for range renders.
    pub frames: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spiral: SpiralConfig::default(),
            surface: SurfaceSize::new(280, 280),
            fps: Fps::default(),
            background: DEFAULT_BACKGROUND,
            frames: 180,
        }
    }
}

impl SceneConfig {
    /// Parse a scene from JSON.
    pub fn from_json_str(s: &str) -> SparkResult<Self> {
        serde_json::from_str(s).map_err(|e| SparkError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON reader.
    pub fn from_reader(r: impl Read) -> SparkResult<Self> {
        serde_json::from_reader(r).map_err(|e| SparkError::serde(format!("parse scene JSON: {e}")))
    }

    /// Load a scene from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SparkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SparkError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> SparkResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SparkError::serde(e.to_string()))
    }

    pub fn validate(&self) -> SparkResult<()> {
        self.spiral.validate()?;
        self.surface.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        let (w, h) = self.surface.backing();
        if w == 0 || h == 0 {
            return Err(SparkError::validation("surface must be non-empty"));
        }
        if w > u32::from(u16::MAX) || h > u32::from(u16::MAX) {
            return Err(SparkError::validation(format!(
                "surface {w}x{h} exceeds the 65535px raster limit"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scene.rs"]
mod tests;
