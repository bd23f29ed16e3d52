//! Monitor configuration file.
//!
//! ```toml
//! [mixer]
//! user_tools = 4
//! gradient_retention = "keep"
//!
//! [print]
//! height = 12.0
//! layer_height = 0.3
//! ```

use std::path::Path;

use color_eyre::eyre::{bail, Result as EyreResult, WrapErr};
use colormix::MixerConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub mixer: MixerConfig,
    pub print: PrintSettings,
}

/// Shape of the simulated print.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    /// Total height in mm
    pub height: f32,
    pub layer_height: f32,
    pub segments_per_layer: u32,
    /// Mixed-axis steps in one planned segment
    pub steps_per_segment: u32,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            height: 20.0,
            layer_height: 0.2,
            segments_per_layer: 8,
            steps_per_segment: 400,
        }
    }
}

impl PrintSettings {
    pub fn layers(&self) -> u32 {
        (self.height / self.layer_height).ceil() as u32
    }

    pub fn validate(&self) -> EyreResult<()> {
        if !(self.height > 0.0 && self.layer_height > 0.0) {
            bail!("print height and layer height must be positive");
        }
        if self.segments_per_layer == 0 || self.steps_per_segment == 0 {
            bail!("a layer needs at least one segment with at least one step");
        }
        Ok(())
    }
}

impl FileConfig {
    pub fn load(path: &Path) -> EyreResult<Self> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }
}
