//! Build-time mixer configuration.
//!
//! The stepper count and the fixed-point width are type parameters; the rest
//! of what a firmware build would decide at compile time lives here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MixError, MixResult};

/// Largest palette without a sync channel; one id is given up with one.
pub const MAX_VTOOLS: usize = 255;

/// What a gradient does once the print climbs past its end height.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientRetention {
    /// Select the end tool and forget the gradient.
    #[default]
    Clear,
    /// Select the end tool but keep the gradient configured. An unpinned
    /// gradient holds the end mix and blends again once the height drops
    /// back into range; a pinned one comes back with its tool.
    Keep,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct MixerConfig {
    /// Virtual tools the operator can select and edit.
    pub user_tools: u8,
    /// Reserve an extra tool for auto-retract moves.
    pub sync_channel: bool,
    /// Gradient mix compiled in.
    pub gradient: bool,
    /// Random mix compiled in.
    pub random: bool,
    pub gradient_retention: GradientRetention,
    /// Mixing switch state at boot.
    pub mixing_enabled: bool,
    /// Default minimum height between two random mixes (mm).
    pub random_band: f32,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            user_tools: 2,
            sync_channel: false,
            gradient: true,
            random: true,
            gradient_retention: GradientRetention::Clear,
            mixing_enabled: true,
            random_band: 0.2,
        }
    }
}

impl MixerConfig {
    /// Tool ids in use: user tools, the direct-set tool and, with a sync
    /// channel, the auto-retract tool.
    pub fn tool_count(&self) -> usize {
        self.user_tools as usize + 1 + usize::from(self.sync_channel)
    }

    pub fn max_tools(&self) -> usize {
        if self.sync_channel {
            MAX_VTOOLS - 1
        } else {
            MAX_VTOOLS
        }
    }

    pub fn validate(&self) -> MixResult<()> {
        if self.user_tools == 0 {
            return Err(MixError::Config("at least one user tool is required"));
        }
        if self.tool_count() > self.max_tools() {
            return Err(MixError::Config("too many virtual tools"));
        }
        if !(self.random_band.is_finite() && self.random_band > 0.0) {
            return Err(MixError::Config("random band height must be positive"));
        }
        Ok(())
    }
}
