//! Producer-side error kinds. The pulse path has no error path at all.

use core::fmt;

use thiserror::Error;

/// Height-driven mix modes, for reporting which one was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixMode {
    Gradient,
    Random,
}

impl fmt::Display for MixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixMode::Gradient => f.write_str("gradient"),
            MixMode::Random => f.write_str("random"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixError {
    #[error("virtual tool {tool} out of range (palette holds {tools})")]
    ToolOutOfRange { tool: u8, tools: u8 },

    #[error("stepper {stepper} out of range ({steppers} mixing steppers)")]
    StepperOutOfRange { stepper: usize, steppers: usize },

    #[error("mix has no positive component, fell back to an equal split")]
    DegenerateRatio,

    #[error("gradient needs two different tools and start_z < end_z")]
    InvalidGradientConfig,

    #[error("random mix needs start_z < end_z and a positive band height")]
    InvalidRandomConfig,

    #[error("color is not normalized to full scale")]
    NotNormalized,

    #[error("{0} mix is not available in this build")]
    ModeUnavailable(MixMode),

    #[error("invalid mixer configuration: {0}")]
    Config(&'static str),
}

pub type MixResult<T> = Result<T, MixError>;
