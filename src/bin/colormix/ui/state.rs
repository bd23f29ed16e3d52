//! Shared state types for UI communication
//!
//! Everything crossing a thread boundary here is Copy and fixed-size, so the
//! planner and stepper threads never allocate to report.

use colormix::PercentMix;

use crate::STEPPERS;

/// Commands sent from the UI thread to the planner thread
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    /// Pause or resume height-driven mixing and planning
    TogglePause,
    /// Restore every virtual tool to its boot color
    ResetPalette,
}

/// Which source is stamping block colors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveMode {
    Tool,
    Gradient,
    Random,
}

impl ActiveMode {
    pub fn label(self) -> &'static str {
        match self {
            ActiveMode::Tool => "tool",
            ActiveMode::Gradient => "gradient",
            ActiveMode::Random => "random",
        }
    }
}

/// Planner state after each layer
#[derive(Clone, Copy, Debug)]
pub struct PlannerUpdate {
    pub z: f32,
    pub height: f32,
    pub layer: u32,
    pub layers: u32,
    pub tool: u8,
    pub mode: ActiveMode,
    pub paused: bool,
    pub finished: bool,
    /// Share of pulses each stepper should get under the current block color
    pub requested: [f32; STEPPERS],
    /// Editor percentages
    pub mix: PercentMix<STEPPERS>,
    /// Segments handed to the stepper thread so far
    pub planned: u64,
}

/// Stepper tallies, published after every burst of pulses
#[derive(Clone, Copy, Debug, Default)]
pub struct StepperUpdate {
    pub pulses: [u64; STEPPERS],
    pub segments: u64,
}

impl StepperUpdate {
    /// Delivered share per stepper between two tallies.
    pub fn shares_since(&self, earlier: &StepperUpdate) -> Option<[f32; STEPPERS]> {
        let mut delta = [0u64; STEPPERS];
        for (d, (now, then)) in delta.iter_mut().zip(self.pulses.iter().zip(earlier.pulses.iter())) {
            *d = now.saturating_sub(*then);
        }
        let total: u64 = delta.iter().sum();
        if total == 0 {
            return None;
        }
        Some(delta.map(|d| d as f32 / total as f32))
    }

    /// Delivered share per stepper since the start.
    pub fn shares(&self) -> [f32; STEPPERS] {
        self.shares_since(&StepperUpdate::default())
            .unwrap_or([0.0; STEPPERS])
    }
}
