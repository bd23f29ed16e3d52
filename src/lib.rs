pub mod config;
pub mod error;
pub mod fixed; // Fixed-point mix colors and widths
pub mod height; // Z-driven gradient and random mixes
pub mod mixer;
pub mod palette; // Virtual tools and the component collector
pub mod percent;
pub mod stepper; // Block snapshots and the pulse distributor

pub use config::{GradientRetention, MixerConfig};
pub use error::{MixError, MixMode, MixResult};
pub use fixed::{MixColor, MixWidth, Narrow, Wide};
pub use mixer::Mixer;
pub use percent::PercentMix;
pub use stepper::{BlockColor, PulseDistributor, Segment, StepperRunner};

/// Upper bound on the stepper count accepted by [`Mixer::new`].
pub const MAX_MIXING_STEPPERS: usize = 10;
