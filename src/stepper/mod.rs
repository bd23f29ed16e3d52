//! Pulse side of the mixer.
//!
//! Everything here may run in the stepper interrupt context: no allocation,
//! no locks, no logging and no error path. Its only input is the
//! [`BlockColor`] each planned segment carries.

pub mod block;
pub mod distributor;
pub mod message;
pub mod runner;

pub use block::{BlockColor, Segment};
pub use distributor::PulseDistributor;
#[cfg(feature = "rtrb")]
pub use message::segment_queue;
pub use message::SegmentReceiver;
pub use runner::StepperRunner;
