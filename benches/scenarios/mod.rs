//! Real-world scenario benchmarks.
//!
//! These model a planner feeding a stepper through the segment queue.

mod print;

pub use print::bench_print;
