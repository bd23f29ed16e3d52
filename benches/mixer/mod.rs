//! Benchmarks for low-level mixing primitives.

mod distributor;
mod percent;

pub use distributor::bench_distributor;
pub use percent::bench_percent;
