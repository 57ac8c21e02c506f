//! Measurement engine: candidate normalization, sampling, statistics and
//! run orchestration.

pub mod bench;
pub mod routine;
pub mod runner;
pub mod timer;

// Re-export commonly used items
pub use bench::{format_nanos, Stats};
pub use routine::{IntoRoutine, Routine, Shape};
pub use runner::Runner;
pub use timer::{Clock, MonotonicClock, Options, SampleCollector, MAX_SAMPLES};
