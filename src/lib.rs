//! # Micro-Bench
//!
//! An adaptive micro-benchmark harness. Candidates are registered in named
//! groups, measured with a doubling iteration search until each timing is
//! long enough to trust, and reported either on their own or against the
//! group's baseline.
//!
//! ```ignore
//! use micro_bench::prelude::*;
//!
//! let mut registry = BenchmarkRegistry::new();
//! registry
//!     .baseline("sum", "iter", || {
//!         std::hint::black_box((0..1000u64).sum::<u64>());
//!     })
//!     .candidate("sum", "formula", || {
//!         std::hint::black_box(999u64 * 1000 / 2);
//!     });
//!
//! let mut printer = TablePrinter::new(std::io::stdout());
//! Runner::new(Options::default(), &mut printer).run(registry)?;
//! ```

pub mod config;
pub mod demos;
pub mod error;
pub mod output;
pub mod registry;
pub mod utils;

pub use error::{Error, Result};
pub use utils::runner::Runner;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::output::{JsonPrinter, Printer, Recorder, TablePrinter};
    pub use crate::registry::BenchmarkRegistry;
    pub use crate::utils::{Options, Routine, Runner, Stats};
}
