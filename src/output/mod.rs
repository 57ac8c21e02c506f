//! Result sinks.
//!
//! The runner reports a run as a strict sequence of events:
//!
//! ```text
//! run_started(groups)
//!   group_started(name, candidates)
//!     candidate_started(label)
//!     candidate_finished(stats) | candidate_compared(stats, baseline)
//!   group_finished()
//! run_finished()
//! ```
//!
//! How the events are rendered is entirely up to the [`Printer`].

mod json;
mod recorder;
mod table;

pub use json::JsonPrinter;
pub use recorder::Recorder;
pub use table::TablePrinter;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::bench::Stats;

/// Receiver of run lifecycle and result events
pub trait Printer {
    fn run_started(&mut self, groups: usize) -> Result<()>;

    fn group_started(&mut self, name: &str, candidates: usize) -> Result<()>;

    fn candidate_started(&mut self, label: &str) -> Result<()>;

    /// Result of a candidate in a group without baseline
    fn candidate_finished(&mut self, stats: &Stats) -> Result<()>;

    /// Result of a candidate measured against its group's baseline
    fn candidate_compared(&mut self, stats: &Stats, baseline: &Stats) -> Result<()>;

    fn group_finished(&mut self) -> Result<()>;

    fn run_finished(&mut self) -> Result<()>;
}

/// Owned form of a [`Printer`] call, as recorded or serialized
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    RunStarted { groups: usize },
    GroupStarted { name: String, candidates: usize },
    CandidateStarted { label: String },
    CandidateFinished { stats: Stats },
    CandidateCompared { stats: Stats, baseline: Stats },
    GroupFinished,
    RunFinished,
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal table
    #[default]
    Human,
    /// One JSON object per event per line
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "table" | "text" => Ok(OutputFormat::Human),
            "json" | "jsonl" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
