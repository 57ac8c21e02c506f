//! In-memory sink.

use super::{Event, Printer};
use crate::error::Result;
use crate::utils::bench::Stats;

/// Keeps every event of a run, in order
#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl Printer for Recorder {
    fn run_started(&mut self, groups: usize) -> Result<()> {
        self.events.push(Event::RunStarted { groups });
        Ok(())
    }

    fn group_started(&mut self, name: &str, candidates: usize) -> Result<()> {
        self.events.push(Event::GroupStarted {
            name: name.to_string(),
            candidates,
        });
        Ok(())
    }

    fn candidate_started(&mut self, label: &str) -> Result<()> {
        self.events.push(Event::CandidateStarted {
            label: label.to_string(),
        });
        Ok(())
    }

    fn candidate_finished(&mut self, stats: &Stats) -> Result<()> {
        self.events.push(Event::CandidateFinished {
            stats: stats.clone(),
        });
        Ok(())
    }

    fn candidate_compared(&mut self, stats: &Stats, baseline: &Stats) -> Result<()> {
        self.events.push(Event::CandidateCompared {
            stats: stats.clone(),
            baseline: baseline.clone(),
        });
        Ok(())
    }

    fn group_finished(&mut self) -> Result<()> {
        self.events.push(Event::GroupFinished);
        Ok(())
    }

    fn run_finished(&mut self) -> Result<()> {
        self.events.push(Event::RunFinished);
        Ok(())
    }
}
