//! JSON lines output

use std::io::Write;

use super::{Event, Printer};
use crate::error::Result;
use crate::utils::bench::Stats;

/// Writes each event as one JSON object per line.
///
/// Candidate results carry the label of the `candidate_started` event that
/// precedes them, so each line can be read on its own.
pub struct JsonPrinter<W: Write> {
    out: W,
    group: Option<String>,
    label: Option<String>,
}

#[derive(serde::Serialize)]
struct Line<'e> {
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<&'e str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'e str>,
    #[serde(flatten)]
    event: &'e Event,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            group: None,
            label: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: Event) -> Result<()> {
        let line = Line {
            group: self.group.as_deref(),
            label: self.label.as_deref(),
            event: &event,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Printer for JsonPrinter<W> {
    fn run_started(&mut self, groups: usize) -> Result<()> {
        self.emit(Event::RunStarted { groups })
    }

    fn group_started(&mut self, name: &str, candidates: usize) -> Result<()> {
        self.group = Some(name.to_string());
        self.emit(Event::GroupStarted {
            name: name.to_string(),
            candidates,
        })
    }

    fn candidate_started(&mut self, label: &str) -> Result<()> {
        self.label = Some(label.to_string());
        self.emit(Event::CandidateStarted {
            label: label.to_string(),
        })
    }

    fn candidate_finished(&mut self, stats: &Stats) -> Result<()> {
        self.emit(Event::CandidateFinished {
            stats: stats.clone(),
        })
    }

    fn candidate_compared(&mut self, stats: &Stats, baseline: &Stats) -> Result<()> {
        self.emit(Event::CandidateCompared {
            stats: stats.clone(),
            baseline: baseline.clone(),
        })
    }

    fn group_finished(&mut self) -> Result<()> {
        self.label = None;
        self.emit(Event::GroupFinished)?;
        self.group = None;
        Ok(())
    }

    fn run_finished(&mut self) -> Result<()> {
        self.emit(Event::RunFinished)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_lines() {
        let mut printer = JsonPrinter::new(Vec::new());
        let stats = Stats::from_samples(&[10.0, 20.0]);

        printer.run_started(1).unwrap();
        printer.group_started("math", 1).unwrap();
        printer.candidate_started("naive").unwrap();
        printer.candidate_finished(&stats).unwrap();
        printer.group_finished().unwrap();
        printer.run_finished().unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0]["event"], "run_started");
        assert_eq!(lines[0]["groups"], 1);
        assert!(lines[0].get("group").is_none());
        assert_eq!(lines[1]["event"], "group_started");
        assert_eq!(lines[1]["group"], "math");
        assert_eq!(lines[3]["event"], "candidate_finished");
        assert_eq!(lines[3]["label"], "naive");
        assert_eq!(lines[3]["stats"]["mean"], 15.0);
        assert_eq!(lines[4]["event"], "group_finished");
        assert!(lines[4].get("label").is_none());
        assert_eq!(lines[5]["event"], "run_finished");
    }

    #[test]
    fn test_compared_line_carries_baseline() {
        let mut printer = JsonPrinter::new(Vec::new());
        let base = Stats::from_samples(&[100.0]);
        let fast = Stats::from_samples(&[50.0]);

        printer.group_started("g", 2).unwrap();
        printer.candidate_started("v2").unwrap();
        printer.candidate_compared(&fast, &base).unwrap();

        let text = String::from_utf8(printer.into_inner()).unwrap();
        let last: Value = serde_json::from_str(text.lines().last().unwrap()).unwrap();
        assert_eq!(last["event"], "candidate_compared");
        assert_eq!(last["stats"]["mean"], 50.0);
        assert_eq!(last["baseline"]["mean"], 100.0);
    }
}
