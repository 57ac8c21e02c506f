//! Run orchestration.
//!
//! Walks the registry group by group, measures every candidate and reports
//! to the printer. In a group whose first candidate (after moving baselines
//! to the front) is a baseline, the first result is kept and every result,
//! including the baseline's own, is reported against it.

use tracing::debug;

use super::bench::Stats;
use super::routine::Routine;
use super::timer::{Clock, MonotonicClock, Options, SampleCollector};
use crate::error::Result;
use crate::output::Printer;
use crate::registry::{BenchmarkRegistry, Candidate, Namespace};

/// Everything a run needs: measurement options, a printer and a clock
pub struct Runner<'p, C: Clock = MonotonicClock> {
    options: Options,
    printer: &'p mut dyn Printer,
    clock: C,
}

impl<'p> Runner<'p, MonotonicClock> {
    pub fn new(options: Options, printer: &'p mut dyn Printer) -> Self {
        Self::with_clock(options, printer, MonotonicClock::new())
    }
}

impl<'p, C: Clock> Runner<'p, C> {
    pub fn with_clock(options: Options, printer: &'p mut dyn Printer, clock: C) -> Self {
        Self {
            options,
            printer,
            clock,
        }
    }

    /// Measure every registered group and report the results.
    ///
    /// A panicking candidate aborts the whole run. Errors only come from the
    /// printer.
    pub fn run(&mut self, registry: BenchmarkRegistry<'_>) -> Result<()> {
        debug!(groups = registry.len(), options = ?self.options, "run started");
        self.printer.run_started(registry.len())?;

        for namespace in registry.into_namespaces() {
            self.run_group(namespace)?;
        }

        self.printer.run_finished()?;
        debug!("run finished");
        Ok(())
    }

    fn run_group(&mut self, mut namespace: Namespace<'_>) -> Result<()> {
        namespace.sort_baseline_first();
        let compare = namespace
            .candidates()
            .first()
            .is_some_and(|c| c.is_baseline);
        let (name, candidates) = namespace.into_parts();

        debug!(group = %name, candidates = candidates.len(), compare, "group started");
        self.printer.group_started(&name, candidates.len())?;

        if compare {
            let mut baseline: Option<Stats> = None;
            for candidate in candidates {
                self.run_compared(candidate, &mut baseline)?;
            }
        } else {
            for candidate in candidates {
                self.run_standalone(candidate)?;
            }
        }

        self.printer.group_finished()
    }

    fn run_standalone(&mut self, mut candidate: Candidate<'_>) -> Result<()> {
        self.printer.candidate_started(&candidate.label)?;
        let stats = self.measure(&candidate.label, &mut candidate.routine);
        self.printer.candidate_finished(&stats)
    }

    fn run_compared(
        &mut self,
        mut candidate: Candidate<'_>,
        baseline: &mut Option<Stats>,
    ) -> Result<()> {
        self.printer.candidate_started(&candidate.label)?;
        let stats = self.measure(&candidate.label, &mut candidate.routine);
        let baseline = baseline.get_or_insert_with(|| stats.clone());
        self.printer.candidate_compared(&stats, baseline)
    }

    fn measure(&self, label: &str, routine: &mut Routine<'_>) -> Stats {
        let samples = SampleCollector::new(&self.options, &self.clock).collect(routine);
        let stats = Stats::from_samples(&samples);
        debug!(
            candidate = label,
            shape = ?routine.shape(),
            samples = stats.count,
            mean_ns = stats.mean,
            "candidate measured"
        );
        stats
    }
}
