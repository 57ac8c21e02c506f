//! Adaptive sample collection.
//!
//! One sample is the per-iteration cost of a single timed invocation whose
//! elapsed time reached `min_time`. The requested iteration count doubles
//! until that floor is met, so timer resolution and scheduler jitter are
//! amortized over enough work. Samples are collected until `max_time` has
//! been spent on the candidate or [`MAX_SAMPLES`] have been taken.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::routine::Routine;

/// Upper bound on samples collected for one candidate
pub const MAX_SAMPLES: usize = 1024;

// ============================================================================
// Configuration
// ============================================================================

/// Measurement options, fixed for the duration of a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Minimum elapsed time for a single timed invocation to be trusted (default: 100ms)
    pub min_time: Duration,
    /// Wall time budget per candidate (default: 1s)
    pub max_time: Duration,
    /// Iteration count the doubling search starts from (default: 1)
    pub iterations: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_time: Duration::from_millis(100),
            max_time: Duration::from_secs(1),
            iterations: 1,
        }
    }
}

// ============================================================================
// Clock
// ============================================================================

/// Monotonic nanosecond time source.
///
/// Readings must never go backwards; only differences between readings are
/// meaningful.
pub trait Clock {
    fn now_ns(&self) -> u64;
}

/// [`Clock`] backed by `std::time::Instant`
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now_ns(&self) -> u64 {
        saturating_nanos(self.origin.elapsed())
    }
}

/// Whole nanoseconds in `d`, capped at `u64::MAX`
#[inline(always)]
fn saturating_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

// ============================================================================
// Collector
// ============================================================================

/// Drives a [`Routine`] and turns its timings into per-iteration samples
pub struct SampleCollector<'c, C: Clock> {
    options: &'c Options,
    clock: &'c C,
}

impl<'c, C: Clock> SampleCollector<'c, C> {
    pub fn new(options: &'c Options, clock: &'c C) -> Self {
        Self { options, clock }
    }

    /// Time one invocation: returns (iterations done, elapsed nanoseconds)
    #[inline(always)]
    fn time(&self, routine: &mut Routine<'_>, count: u64) -> (u64, u64) {
        let started = self.clock.now_ns();
        let done = routine.invoke(count);
        let elapsed = self.clock.now_ns().saturating_sub(started);
        (done, elapsed)
    }

    /// Collect per-iteration cost samples (nanoseconds) for one candidate.
    ///
    /// The iteration count is carried over from one sample to the next, so
    /// the doubling search is normally paid only once.
    pub fn collect(&self, routine: &mut Routine<'_>) -> Vec<f64> {
        let min_ns = saturating_nanos(self.options.min_time);
        let max_ns = saturating_nanos(self.options.max_time);

        let mut samples = Vec::with_capacity(MAX_SAMPLES);
        let mut n = self.options.iterations;
        let start = self.clock.now_ns();

        while samples.len() < MAX_SAMPLES {
            let (done, elapsed) = loop {
                let (done, elapsed) = self.time(routine, n);
                if elapsed >= min_ns {
                    break (done, elapsed);
                }
                match n.checked_mul(2) {
                    Some(next) => n = next,
                    None => {
                        debug!(n, elapsed, "iteration counter saturated, keeping short sample");
                        break (done, elapsed);
                    }
                }
            };

            let sample = (elapsed as f64 / done.max(1) as f64).max(0.0);
            trace!(n, done, elapsed, sample, "sample accepted");
            samples.push(sample);

            if self.clock.now_ns().saturating_sub(start) >= max_ns {
                break;
            }
        }

        samples
    }
}
