//! Descriptive statistics over collected samples.
//!
//! The runner treats [`Stats`] as an opaque summary; sinks read its fields
//! and the comparison ratios to present a candidate against its baseline.

use serde::{Deserialize, Serialize};

/// Summary of one candidate's per-iteration cost samples (nanoseconds)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
}

impl Stats {
    /// Build a summary from raw samples. An empty slice gives all zeros.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                median: 0.0,
                min: 0.0,
                max: 0.0,
                std_dev: 0.0,
            };
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        let std_dev = if count < 2 {
            0.0
        } else {
            let variance = sorted
                .iter()
                .map(|&x| {
                    let diff = x - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        };

        Self {
            count,
            mean,
            median,
            min: sorted[0],
            max: sorted[count - 1],
            std_dev,
        }
    }

    /// Coefficient of variation, in percent
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev / self.mean * 100.0
        } else {
            0.0
        }
    }

    /// How many times faster than `baseline` this candidate is (`> 1.0` = faster)
    pub fn speedup_over(&self, baseline: &Stats) -> f64 {
        match (self.mean > 0.0, baseline.mean > 0.0) {
            (true, _) => baseline.mean / self.mean,
            (false, true) => f64::INFINITY,
            (false, false) => 1.0,
        }
    }

    /// Relative change of the mean against `baseline` (`0.1` = 10% slower)
    pub fn relative_change(&self, baseline: &Stats) -> f64 {
        if baseline.mean > 0.0 {
            (self.mean - baseline.mean) / baseline.mean
        } else {
            0.0
        }
    }
}

/// Format a nanosecond value with an adaptive unit
pub fn format_nanos(ns: f64) -> String {
    if !ns.is_finite() {
        return "-".to_string();
    }
    if ns < 1_000.0 {
        format!("{:.2} ns", ns)
    } else if ns < 1_000_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else if ns < 1_000_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}
