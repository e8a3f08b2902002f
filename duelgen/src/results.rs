use serde::Serialize;
use std::fmt;

use crate::metrics::StageTiming;
use crate::runner::Strategy;

pub const SEPARATOR: &str = "--------------------------------------------------";

/// Outcome of one generate-and-compare run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Strategy the generators ran under
    pub strategy: Strategy,
    /// Values per stream
    pub pair_count: usize,
    /// Timing of generator A, then generator B
    pub generators: Vec<StageTiming>,
    /// Timing of the comparison pass
    pub comparator: StageTiming,
    /// Wall-clock time of the whole run, generators through comparator
    pub total: StageTiming,
    /// Index-aligned pairs agreeing on their low 16 bits
    pub matches: u64,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for timing in &self.generators {
            writeln!(f, "{}", timing)?;
        }
        writeln!(f, "{}", self.comparator)?;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(
            f,
            "Total Time is = {:?} ({:.3}ns per value)",
            self.total.elapsed,
            self.total.per_value_ns()
        )?;
        writeln!(f, "{}", SEPARATOR)?;
        write!(f, "Total Number of Matching Pairs is: => {}", self.matches)
    }
}

/// A sequential run and a concurrent run over the same configuration
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub sequential: RunReport,
    pub concurrent: RunReport,
    /// `100 * (sequential / concurrent - 1)`; negative when concurrency was slower
    pub speedup_percent: f64,
}

impl BenchmarkReport {
    pub fn new(sequential: RunReport, concurrent: RunReport) -> Self {
        let speedup_percent = speedup_percent(&sequential.total, &concurrent.total);
        Self {
            sequential,
            concurrent,
            speedup_percent,
        }
    }

    /// Sentence comparing the two runs, percentage truncated toward zero
    pub fn speedup_line(&self) -> String {
        format!(
            "Concurrent execution is {} % faster than Sequential",
            self.speedup_percent.trunc() as i64
        )
    }
}

/// How much faster the concurrent total was, in percent. 0.0 if the concurrent
/// run took no measurable time.
pub fn speedup_percent(sequential: &StageTiming, concurrent: &StageTiming) -> f64 {
    let concurrent_ns = concurrent.elapsed.as_nanos() as f64;
    if concurrent_ns == 0.0 {
        return 0.0;
    }
    100.0 * (sequential.elapsed.as_nanos() as f64 / concurrent_ns - 1.0)
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sequential)?;
        writeln!(f)?;
        writeln!(f, "{}", self.concurrent)?;
        writeln!(f)?;
        write!(f, "{}", self.speedup_line())
    }
}
