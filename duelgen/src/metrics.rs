use serde::{Serialize, Serializer};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Wall-clock duration of one labeled stage: a generator, the comparator, or a whole run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTiming {
    /// Stage name, e.g. `generator65`, `worker8921`, `comparator`, `total`
    pub label: String,
    /// Time spent in the stage
    #[serde(rename = "elapsed_ns", serialize_with = "serialize_nanos")]
    pub elapsed: Duration,
    /// Number of values the stage processed, used for per-value cost
    pub values: usize,
}

fn serialize_nanos<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed: Duration, values: usize) -> Self {
        Self {
            label: label.into(),
            elapsed,
            values,
        }
    }

    /// Average cost of one value in nanoseconds, 0.0 for an empty stage
    pub fn per_value_ns(&self) -> f64 {
        if self.values == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / self.values as f64
    }
}

impl fmt::Display for StageTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} took {:?} ({:.3}ns per value)",
            self.label,
            self.elapsed,
            self.per_value_ns()
        )
    }
}

/// A value together with the timing of the stage that produced it
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub timing: StageTiming,
}

impl<T> Timed<T> {
    pub fn into_parts(self) -> (T, StageTiming) {
        (self.value, self.timing)
    }
}

/// Runs `f` and records how long it took under `label`
pub fn measure<T>(label: impl Into<String>, values: usize, f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    let timing = StageTiming::new(label, start.elapsed(), values);
    debug!("{}", timing);
    Timed { value, timing }
}
