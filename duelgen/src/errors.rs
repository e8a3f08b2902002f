/// Error types for duelgen.
///
/// Generating and comparing streams is pure, deterministic, in-memory work, so the
/// only realistic failures are contract violations:
///
/// 1. **Length preconditions**
///    - The comparator is handed streams whose length differs from the configured
///      pair count. This is a programmer error and is reported, never truncated.
///
/// 2. **Configuration**
///    - A config file cannot be read or deserialized
///    - A value lies outside its documented range (divisor, factor, worker threads)
///
/// 3. **Worker handoff**
///    - A concurrent worker closed its channel without delivering a stream
///
/// ```rust,ignore
/// match count_matches(&a, &b, expected) {
///     Ok(timed) => // Report timed.value,
///     Err(DuelError::LengthMismatch { expected, left, right }) => // Fix the caller,
///     Err(e) => // Other errors
/// }
/// ```
use thiserror::Error;

/// Result type for duelgen operations
pub type DuelResult<T> = Result<T, DuelError>;

/// Errors that can occur while generating, comparing or reporting streams
#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Length mismatch: expected {expected} values, got {left} (stream A) and {right} (stream B)")]
    LengthMismatch {
        expected: usize,
        left: usize,
        right: usize,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Worker for seed {seed} closed its channel without sending a stream")]
    WorkerDisconnected { seed: u64 },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DuelError {
    pub fn length_mismatch(expected: usize, left: usize, right: usize) -> Self {
        Self::LengthMismatch {
            expected,
            left,
            right,
        }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn worker_disconnected(seed: u64) -> Self {
        Self::WorkerDisconnected { seed }
    }
}
