/// Execution strategies for the generate-then-compare pipeline.
///
/// Both strategies run the same generator and the same comparator; they differ only
/// in where the two generators execute:
///
/// 1. **Sequential**: stream A, then stream B, on the calling thread
/// 2. **Concurrent**: one rayon worker per stream, each handing its finished stream
///    back through a zero-capacity channel
///
/// Every run produces fresh streams, so results must be identical across strategies
/// and only the timings differ.
///
/// ```rust,ignore
/// let config = BenchConfig::default().with_pair_count(1_000);
/// let report = benchmark(&config)?;
/// assert_eq!(report.sequential.matches, report.concurrent.matches);
/// println!("{}", report);
/// ```
pub mod concurrent;
pub mod sequential;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

use crate::comparator::count_matches;
use crate::config::BenchConfig;
use crate::errors::{DuelError, DuelResult};
use crate::generator::Stream;
use crate::metrics::{StageTiming, Timed};
use crate::results::{BenchmarkReport, RunReport};

/// Where the two generators run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Sequential,
    Concurrent,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Sequential => write!(f, "sequential"),
            Strategy::Concurrent => write!(f, "concurrent"),
        }
    }
}

impl FromStr for Strategy {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "seq" => Ok(Strategy::Sequential),
            "concurrent" | "par" | "parallel" => Ok(Strategy::Concurrent),
            other => Err(DuelError::invalid_config(format!(
                "unknown strategy '{}', expected sequential or concurrent",
                other
            ))),
        }
    }
}

/// Both generated streams with their generator timings
#[derive(Debug, Clone)]
pub struct StreamPair {
    pub a: Timed<Stream>,
    pub b: Timed<Stream>,
}

/// Generates both streams with the given strategy
pub fn generate_pair(config: &BenchConfig, strategy: Strategy) -> DuelResult<StreamPair> {
    match strategy {
        Strategy::Sequential => sequential::generate_pair(config),
        Strategy::Concurrent => concurrent::generate_pair(config),
    }
}

/// Generates both streams, compares them and times the whole run
pub fn run(config: &BenchConfig, strategy: Strategy) -> DuelResult<RunReport> {
    config.validate()?;
    info!("Starting {} run with {} pairs", strategy, config.pair_count);

    let start = Instant::now();
    let pair = generate_pair(config, strategy)?;
    let (a, timing_a) = pair.a.into_parts();
    let (b, timing_b) = pair.b.into_parts();

    let (matches, comparator) =
        count_matches(a.as_slice(), b.as_slice(), config.pair_count)?.into_parts();
    let total = StageTiming::new("total", start.elapsed(), config.pair_count);

    info!(
        "{} run complete. Found {} matching pairs in {:?}",
        strategy, matches, total.elapsed
    );

    Ok(RunReport {
        strategy,
        pair_count: config.pair_count,
        generators: vec![timing_a, timing_b],
        comparator,
        total,
        matches,
    })
}

/// Runs the sequential strategy, then the concurrent one, each on fresh streams
pub fn benchmark(config: &BenchConfig) -> DuelResult<BenchmarkReport> {
    let sequential = run(config, Strategy::Sequential)?;
    let concurrent = run(config, Strategy::Concurrent)?;
    let report = BenchmarkReport::new(sequential, concurrent);
    info!(
        "Concurrent run was {:.1}% faster than sequential",
        report.speedup_percent
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StreamParams;

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("sequential".parse::<Strategy>().unwrap(), Strategy::Sequential);
        assert_eq!("Concurrent".parse::<Strategy>().unwrap(), Strategy::Concurrent);
        assert_eq!("par".parse::<Strategy>().unwrap(), Strategy::Concurrent);
        assert!("threads".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [Strategy::Sequential, Strategy::Concurrent] {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_run_five_pairs() {
        let config = BenchConfig::default().with_pair_count(5);
        for strategy in [Strategy::Sequential, Strategy::Concurrent] {
            let report = run(&config, strategy).unwrap();
            assert_eq!(report.matches, 1);
            assert_eq!(report.strategy, strategy);
            assert_eq!(report.generators.len(), 2);
            assert_eq!(report.comparator.values, 5);
            assert_eq!(report.total.label, "total");
        }
    }

    #[test]
    fn test_run_zero_pairs() {
        let config = BenchConfig::default().with_pair_count(0);
        let report = run(&config, Strategy::Concurrent).unwrap();
        assert_eq!(report.matches, 0);
        assert_eq!(report.total.per_value_ns(), 0.0);
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let config = BenchConfig::default()
            .with_pair_count(5)
            .with_streams(StreamParams::new(1, 0), StreamParams::new(1, 1));
        let err = run(&config, Strategy::Sequential).unwrap_err();
        assert!(matches!(err, DuelError::InvalidConfig(_)));
    }

    #[test]
    fn test_benchmark_strategies_agree() {
        let config = BenchConfig::default().with_pair_count(100_000);
        let report = benchmark(&config).unwrap();
        assert_eq!(report.sequential.matches, 3);
        assert_eq!(report.concurrent.matches, 3);
        assert_eq!(report.sequential.strategy, Strategy::Sequential);
        assert_eq!(report.concurrent.strategy, Strategy::Concurrent);
    }
}
