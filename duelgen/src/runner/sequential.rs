use tracing::debug;

use super::StreamPair;
use crate::config::BenchConfig;
use crate::errors::DuelResult;
use crate::generator::generate;

/// Generates stream A, then stream B, on the calling thread
pub fn generate_pair(config: &BenchConfig) -> DuelResult<StreamPair> {
    let a = generate(config.stream_a, config.pair_count, config.divisor)?;
    debug!("Stream A ready, starting stream B");
    let b = generate(config.stream_b, config.pair_count, config.divisor)?;
    Ok(StreamPair { a, b })
}
