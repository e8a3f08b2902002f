//! One worker per stream, each handing its finished stream back through a
//! rendezvous channel.
//!
//! Worker lifecycle: created, running, produced result, channel closed, terminated.
//! A worker sends exactly once and then drops its sender, which closes the channel.
//! The orchestrator receives from stream A's channel first, then stream B's.
//! Nothing is shared between workers; each owns its parameters and output.

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::mpsc::{sync_channel, Receiver};
use tracing::{debug, error, trace, warn};

use super::StreamPair;
use crate::config::BenchConfig;
use crate::errors::{DuelError, DuelResult};
use crate::generator::{Lcg, Stream};
use crate::metrics::Timed;

/// Generates both streams in parallel and waits for A, then B.
///
/// The pool is built per call, so a run's total time includes starting the
/// worker threads. Range checks happen when each [`Lcg`] is built, before any
/// worker is spawned.
pub fn generate_pair(config: &BenchConfig) -> DuelResult<StreamPair> {
    let lcg_a = Lcg::new(config.stream_a, config.divisor)?;
    let lcg_b = Lcg::new(config.stream_b, config.divisor)?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(config.worker_threads.get())
        .thread_name(|i| format!("duelgen-worker-{}", i))
        .panic_handler(|_| error!("Generator worker panicked"))
        .build()?;

    let values_a = spawn_worker(&pool, config.stream_a.seed, lcg_a, config.pair_count);
    let values_b = spawn_worker(&pool, config.stream_b.seed, lcg_b, config.pair_count);

    let a = receive(&values_a, config.stream_a.seed)?;
    let b = receive(&values_b, config.stream_b.seed)?;

    Ok(StreamPair { a, b })
}

fn spawn_worker(
    pool: &ThreadPool,
    seed: u64,
    lcg: Lcg,
    pair_count: usize,
) -> Receiver<Timed<Stream>> {
    // Capacity zero: the send completes only once the orchestrator receives
    let (sender, receiver) = sync_channel(0);

    pool.spawn(move || {
        trace!("worker{} running", seed);
        let timed = lcg.into_stream(format!("worker{}", seed), pair_count);
        trace!("worker{} produced {} values", seed, timed.value.len());

        if sender.send(timed).is_err() {
            warn!("worker{}: orchestrator stopped waiting, dropping stream", seed);
        }
        drop(sender);
        trace!("worker{} channel closed", seed);
    });

    receiver
}

fn receive(receiver: &Receiver<Timed<Stream>>, seed: u64) -> DuelResult<Timed<Stream>> {
    let timed = receiver
        .recv()
        .map_err(|_| DuelError::worker_disconnected(seed))?;
    debug!("Received stream for seed {}", seed);
    Ok(timed)
}
