use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{DuelError, DuelResult};
use crate::generator::{MAX_DIVISOR, MAX_FACTOR};

/// Modulus shared by both generators: 2^31 - 1
pub const DIVISOR: u64 = 2_147_483_647;

/// Number of values each generator produces per run
pub const PAIR_COUNT: usize = 40_000_000;

pub const SEED_A: u64 = 65;
pub const SEED_B: u64 = 8921;
pub const FACTOR_A: u64 = 16807;
pub const FACTOR_B: u64 = 48271;

/// Seed and multiplier of one generator instance.
///
/// `factor` must lie in `1..=u32::MAX`; together with `divisor <= i32::MAX` this keeps
/// every `previous * factor` product inside `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamParams {
    pub seed: u64,
    pub factor: u64,
}

impl StreamParams {
    pub const fn new(seed: u64, factor: u64) -> Self {
        Self { seed, factor }
    }
}

/// Configuration for a benchmark run.
///
/// # Configuration Locations
///
/// Loaded from the following locations, later ones overriding earlier ones:
/// 1. Global `$HOME/.config/duelgen/config.yaml`
/// 2. Local `.duelgen.yaml` in the current directory
/// 3. Custom config file given via `--config`
///
/// # Configuration Format
///
/// ```yaml
/// stream_a:
///   seed: 65
///   factor: 16807
/// stream_b:
///   seed: 8921
///   factor: 48271
///
/// # Values produced per generator
/// pair_count: 40000000
///
/// # Modulus, 2..=2147483647
/// divisor: 2147483647
///
/// # Threads in the concurrent runner's pool (at least 2)
/// worker_threads: 2
///
/// log_level: "warn"
/// ```
///
/// Every field has a default equal to the compiled-in constants, so an empty file is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Parameters of generator A
    #[serde(default = "default_stream_a")]
    pub stream_a: StreamParams,

    /// Parameters of generator B
    #[serde(default = "default_stream_b")]
    pub stream_b: StreamParams,

    /// Number of values each generator produces. Zero yields empty streams.
    #[serde(default = "default_pair_count")]
    pub pair_count: usize,

    /// Modulus applied after every multiplication
    #[serde(default = "default_divisor")]
    pub divisor: u64,

    /// Size of the thread pool backing the concurrent runner.
    /// Each worker blocks on its rendezvous send, so fewer than two threads could
    /// leave the second worker unscheduled while the first waits to be received.
    #[serde(default = "default_worker_threads")]
    pub worker_threads: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_stream_a() -> StreamParams {
    StreamParams::new(SEED_A, FACTOR_A)
}

fn default_stream_b() -> StreamParams {
    StreamParams::new(SEED_B, FACTOR_B)
}

fn default_pair_count() -> usize {
    PAIR_COUNT
}

fn default_divisor() -> u64 {
    DIVISOR
}

fn default_worker_threads() -> NonZeroUsize {
    NonZeroUsize::MIN.saturating_add(1)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            stream_a: default_stream_a(),
            stream_b: default_stream_b(),
            pair_count: default_pair_count(),
            divisor: default_divisor(),
            worker_threads: default_worker_threads(),
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line. `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed_a: Option<u64>,
    pub seed_b: Option<u64>,
    pub factor_a: Option<u64>,
    pub factor_b: Option<u64>,
    pub pair_count: Option<usize>,
    pub worker_threads: Option<NonZeroUsize>,
    pub log_level: Option<String>,
}

impl BenchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> DuelResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus an explicit file.
    /// The explicit file must exist; the default locations are optional.
    /// Values are not range-checked here; call [`BenchConfig::validate`] once
    /// command line overrides have been merged.
    pub fn load_from(config_path: Option<&Path>) -> DuelResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            dirs::config_dir().map(|p| p.join("duelgen/config.yaml")),
            Some(PathBuf::from(".duelgen.yaml")),
        ];

        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Range checks run in `validate`, after command line overrides are merged
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges command line values over configuration file values
    pub fn merge_with_cli(mut self, cli: ConfigOverrides) -> Self {
        if let Some(seed) = cli.seed_a {
            self.stream_a.seed = seed;
        }
        if let Some(seed) = cli.seed_b {
            self.stream_b.seed = seed;
        }
        if let Some(factor) = cli.factor_a {
            self.stream_a.factor = factor;
        }
        if let Some(factor) = cli.factor_b {
            self.stream_b.factor = factor;
        }
        if let Some(count) = cli.pair_count {
            self.pair_count = count;
        }
        if let Some(threads) = cli.worker_threads {
            self.worker_threads = threads;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }

    /// Checks every field against its documented range
    pub fn validate(&self) -> DuelResult<()> {
        if !(2..=MAX_DIVISOR).contains(&self.divisor) {
            return Err(DuelError::invalid_config(format!(
                "divisor must be in 2..={}, got {}",
                MAX_DIVISOR,
                self.divisor
            )));
        }

        for (name, params) in [("stream_a", &self.stream_a), ("stream_b", &self.stream_b)] {
            if !(1..=MAX_FACTOR).contains(&params.factor) {
                return Err(DuelError::invalid_config(format!(
                    "{}.factor must be in 1..={}, got {}",
                    name,
                    MAX_FACTOR,
                    params.factor
                )));
            }
        }

        if self.worker_threads.get() < 2 {
            return Err(DuelError::invalid_config(format!(
                "worker_threads must be at least 2, got {}",
                self.worker_threads
            )));
        }

        Ok(())
    }

    /// Builder method to set the number of values per stream
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Builder method to set the concurrent runner's pool size
    pub fn with_worker_threads(mut self, threads: NonZeroUsize) -> Self {
        self.worker_threads = threads;
        self
    }

    /// Builder method to replace both generators' parameters
    pub fn with_streams(mut self, stream_a: StreamParams, stream_b: StreamParams) -> Self {
        self.stream_a = stream_a;
        self.stream_b = stream_b;
        self
    }

    /// Builder method to set the modulus
    pub fn with_divisor(mut self, divisor: u64) -> Self {
        self.divisor = divisor;
        self
    }
}
