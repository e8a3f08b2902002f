use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use duelgen::{
    comparator::{count_matches, low_bits_match, LOW_BITS_MASK},
    generator::generate,
    results::SEPARATOR,
    runner, BenchConfig, BenchmarkReport, ConfigOverrides, DuelError, RunReport, Strategy,
};
use std::{num::NonZeroUsize, path::PathBuf, thread, time::Duration};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, DuelError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    /// Defaults to `bench` with a one second pause
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalOptions {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Number of values each generator produces
    #[arg(short = 'n', long, global = true)]
    pairs: Option<usize>,

    /// Seed of generator A
    #[arg(long, global = true)]
    seed_a: Option<u64>,

    /// Seed of generator B
    #[arg(long, global = true)]
    seed_b: Option<u64>,

    /// Multiplier of generator A
    #[arg(long, global = true)]
    factor_a: Option<u64>,

    /// Multiplier of generator B
    #[arg(long, global = true)]
    factor_b: Option<u64>,

    /// Threads in the concurrent runner's pool (at least 2)
    #[arg(short = 'j', long, global = true)]
    threads: Option<NonZeroUsize>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print the report as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sequential pipeline, then the concurrent one, and compare timings
    Bench {
        /// Pause after each run (e.g. 1s, 500ms)
        #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
        pause: Duration,
    },

    /// Run a single strategy
    Run {
        /// Strategy to run (sequential|concurrent)
        #[arg(short, long, default_value = "sequential")]
        strategy: Strategy,
    },

    /// Show the first values of both streams and their low 16 bits
    Preview {
        /// Number of values to show
        #[arg(short = 'k', long, default_value = "5")]
        count: usize,
    },
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = cli.options;

    let overrides = ConfigOverrides {
        seed_a: options.seed_a,
        seed_b: options.seed_b,
        factor_a: options.factor_a,
        factor_b: options.factor_b,
        pair_count: options.pairs,
        worker_threads: options.threads,
        log_level: options.log_level,
    };
    let config = BenchConfig::load_from(options.config.as_deref())?.merge_with_cli(overrides);
    config.validate()?;
    init_logging(&config.log_level);
    debug!("Effective configuration: {:?}", config);

    let command = cli.command.unwrap_or(Commands::Bench {
        pause: Duration::from_secs(1),
    });

    match command {
        Commands::Bench { pause } => {
            let report = runner::benchmark(&config)?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            print_run(&report.sequential);
            thread::sleep(pause);
            print_run(&report.concurrent);
            thread::sleep(pause);
            print_speedup(&report);
            Ok(())
        }
        Commands::Run { strategy } => {
            let report = runner::run(&config, strategy)?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_run(&report);
            }
            Ok(())
        }
        Commands::Preview { count } => {
            let a = generate(config.stream_a, count, config.divisor)?.value;
            let b = generate(config.stream_b, count, config.divisor)?.value;
            let matches = count_matches(a.as_slice(), b.as_slice(), count)?.value;

            if options.json {
                let preview = serde_json::json!({ "a": a, "b": b, "matches": matches });
                println!("{}", serde_json::to_string_pretty(&preview)?);
                return Ok(());
            }

            for (i, (&x, &y)) in a.as_slice().iter().zip(b.as_slice()).enumerate() {
                println!("{:>4}: A = {:>10}  B = {:>10}", i, x, y);
                println!("      A low bits: => {:032b}", x & LOW_BITS_MASK);
                println!("      B low bits: => {:032b}", y & LOW_BITS_MASK);
                if low_bits_match(x, y) {
                    println!("      {}", "match".green());
                }
            }
            println!("{}", SEPARATOR);
            println!("Matching pairs in first {}: => {}", count, matches);
            Ok(())
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // Logs go to stderr so stdout carries only the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_run(report: &RunReport) {
    let header = format!("=============== {} ===============", report.strategy);
    println!("{}", header.blue());
    println!("{}", report);
    println!("{}", "====================== DONE ======================".blue());
    println!();
}

fn print_speedup(report: &BenchmarkReport) {
    println!("{}", report.speedup_line().bold());
    println!();
    println!("{}", "====================== END ======================".blue());
}
