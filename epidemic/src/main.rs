// main.rs - Command-line driver for epidemic runs

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use tracing::info;

use epidemic::config::{DEFAULT_DAY_CUTOFF, DEFAULT_TERMINAL_STATE};
use epidemic::driver::{self, DEFAULT_SEED_PROB, FATALITY_RUNS, RunOptions};
use epidemic::{HistoryRetention, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "epidemic")]
#[command(about = "Simulate an infection spreading over a population grid")]
struct Cli {
    /// Chance per generation of the long course (dead regrow, infected spoil first)
    #[arg(short = 'l', long, default_value_t = 0.05)]
    long_prob: f64,

    /// Chance per generation of the fatal course (dead stay dead)
    #[arg(short = 'd', long, default_value_t = 0.35)]
    dead_prob: f64,

    /// Healthy fraction below which the population counts as collapsed
    #[arg(short = 't', long, default_value_t = DEFAULT_TERMINAL_STATE)]
    terminal_state: f64,

    /// Fraction of cells infected at day 0
    #[arg(short = 's', long, default_value_t = DEFAULT_SEED_PROB)]
    seed_prob: f64,

    #[arg(short = 'r', long, default_value_t = 700)]
    rows: usize,

    #[arg(short = 'c', long, default_value_t = 700)]
    columns: usize,

    /// Write per-generation census rows to a CSV file
    #[arg(short = 'o', long)]
    csv: bool,

    /// Where `--csv` writes its rows
    #[arg(long, default_value = "simulation.csv")]
    csv_path: PathBuf,

    /// Repeat the simulation and report the fatality rate
    #[arg(short = 'f', long)]
    fatality_rate: bool,

    /// Number of runs (overrides the fatality-rate default)
    #[arg(long)]
    runs: Option<usize>,

    /// Save a bitmap of every generation into this directory
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Keep this many past generations in memory
    #[arg(long)]
    history: Option<usize>,

    /// Generations after which a run is declared dead
    #[arg(long, default_value_t = DEFAULT_DAY_CUTOFF)]
    day_cutoff: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    rng_seed: Option<u64>,
}

impl Cli {
    fn into_options(self) -> (RunOptions, Option<PathBuf>) {
        let history = match self.history {
            Some(depth) => HistoryRetention::Bounded(depth),
            None => HistoryRetention::Disabled,
        };
        let config = SimulationConfig::new(self.rows, self.columns, self.long_prob, self.dead_prob, self.terminal_state)
            .with_history(history)
            .with_day_cutoff(self.day_cutoff);
        let runs = self.runs.unwrap_or(if self.fatality_rate { FATALITY_RUNS } else { 1 });

        let options = RunOptions {
            config,
            seed_prob: self.seed_prob,
            runs,
            csv: self.csv,
            frames: self.frames,
            rng_seed: self.rng_seed,
        };
        (options, self.csv.then_some(self.csv_path))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let report_rate = cli.fatality_rate || cli.runs.is_some_and(|n| n > 1);
    let (options, csv_path) = cli.into_options();

    if let Err(err) = options.config.validate() {
        bail!("invalid configuration: {err}");
    }
    if !(0.0..=1.0).contains(&options.seed_prob) {
        bail!("seed_prob = {} must be between 0.0 and 1.0", options.seed_prob);
    }

    let summary = driver::run_all(options).await?;

    for report in &summary.reports {
        let label = if report.is_fatal() { "DEAD" } else { "ALIVE" };
        println!("{label}: {}", report.days);
    }
    if report_rate {
        println!("Fatality rate is {:.2}%", summary.fatality_rate());
    }

    if let Some(path) = csv_path {
        summary.csv().write_to_file(&path)?;
        info!(path = %path.display(), "census written");
    }
    Ok(())
}
