// driver.rs - Repeated runs and fatality-rate estimate

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::cell::Cell;
use crate::config::SimulationConfig;
use crate::render;
use crate::report::CsvReport;
use crate::simulation::Simulation;

pub const DEFAULT_SEED_PROB: f64 = 0.0055;
pub const FATALITY_RUNS: usize = 100;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: SimulationConfig,
    pub seed_prob: f64,                               // Fraction of cells infected at day 0
    pub runs: usize,
    pub csv: bool,
    pub frames: Option<PathBuf>,                      // Directory for per-generation bitmaps
    pub rng_seed: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: SimulationConfig::default(),
            seed_prob: DEFAULT_SEED_PROB,
            runs: 1,
            csv: false,
            frames: None,
            rng_seed: None,
        }
    }
}

impl RunOptions {
    /// Initial infections: at least one.
    pub fn seed_count(&self) -> usize {
        ((self.config.cell_count() as f64 * self.seed_prob) as usize).max(1)
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub run: usize,
    pub outcome: Cell,
    pub days: u32,
    pub csv: Option<CsvReport>,
}

impl RunReport {
    pub fn is_fatal(&self) -> bool {
        self.outcome == Cell::Dead
    }
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub reports: Vec<RunReport>,
}

impl Summary {
    pub fn dead_runs(&self) -> usize {
        self.reports.iter().filter(|r| r.is_fatal()).count()
    }

    /// Percentage of runs that ended with the population collapsed.
    pub fn fatality_rate(&self) -> f64 {
        if self.reports.is_empty() {
            return 0.0;
        }
        self.dead_runs() as f64 * 100.0 / self.reports.len() as f64
    }

    /// Every run's census rows under one header, in run order.
    pub fn csv(&self) -> CsvReport {
        let mut total = CsvReport::census();
        for report in self.reports.iter().filter_map(|r| r.csv.as_ref()) {
            total.extend_rows(report);
        }
        total
    }
}

/// Plays one epidemic to its end: seed, then step while infection remains.
pub fn run_once<R: Rng + ?Sized>(options: &RunOptions, run: usize, rng: &mut R) -> anyhow::Result<RunReport> {
    let mut sim = Simulation::new(options.config.clone())?;
    sim.seed(options.seed_count(), rng);

    let mut csv = options.csv.then(CsvReport::census);
    if let Some(dir) = &options.frames {
        std::fs::create_dir_all(dir)?;
    }

    while sim.status() == Cell::Infected {
        sim.random_step(rng)?;

        if let Some(csv) = csv.as_mut() {
            csv.write_census(sim.day_count(), sim.census())?;
        }
        if let Some(dir) = &options.frames {
            render::save(sim.generation(), dir.join(format!("run{run}_day{}.bmp", sim.day_count())))?;
        }
    }

    let outcome = sim.status();
    info!(run, days = sim.day_count(), ?outcome, "run finished");
    Ok(RunReport { run, outcome, days: sim.day_count(), csv })
}

fn run_rng(base: u64, run: usize) -> StdRng {
    StdRng::seed_from_u64(base.wrapping_add(run as u64))
}

/// Runs every simulation on the blocking pool and gathers reports in run order.
pub async fn run_all(options: RunOptions) -> anyhow::Result<Summary> {
    options.config.validate()?;
    if options.runs == 0 {
        warn!("no runs requested");
        return Ok(Summary { reports: Vec::new() });
    }

    let base = options.rng_seed.unwrap_or_else(rand::random);
    info!(runs = options.runs, rng_seed = base, "starting simulations");

    let options = std::sync::Arc::new(options);
    let mut handles = Vec::with_capacity(options.runs);
    for run in 0..options.runs {
        let options = std::sync::Arc::clone(&options);
        handles.push(tokio::task::spawn_blocking(move || {
            let mut rng = run_rng(base, run);
            run_once(&options, run, &mut rng)
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await??);
    }
    Ok(Summary { reports })
}
