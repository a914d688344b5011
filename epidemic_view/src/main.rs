// main.rs - Interactive viewer for the epidemic automaton
// Drives one simulation generation by generation; painting lives in ui.rs

use eframe::egui;
use egui::Color32;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use tracing::{error, info};

use epidemic::{Cell, Policy, Simulation, SimulationConfig, SimulationError};

mod ui;

pub const GRID_SIZE: usize = 60;                      // Rows and columns shown in the viewer
pub const SEED_COUNT: usize = 3;                      // Infections placed by Reseed

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let view = EpidemicView::new(SimulationConfig {
        rows: GRID_SIZE,
        columns: GRID_SIZE,
        ..SimulationConfig::default()
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Epidemic Automaton",
        options,
        Box::new(|_cc| Box::new(view)),
    )?;
    Ok(())
}

/// Which policy the next step uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyChoice {
    Random,
    Fixed(Policy),
}

pub const POLICY_CHOICES: &[(&str, PolicyChoice)] = &[
    ("Random", PolicyChoice::Random),
    ("Long course", PolicyChoice::Fixed(Policy::LONG)),
    ("Fatal course", PolicyChoice::Fixed(Policy::FATAL)),
    ("Default course", PolicyChoice::Fixed(Policy::DEFAULT)),
];

pub struct EpidemicView {
    sim: Simulation,
    blank: Simulation,                                // Day 0, nothing infected
    rng: StdRng,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub healthy_color: Color32,
    pub infected_color: Color32,
    pub dead_color: Color32,
    pub selected_policy: usize,
    pub last_policy: Option<Policy>,
}

impl EpidemicView {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let blank = Simulation::new(config)?;
        let [hr, hg, hb] = epidemic::render::HEALTHY_RGB;
        let [ir, ig, ib] = epidemic::render::INFECTED_RGB;
        let [dr, dg, db] = epidemic::render::DEAD_RGB;

        let mut view = Self {
            sim: blank.clone(),
            blank,
            rng: StdRng::from_entropy(),
            is_running: false,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(200),
            healthy_color: Color32::from_rgb(hr, hg, hb),
            infected_color: Color32::from_rgb(ir, ig, ib),
            dead_color: Color32::from_rgb(dr, dg, db),
            selected_policy: 0,
            last_policy: None,
        };
        view.reseed();
        Ok(view)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn update_generation(&mut self) {
        let result = match POLICY_CHOICES[self.selected_policy].1 {
            PolicyChoice::Random => self.sim.random_step(&mut self.rng),
            PolicyChoice::Fixed(policy) => self.sim.apply(policy).map(|_| policy),
        };
        match result {
            Ok(policy) => self.last_policy = Some(policy),
            Err(err) => {
                error!(%err, "step failed");
                self.is_running = false;
                return;
            }
        }

        if self.sim.status() != Cell::Infected {
            info!(day = self.sim.day_count(), outcome = ?self.sim.status(), "epidemic over");
            self.is_running = false;
        }
    }

    pub fn clear_grid(&mut self) {
        self.sim = self.blank.clone();
        self.last_policy = None;
    }

    pub fn reseed(&mut self) {
        self.clear_grid();
        self.sim.seed(SEED_COUNT, &mut self.rng);
    }

    pub fn infect_cell(&mut self, row: usize, col: usize) {
        if row < self.sim.generation().rows() && col < self.sim.generation().columns() {
            self.sim.infect(row, col);
        }
    }

    pub fn cell_color(&self, cell: Cell) -> Color32 {
        match cell {
            Cell::Healthy => self.healthy_color,
            Cell::Infected | Cell::Spoiled => self.infected_color,
            Cell::Dead => self.dead_color,
        }
    }
}
