//! Headless runner: builds a simulation from a TOML file and/or flags and
//! steps it at the configured pace, logging one line per generation.

use anyhow::{Context, Result};
use clap::Parser;
use life3d::{Algorithm, Simulation, SimulationConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "life3d")]
#[command(version)]
#[command(about = "Run a 3D life automaton without a renderer")]
struct Cli {
    /// TOML configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long)]
    depth: Option<usize>,

    /// Chance, in percent, that a cell starts alive.
    #[arg(long)]
    probability: Option<f64>,

    /// Fixed RNG seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Generations per second.
    #[arg(long)]
    ups: Option<f32>,

    /// Stop after this many generations (runs until a still life otherwise).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    generations: Option<u64>,

    /// Stop when no cell has a live neighbour instead of reseeding.
    #[arg(long)]
    stop_when_done: bool,

    /// Evaluate each generation on one thread.
    #[arg(long)]
    serial: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(probability) = self.probability {
            config.alive_probability = probability;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(ups) = self.ups {
            config.updates_per_second = ups;
        }
        if self.serial {
            config.algorithm = Algorithm::Serial;
        }
        if self.stop_when_done {
            config.reset_on_done = false;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    let cli = Cli::parse();
    Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    let config = cli.simulation_config()?;
    let mut sim = Simulation::from_config(&config).context("building automaton")?;
    sim.resume();

    log::info!(
        "{}x{}x{} grid, {} cells alive, rule {}, {} stepping at {} gen/s",
        config.width,
        config.height,
        config.depth,
        sim.automaton.population(),
        config.rules.description(),
        sim.automaton.algorithm().name(),
        sim.updates_per_second,
    );

    let mut last_frame = Instant::now();
    while sim.is_running {
        std::thread::sleep(Duration::from_secs_f32(sim.update_interval()));
        let now = Instant::now();
        let delta = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        let Some(report) = sim.tick(delta) else {
            continue;
        };
        log::info!(
            "generation {:>5}: population {:>7}, changed {:>7}, {:.2} ms",
            report.generation,
            report.population,
            report.changed_cells,
            sim.last_step_time_ms,
        );

        if report.changed_cells == 0 {
            log::info!("still life reached at generation {}", report.generation);
            sim.pause();
        }
        if cli.generations.is_some_and(|limit| report.generation >= limit) {
            sim.pause();
        }
    }

    log::info!(
        "stopped at generation {} (done: {}), {} cells alive",
        sim.automaton.generation(),
        sim.automaton.done(),
        sim.automaton.population(),
    );
    Ok(())
}
