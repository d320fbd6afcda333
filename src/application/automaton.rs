use crate::config::SimulationConfig;
use crate::domain::{
    Algorithm, AutomatonError, Cell, Grid, Result, RuleConfig, RuleHandle, evolve_into,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Summary of one completed generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    /// Some cell saw at least one live neighbour in the previous generation
    pub any_live_neighbour_observed: bool,
    /// Cells whose alive flag flipped this generation
    pub changed_cells: usize,
    pub population: usize,
}

/// The automaton engine: a live grid, its snapshot, and the rule handle.
///
/// The harness drives it with `step`, reads `generation`, `done` and per-cell
/// state afterwards, and issues `reset` / `clear` commands.
pub struct Automaton {
    cells: Grid,
    snapshot: Grid,
    rules: RuleHandle,
    algorithm: Algorithm,
    alive_probability: f64,
    rng: StdRng,
    generation: u64,
    done: bool,
    last_pass: Option<StepReport>,
}

fn clamp_probability(percent: f64) -> Result<f64> {
    if !percent.is_finite() {
        return Err(AutomatonError::InvalidConfiguration(format!(
            "alive probability must be a finite percentage, got {percent}"
        )));
    }
    let clamped = percent.clamp(0.0, 100.0);
    if clamped != percent {
        log::warn!("alive probability {percent}% clamped to {clamped}%");
    }
    Ok(clamped)
}

impl Automaton {
    /// Allocate a `width x height x depth` automaton and seed it randomly,
    /// each cell alive with `alive_probability` percent chance.
    pub fn new(width: usize, height: usize, depth: usize, alive_probability: f64) -> Result<Self> {
        Self::build(width, height, depth, alive_probability, StdRng::from_os_rng())
    }

    /// Same as `new` with a deterministic RNG
    pub fn with_seed(
        width: usize,
        height: usize,
        depth: usize,
        alive_probability: f64,
        seed: u64,
    ) -> Result<Self> {
        Self::build(width, height, depth, alive_probability, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut automaton = Self::build(
            config.width,
            config.height,
            config.depth,
            config.alive_probability,
            rng,
        )?;
        automaton.rules.set(config.rules)?;
        automaton.algorithm = config.algorithm;
        Ok(automaton)
    }

    fn build(
        width: usize,
        height: usize,
        depth: usize,
        alive_probability: f64,
        rng: StdRng,
    ) -> Result<Self> {
        let alive_probability = clamp_probability(alive_probability)?;
        let cells = Grid::new(width, height, depth)?;
        let snapshot = cells.clone();

        let mut automaton = Self {
            cells,
            snapshot,
            rules: RuleHandle::default(),
            algorithm: Algorithm::default(),
            alive_probability,
            rng,
            generation: 0,
            done: false,
            last_pass: None,
        };
        automaton.reset();
        log::debug!(
            "created {width}x{height}x{depth} automaton, {} cells alive",
            automaton.population()
        );
        Ok(automaton)
    }

    /// Share an existing rule handle (e.g. one bound to UI controls)
    pub fn with_rules(mut self, rules: RuleHandle) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Advance exactly one generation.
    pub fn step(&mut self) -> StepReport {
        // Rule values are read once per generation so edits land on the next step
        let table = self.rules.snapshot().lookup_table();

        self.snapshot.copy_from(&self.cells);
        self.generation += 1;

        let stats = evolve_into(&self.snapshot, &mut self.cells, &table, self.algorithm);

        if !stats.any_live_neighbour && !self.done {
            log::debug!("generation {}: no live neighbours observed, done", self.generation);
            self.done = true;
        }

        let report = StepReport {
            generation: self.generation,
            any_live_neighbour_observed: stats.any_live_neighbour,
            changed_cells: stats.changed_cells,
            population: stats.population,
        };
        log::trace!("{report:?}");
        self.last_pass = Some(report);
        report
    }

    /// Run `n` generations, returning the report of the last one
    pub fn step_n(&mut self, n: u64) -> Option<StepReport> {
        (0..n).map(|_| self.step()).last()
    }

    /// Reseed every cell from the configured probability. Keeps the
    /// generation counter and neighbour counts; clears `done`.
    pub fn reset(&mut self) {
        self.cells.randomize(&mut self.rng, self.alive_probability);
        self.done = false;
        log::debug!(
            "reset at generation {}: {} cells alive",
            self.generation,
            self.cells.count_alive()
        );
    }

    /// Kill every cell. Generation, neighbour counts and `done` are untouched.
    pub fn clear(&mut self) {
        self.cells.clear();
        log::debug!("cleared at generation {}", self.generation);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a step observed no live neighbour anywhere in the grid
    pub fn done(&self) -> bool {
        self.done
    }

    /// Whether the last step saw any live neighbour; `None` before the first step
    pub fn any_live_neighbour_observed(&self) -> Option<bool> {
        self.last_pass.map(|report| report.any_live_neighbour_observed)
    }

    /// Whether the last step flipped any cell; `Some(false)` means a still life
    pub fn any_cell_changed(&self) -> Option<bool> {
        self.last_pass.map(|report| report.changed_cells > 0)
    }

    pub fn last_report(&self) -> Option<StepReport> {
        self.last_pass
    }

    pub fn dimensions(&self) -> (usize, usize, usize) {
        self.cells.dimensions()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Alive flag at (x, y, z); false outside the grid
    pub fn is_alive(&self, x: usize, y: usize, z: usize) -> bool {
        self.cells.get(x, y, z).is_some_and(Cell::is_alive)
    }

    pub fn cell(&self, x: usize, y: usize, z: usize) -> Option<Cell> {
        self.cells.get(x, y, z)
    }

    /// Paint a single cell; out-of-bounds writes are ignored
    pub fn set_alive(&mut self, x: usize, y: usize, z: usize, alive: bool) {
        self.cells.set_alive(x, y, z, alive);
    }

    pub fn population(&self) -> usize {
        self.cells.count_alive()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, usize, Cell)> + '_ {
        self.cells.iter_cells()
    }

    pub fn grid(&self) -> &Grid {
        &self.cells
    }

    pub fn alive_probability(&self) -> f64 {
        self.alive_probability
    }

    /// Takes effect on the next `reset`
    pub fn set_alive_probability(&mut self, percent: f64) -> Result<()> {
        self.alive_probability = clamp_probability(percent)?;
        Ok(())
    }

    /// Handle to the live rule configuration
    pub fn rules(&self) -> RuleHandle {
        self.rules.clone()
    }

    pub fn rule_config(&self) -> RuleConfig {
        self.rules.snapshot()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }
}
