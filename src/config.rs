//! Simulation configuration, loadable from TOML.
//!
//! ```toml
//! width = 40
//! height = 40
//! depth = 40
//! alive_probability = 5.0
//! seed = 42
//! algorithm = "parallel"
//! updates_per_second = 10.0
//! reset_on_done = true
//!
//! [rules]
//! min_neighbours = 4
//! max_neighbours = 6
//! birth_neighbours = 5
//! ```

use crate::domain::{Algorithm, AutomatonError, Result, RuleConfig};
use serde::Deserialize;
use std::path::Path;

pub const MIN_UPDATES_PER_SECOND: f32 = 1.0;
pub const MAX_UPDATES_PER_SECOND: f32 = 60.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    /// Chance, in percent, that a cell starts alive on reset
    pub alive_probability: f64,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
    pub rules: RuleConfig,
    pub algorithm: Algorithm,
    pub updates_per_second: f32,
    /// Reseed instead of stopping once no cell has a live neighbour
    pub reset_on_done: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            depth: 50,
            alive_probability: 5.0,
            seed: None,
            rules: RuleConfig::default(),
            algorithm: Algorithm::default(),
            updates_per_second: 10.0,
            reset_on_done: true,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Reject values the automaton cannot be built from.
    /// Dimensions are checked again when the grid is allocated.
    pub fn validate(&self) -> Result<()> {
        if !self.alive_probability.is_finite() {
            return Err(AutomatonError::InvalidConfiguration(format!(
                "alive_probability must be a finite percentage, got {}",
                self.alive_probability
            )));
        }
        if !(MIN_UPDATES_PER_SECOND..=MAX_UPDATES_PER_SECOND).contains(&self.updates_per_second) {
            return Err(AutomatonError::InvalidConfiguration(format!(
                "updates_per_second must be between {MIN_UPDATES_PER_SECOND} and {MAX_UPDATES_PER_SECOND}, got {}",
                self.updates_per_second
            )));
        }
        self.rules.validate()
    }
}
