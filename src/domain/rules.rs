use super::cell::MAX_NEIGHBOURS;
use super::error::{AutomatonError, Result};
use serde::Deserialize;
use std::sync::{Arc, PoisonError, RwLock};

/// Survival band plus a single birth count.
///
/// A live cell survives while `min_neighbours <= n <= max_neighbours`;
/// a dead cell is born when `n == birth_neighbours`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    pub min_neighbours: u8,
    pub max_neighbours: u8,
    pub birth_neighbours: u8,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_neighbours: 4,
            max_neighbours: 6,
            birth_neighbours: 5,
        }
    }
}

fn check_threshold(name: &str, value: u8) -> Result<()> {
    if value > MAX_NEIGHBOURS {
        return Err(AutomatonError::InvalidConfiguration(format!(
            "{name} must be between 0 and {MAX_NEIGHBOURS}, got {value}"
        )));
    }
    Ok(())
}

impl RuleConfig {
    /// Ensure every threshold is a reachable neighbour count
    pub fn validate(&self) -> Result<()> {
        check_threshold("min_neighbours", self.min_neighbours)?;
        check_threshold("max_neighbours", self.max_neighbours)?;
        check_threshold("birth_neighbours", self.birth_neighbours)
    }

    /// Birth/survival notation, e.g. `B5/S4-6`
    pub fn description(&self) -> String {
        format!(
            "B{}/S{}-{}",
            self.birth_neighbours, self.min_neighbours, self.max_neighbours
        )
    }

    /// Next alive state for a cell that was `alive` with `neighbours` live neighbours
    #[inline]
    pub const fn next_alive(&self, alive: bool, neighbours: u8) -> bool {
        if alive {
            neighbours >= self.min_neighbours && neighbours <= self.max_neighbours
        } else {
            neighbours == self.birth_neighbours
        }
    }

    /// Precompute the outcome for every (alive, count) pair.
    /// Index format: `(alive as usize) * 27 + neighbours`.
    pub fn lookup_table(&self) -> RuleTable {
        let mut table = [false; 2 * RULE_TABLE_STRIDE];
        for neighbours in 0..=MAX_NEIGHBOURS {
            table[neighbours as usize] = self.next_alive(false, neighbours);
            table[RULE_TABLE_STRIDE + neighbours as usize] = self.next_alive(true, neighbours);
        }
        RuleTable(table)
    }
}

const RULE_TABLE_STRIDE: usize = MAX_NEIGHBOURS as usize + 1;

/// Rule outcomes frozen for the duration of one generation
#[derive(Clone, Copy, Debug)]
pub struct RuleTable([bool; 2 * RULE_TABLE_STRIDE]);

impl RuleTable {
    #[inline]
    pub fn next_alive(&self, alive: bool, neighbours: u8) -> bool {
        self.0[alive as usize * RULE_TABLE_STRIDE + neighbours as usize]
    }
}

/// Shared, live-editable rule configuration.
///
/// Clones point at the same values, so a UI can hold one handle while the
/// automaton holds another. The automaton copies the values at the start of
/// each step.
#[derive(Clone, Debug, Default)]
pub struct RuleHandle {
    inner: Arc<RwLock<RuleConfig>>,
}

impl RuleHandle {
    pub fn new(config: RuleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(config)),
        })
    }

    /// Copy of the current values
    pub fn snapshot(&self) -> RuleConfig {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, edit: impl FnOnce(&mut RuleConfig)) -> Result<()> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = *guard;
        edit(&mut next);
        next.validate()?;
        *guard = next;
        Ok(())
    }

    /// Replace every threshold at once
    pub fn set(&self, config: RuleConfig) -> Result<()> {
        self.update(|current| *current = config)
    }

    pub fn min_neighbours(&self) -> u8 {
        self.snapshot().min_neighbours
    }

    pub fn set_min_neighbours(&self, value: u8) -> Result<()> {
        self.update(|config| config.min_neighbours = value)
    }

    pub fn max_neighbours(&self) -> u8 {
        self.snapshot().max_neighbours
    }

    pub fn set_max_neighbours(&self, value: u8) -> Result<()> {
        self.update(|config| config.max_neighbours = value)
    }

    pub fn birth_neighbours(&self) -> u8 {
        self.snapshot().birth_neighbours
    }

    pub fn set_birth_neighbours(&self, value: u8) -> Result<()> {
        self.update(|config| config.birth_neighbours = value)
    }
}
