mod cell;
mod grid;
mod rules;
mod algorithm;
mod error;
pub mod evolve;

pub use cell::{Cell, MAX_NEIGHBOURS};
pub use grid::Grid;
pub use rules::{RuleConfig, RuleHandle, RuleTable};
pub use algorithm::Algorithm;
pub use error::{AutomatonError, Result};
pub use evolve::{PassStats, evolve_into};
