// Domain layer - Core automaton logic
pub mod domain;

// Application layer - Engine and harness pacing
pub mod application;

// Configuration loading
pub mod config;

// Re-exports for convenience
pub use domain::{Algorithm, AutomatonError, Cell, Grid, RuleConfig, RuleHandle};
pub use application::{Automaton, Simulation, StepReport};
pub use config::SimulationConfig;
