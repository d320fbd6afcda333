mod automaton;
mod simulation;

pub use automaton::{Automaton, StepReport};
pub use simulation::Simulation;
