use super::automaton::{Automaton, StepReport};
use crate::config::{MAX_UPDATES_PER_SECOND, MIN_UPDATES_PER_SECOND, SimulationConfig};
use crate::domain::Result;

/// Simulation paces an automaton for a driving harness.
/// This is the application layer that turns frame time into generations
/// and routes play/pause, reset and clear commands.
pub struct Simulation {
    pub automaton: Automaton,
    pub is_running: bool,
    pub update_timer: f32,
    pub updates_per_second: f32,
    pub last_step_time_ms: f32,
    /// Reseed and keep running when the automaton reports done
    pub reset_on_done: bool,
}

impl Simulation {
    /// Wrap an automaton; starts paused at 10 generations per second and
    /// reseeds whenever the automaton finishes
    pub fn new(automaton: Automaton) -> Self {
        Self {
            automaton,
            is_running: false,
            update_timer: 0.0,
            updates_per_second: 10.0,
            last_step_time_ms: 0.0,
            reset_on_done: true,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let automaton = Automaton::from_config(config)?;
        Ok(Self::new(automaton)
            .with_speed(config.updates_per_second)
            .with_reset_on_done(config.reset_on_done))
    }

    /// Set running state (builder pattern)
    pub fn with_running(mut self, running: bool) -> Self {
        self.is_running = running;
        self
    }

    pub fn with_speed(mut self, updates_per_second: f32) -> Self {
        self.set_speed(updates_per_second);
        self
    }

    pub fn with_reset_on_done(mut self, reset_on_done: bool) -> Self {
        self.reset_on_done = reset_on_done;
        self
    }

    /// Clamp to the supported pace; NaN and infinities keep the current speed
    fn set_speed(&mut self, updates_per_second: f32) {
        if !updates_per_second.is_finite() {
            log::warn!("ignoring non-finite speed {updates_per_second}");
            return;
        }
        self.updates_per_second =
            updates_per_second.clamp(MIN_UPDATES_PER_SECOND, MAX_UPDATES_PER_SECOND);
    }

    pub fn toggle_running(&mut self) {
        self.is_running = !self.is_running;
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Resume stepping; a finished automaton must be reset first
    pub fn resume(&mut self) {
        self.is_running = !self.automaton.done();
    }

    /// Adjust simulation speed
    pub fn adjust_speed(&mut self, delta: f32) {
        self.set_speed(self.updates_per_second + delta);
    }

    /// Seconds between generations at the current speed
    pub fn update_interval(&self) -> f32 {
        1.0 / self.updates_per_second
    }

    /// Reseed the grid and pause
    pub fn reset(&mut self) {
        self.automaton.reset();
        self.is_running = false;
        self.update_timer = 0.0;
    }

    /// Kill every cell and pause
    pub fn clear(&mut self) {
        self.automaton.clear();
        self.is_running = false;
        self.update_timer = 0.0;
    }

    /// Advance the clock by `delta_time` seconds, stepping once when the
    /// interval has elapsed. When the automaton is done it is reseeded
    /// (`reset_on_done`) or the simulation pauses.
    pub fn tick(&mut self, delta_time: f32) -> Option<StepReport> {
        if !self.is_running {
            return None;
        }

        self.update_timer += delta_time;
        if self.update_timer < self.update_interval() {
            return None;
        }

        let start = std::time::Instant::now();
        let report = self.automaton.step();
        self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.update_timer = 0.0;

        if self.automaton.done() {
            if self.reset_on_done {
                log::info!("automaton finished at generation {}, reseeding", report.generation);
                self.automaton.reset();
            } else {
                log::info!("automaton finished at generation {}", report.generation);
                self.is_running = false;
            }
        }

        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(probability: f64) -> Simulation {
        let automaton = Automaton::with_seed(6, 6, 6, probability, 4).unwrap();
        Simulation::new(automaton).with_running(true)
    }

    #[test]
    fn test_paused_tick_does_nothing() {
        let mut sim = running(30.0).with_running(false);
        assert_eq!(sim.tick(10.0), None);
        assert_eq!(sim.automaton.generation(), 0);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut sim = running(30.0).with_speed(10.0);
        assert_eq!(sim.tick(0.05), None);
        let report = sim.tick(0.06).unwrap();
        assert_eq!(report.generation, 1);
        // Timer restarts after a step
        assert_eq!(sim.tick(0.05), None);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut sim = running(30.0).with_speed(500.0);
        assert_eq!(sim.updates_per_second, MAX_UPDATES_PER_SECOND);
        sim.adjust_speed(-1000.0);
        assert_eq!(sim.updates_per_second, MIN_UPDATES_PER_SECOND);
        sim.adjust_speed(4.0);
        assert_eq!(sim.updates_per_second, 5.0);
    }

    #[test]
    fn test_non_finite_speed_ignored() {
        let mut sim = running(30.0).with_speed(f32::NAN);
        assert_eq!(sim.updates_per_second, 10.0);
        sim.adjust_speed(f32::INFINITY);
        assert_eq!(sim.updates_per_second, 10.0);
        assert!(sim.update_interval().is_finite());

        // Still waits for the interval instead of stepping every call
        assert_eq!(sim.tick(0.05), None);
    }

    #[test]
    fn test_toggle_running() {
        let mut sim = running(30.0);
        sim.toggle_running();
        assert!(!sim.is_running);
        sim.toggle_running();
        assert!(sim.is_running);
    }

    #[test]
    fn test_done_pauses_without_reset_on_done() {
        let mut sim = running(0.0).with_reset_on_done(false);
        let report = sim.tick(1.0).unwrap();
        assert!(!report.any_live_neighbour_observed);
        assert!(sim.automaton.done());
        assert!(!sim.is_running);

        // Cannot resume until reset
        sim.resume();
        assert!(!sim.is_running);
        sim.reset();
        sim.resume();
        assert!(sim.is_running);
    }

    #[test]
    fn test_done_reseeds_and_keeps_running() {
        let mut sim = running(0.0);
        sim.automaton.set_alive_probability(30.0).unwrap();

        let report = sim.tick(1.0).unwrap();
        assert!(!report.any_live_neighbour_observed);
        assert_eq!(report.population, 0);

        assert!(sim.is_running);
        assert!(!sim.automaton.done());
        assert!(sim.automaton.population() > 0);
        assert_eq!(sim.automaton.generation(), 1);

        // The reseeded grid keeps stepping
        assert_eq!(sim.tick(1.0).unwrap().generation, 2);
    }

    #[test]
    fn test_commands_pause_and_keep_generation() {
        let mut sim = running(30.0);
        sim.tick(1.0);
        sim.clear();
        assert!(!sim.is_running);
        assert_eq!(sim.automaton.population(), 0);
        assert_eq!(sim.automaton.generation(), 1);

        sim.resume();
        sim.reset();
        assert!(!sim.is_running);
        assert_eq!(sim.automaton.generation(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = SimulationConfig {
            width: 3,
            height: 3,
            depth: 3,
            seed: Some(1),
            updates_per_second: 20.0,
            reset_on_done: false,
            ..SimulationConfig::default()
        };
        let sim = Simulation::from_config(&config).unwrap();
        assert_eq!(sim.automaton.dimensions(), (3, 3, 3));
        assert_eq!(sim.updates_per_second, 20.0);
        assert!(!sim.reset_on_done);
        assert!(!sim.is_running);
    }
}
