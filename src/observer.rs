//! Step observer trait for monitoring integration progress.

/// Trait for observing integrator steps.
///
/// Implement this trait to monitor the simulation (debugging, plotting,
/// counting evaluations). All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after an integrator advanced one step; `time` is the new
    /// simulation time in seconds.
    fn on_step(&mut self, _time: f64) {}

    /// Called when an implicit integrator recomputed its factorization.
    fn on_refactor(&mut self) {}

    /// Called when an accumulator update finished, with the number of whole
    /// steps it took.
    fn on_update_complete(&mut self, _steps: usize) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Observer that counts what it sees.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountingObserver {
    pub steps: usize,
    pub refactors: usize,
    pub updates: usize,
    pub last_time: f64,
}

impl StepObserver for CountingObserver {
    fn on_step(&mut self, time: f64) {
        self.steps += 1;
        self.last_time = time;
    }

    fn on_refactor(&mut self) {
        self.refactors += 1;
    }

    fn on_update_complete(&mut self, _steps: usize) {
        self.updates += 1;
    }
}
