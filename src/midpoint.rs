//! Modified midpoint (explicit predictor/corrector).

use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::{Integrator, IntegratorCore, Scheme};
use crate::observer::StepObserver;
use crate::ode::Ode;
use crate::vec::Vec;

/// Predict half a step with Euler, then take the full step with the slope
/// at the predicted midpoint:
///
/// ```text
/// yp = y + dt/2 · f(t, y)
/// y  = y + dt   · f(t + dt/2, yp)
/// ```
///
/// Second order, two derivative evaluations per step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModifiedMidpoint<V: Vec> {
    core: IntegratorCore<V>,
}

impl<V: Vec> ModifiedMidpoint<V> {
    pub fn new(time_step: V::Scalar) -> Self {
        ModifiedMidpoint { core: IntegratorCore::new(time_step) }
    }

    /// Start from `state` instead of zero.
    pub fn with_state(mut self, state: V) -> Self {
        self.core.set_state(state);
        self
    }
}

impl<O: Ode> Integrator<O> for ModifiedMidpoint<O::State> {
    fn core(&self) -> &IntegratorCore<O::State> { &self.core }
    fn core_mut(&mut self) -> &mut IntegratorCore<O::State> { &mut self.core }
    fn scheme(&self) -> Scheme { Scheme::ModifiedMidpoint }

    fn step<Obs: StepObserver>(&mut self, ode: &mut O, observer: &mut Obs) -> Result<(), PhysicsError> {
        let t = self.core.time();
        let dt = self.core.time_step();
        let half_dt = dt * <O::State as Vec>::Scalar::half();
        let y = self.core.state();

        let yp = y.add_scaled(ode.derivative(t, y), half_dt);
        let next = y.add_scaled(ode.derivative(t + half_dt, yp), dt);

        self.core.advance(next);
        observer.on_step(self.core.time().to_f64());
        Ok(())
    }
}
