//! Forward (explicit) Euler.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::{Integrator, IntegratorCore, OdeScalar, Scheme};
use crate::observer::StepObserver;
use crate::ode::Ode;
use crate::vec::Vec;

/// `y ← y + dt·f(t, y)`.
///
/// First order, one derivative evaluation per step. Only conditionally
/// stable: for an undamped spring any `dt > 0` makes the energy grow, and
/// once `dt·√(k/m)` is large the amplitude explodes within a few steps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExplicitEuler<V: Vec> {
    core: IntegratorCore<V>,
}

impl<V: Vec> ExplicitEuler<V> {
    pub fn new(time_step: V::Scalar) -> Self {
        ExplicitEuler { core: IntegratorCore::new(time_step) }
    }

    /// Start from `state` instead of zero.
    pub fn with_state(mut self, state: V) -> Self {
        self.core.set_state(state);
        self
    }
}

impl<O: Ode> Integrator<O> for ExplicitEuler<O::State> {
    fn core(&self) -> &IntegratorCore<O::State> { &self.core }
    fn core_mut(&mut self) -> &mut IntegratorCore<O::State> { &mut self.core }
    fn scheme(&self) -> Scheme { Scheme::ExplicitEuler }

    fn step<Obs: StepObserver>(&mut self, ode: &mut O, observer: &mut Obs) -> Result<(), PhysicsError> {
        let t: OdeScalar<O> = self.core.time();
        let dt = self.core.time_step();
        let y = self.core.state();

        let next = y.add_scaled(ode.derivative(t, y), dt);

        self.core.advance(next);
        observer.on_step(self.core.time().to_f64());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpStepObserver;
    use crate::vec::Scalar;

    struct Decay;

    impl Ode for Decay {
        type State = Scalar<f64>;
        fn derivative(&self, _t: f64, y: Scalar<f64>) -> Scalar<f64> { -y }
    }

    #[test]
    fn one_step_matches_formula() {
        let mut euler = ExplicitEuler::new(0.1).with_state(Scalar(1.0));
        Integrator::<Decay>::step(&mut euler, &mut Decay, &mut NoOpStepObserver).unwrap();
        assert!((euler.core.state().0 - 0.9).abs() < 1e-15);
        assert!((euler.core.time() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn uses_current_time() {
        struct Clock;
        impl Ode for Clock {
            type State = Scalar<f64>;
            fn derivative(&self, t: f64, _y: Scalar<f64>) -> Scalar<f64> { Scalar(t) }
        }
        let mut euler = ExplicitEuler::new(0.5);
        for _ in 0..3 {
            Integrator::<Clock>::step(&mut euler, &mut Clock, &mut NoOpStepObserver).unwrap();
        }
        // y = dt·(0 + 0.5 + 1.0)
        assert!((euler.core.state().0 - 0.75).abs() < 1e-15);
    }
}
