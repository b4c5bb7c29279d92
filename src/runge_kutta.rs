//! Classic fourth-order Runge-Kutta.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::{Integrator, IntegratorCore, Scheme};
use crate::observer::StepObserver;
use crate::ode::Ode;
use crate::vec::Vec;

/// Four-stage RK4:
///
/// ```text
/// k1 = dt·f(t,        y)
/// k2 = dt·f(t + dt/2, y + k1/2)
/// k3 = dt·f(t + dt/2, y + k2/2)
/// k4 = dt·f(t + dt,   y + k3)
/// y  = y + (k1 + 2·k2 + 2·k3 + k4) / 6
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RungeKutta4<V: Vec> {
    core: IntegratorCore<V>,
}

impl<V: Vec> RungeKutta4<V> {
    pub fn new(time_step: V::Scalar) -> Self {
        RungeKutta4 { core: IntegratorCore::new(time_step) }
    }

    /// Start from `state` instead of zero.
    pub fn with_state(mut self, state: V) -> Self {
        self.core.set_state(state);
        self
    }
}

impl<O: Ode> Integrator<O> for RungeKutta4<O::State> {
    fn core(&self) -> &IntegratorCore<O::State> { &self.core }
    fn core_mut(&mut self) -> &mut IntegratorCore<O::State> { &mut self.core }
    fn scheme(&self) -> Scheme { Scheme::RungeKutta4 }

    fn step<Obs: StepObserver>(&mut self, ode: &mut O, observer: &mut Obs) -> Result<(), PhysicsError> {
        let t = self.core.time();
        let dt = self.core.time_step();
        let half = <O::State as Vec>::Scalar::half();
        let two = <O::State as Vec>::Scalar::two();
        let sixth = <O::State as Vec>::Scalar::one() / <O::State as Vec>::Scalar::from_usize(6);
        let y = self.core.state();

        let k1 = ode.derivative(t, y).scale(dt);
        let k2 = ode.derivative(t + dt * half, y.add_scaled(k1, half)).scale(dt);
        let k3 = ode.derivative(t + dt * half, y.add_scaled(k2, half)).scale(dt);
        let k4 = ode.derivative(t + dt, y + k3).scale(dt);

        let next = y + (k1 + k2.scale(two) + k3.scale(two) + k4).scale(sixth);

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

    struct Cubic;

    impl Ode for Cubic {
        type State = Scalar<f64>;
        fn derivative(&self, t: f64, _y: Scalar<f64>) -> Scalar<f64> { Scalar(4.0 * t * t * t) }
    }

    struct Decay;

    impl Ode for Decay {
        type State = Scalar<f64>;
        fn derivative(&self, _t: f64, y: Scalar<f64>) -> Scalar<f64> { -y }
    }

    #[test]
    fn exact_for_cubic_slope() {
        // RK4 reduces to Simpson's rule for y' = f(t), exact up to cubics.
        let mut rk = RungeKutta4::new(0.5);
        for _ in 0..2 {
            Integrator::<Cubic>::step(&mut rk, &mut Cubic, &mut NoOpStepObserver).unwrap();
        }
        assert!((rk.core.state().0 - 1.0).abs() < 1e-14, "y = {}", rk.core.state().0);
    }

    #[test]
    fn exponential_decay_accuracy() {
        let mut rk = RungeKutta4::new(0.01).with_state(Scalar(1.0));
        for _ in 0..100 {
            Integrator::<Decay>::step(&mut rk, &mut Decay, &mut NoOpStepObserver).unwrap();
        }
        let expected = libm::exp(-1.0);
        assert!((rk.core.state().0 - expected).abs() < 1e-10);
    }
}
