//! Backward (implicit) Euler for linear ODEs.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::{Integrator, IntegratorCore, OdeScalar, Scheme};
use crate::matrix::{Solve, SquareMatrix};
use crate::observer::StepObserver;
use crate::ode::LinearOde;
use crate::vec::Vec;

/// Backward Euler for `y' = A·y + b`.
///
/// Each step solves
///
/// ```text
/// (I - dt·A) · y_next = y + dt·b
/// ```
///
/// The factorization of `I - dt·A` is cached. It is rebuilt when the step
/// size changes and when the ODE reports through
/// [`LinearOde::take_matrix_changed`] that `A` changed, so it is never stale.
///
/// Unconditionally stable for a damped or undamped spring, which is what
/// lets it run stiff parameters at step sizes where the explicit schemes blow
/// up. The price is numerical damping: amplitude decays even with zero
/// physical damping.
#[derive(Clone, Debug)]
pub struct ImplicitEuler<M: SquareMatrix> {
    core: IntegratorCore<M::Vector>,
    factorized: Option<M::Factorization>,
    refactors: usize,
}

impl<M: SquareMatrix> ImplicitEuler<M> {
    /// Unfactored until the step size is set or the first step runs.
    pub fn new(time_step: <M::Vector as Vec>::Scalar) -> Self {
        ImplicitEuler {
            core: IntegratorCore::new(time_step),
            factorized: None,
            refactors: 0,
        }
    }

    /// Start from `state` instead of zero.
    pub fn with_state(mut self, state: M::Vector) -> Self {
        self.core.set_state(state);
        self
    }

    /// Whether a factorization is cached.
    pub fn is_factorized(&self) -> bool {
        self.factorized.is_some()
    }

    /// How many times `I - dt·A` has been factored successfully.
    pub fn refactor_count(&self) -> usize {
        self.refactors
    }

    fn refactor<O: LinearOde<Matrix = M>>(&mut self, ode: &O) -> Result<(), PhysicsError> {
        let dt = self.core.time_step();
        let system = M::identity() - ode.matrix_a().scale(dt);
        match system.factorize() {
            Ok(f) => {
                self.factorized = Some(f);
                self.refactors += 1;
                Ok(())
            }
            Err(e) => {
                self.factorized = None;
                Err(e)
            }
        }
    }
}

impl<O: LinearOde> Integrator<O> for ImplicitEuler<O::Matrix> {
    fn core(&self) -> &IntegratorCore<O::State> { &self.core }
    fn core_mut(&mut self) -> &mut IntegratorCore<O::State> { &mut self.core }
    fn scheme(&self) -> Scheme { Scheme::ImplicitEuler }

    /// Stores `dt` and refactors unconditionally: `I - dt·A` changed even if
    /// `A` did not.
    fn set_time_step(&mut self, dt: OdeScalar<O>, ode: &O) -> Result<(), PhysicsError> {
        self.core.set_time_step(dt)?;
        self.refactor(ode)
    }

    fn step<Obs: StepObserver>(&mut self, ode: &mut O, observer: &mut Obs) -> Result<(), PhysicsError> {
        // Consume the latch first so a change is never missed.
        let changed = ode.take_matrix_changed();
        if changed || self.factorized.is_none() {
            self.refactor(&*ode)?;
            observer.on_refactor();
        }

        let dt = self.core.time_step();
        let rhs = self.core.state().add_scaled(ode.vector_b(), dt);
        let next = match &self.factorized {
            Some(f) => f.solve_vec(rhs),
            None => return Err(PhysicsError::SingularSystem),
        };

        self.core.advance(next);
        observer.on_step(self.core.time().to_f64());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Mat2;
    use crate::observer::{CountingObserver, NoOpStepObserver};
    use crate::ode::Ode;
    use crate::vec::Vec2;

    /// Decoupled decay with a settable rate on the first component.
    struct Decay {
        rate: f64,
        changed: bool,
    }

    impl Decay {
        fn new(rate: f64) -> Self { Decay { rate, changed: true } }
        fn set_rate(&mut self, rate: f64) {
            self.rate = rate;
            self.changed = true;
        }
    }

    impl Ode for Decay {
        type State = Vec2<f64>;
        fn derivative(&self, _t: f64, y: Vec2<f64>) -> Vec2<f64> {
            self.matrix_a().mul_vec(y) + self.vector_b()
        }
    }

    impl LinearOde for Decay {
        type Matrix = Mat2<f64>;
        fn matrix_a(&self) -> Mat2<f64> { Mat2::new([[-self.rate, 0.0], [0.0, -2.0]]) }
        fn vector_b(&self) -> Vec2<f64> { Vec2::zero() }
        fn take_matrix_changed(&mut self) -> bool {
            core::mem::replace(&mut self.changed, false)
        }
    }

    #[test]
    fn one_step_divides_by_one_plus_dt_lambda() {
        let mut ode = Decay::new(1.0);
        let mut ie = ImplicitEuler::<Mat2<f64>>::new(0.5).with_state(Vec2::new(3.0, 4.0));
        ie.step(&mut ode, &mut NoOpStepObserver).unwrap();
        let y = Integrator::<Decay>::state(&ie);
        assert!((y.x - 2.0).abs() < 1e-14, "y.x = {}", y.x);
        assert!((y.y - 2.0).abs() < 1e-14, "y.y = {}", y.y);
        assert_eq!(Integrator::<Decay>::time(&ie), 0.5);
    }

    #[test]
    fn set_time_step_refactors() {
        let ode = Decay::new(1.0);
        let mut ie: ImplicitEuler<Mat2<f64>> = ImplicitEuler::new(0.1);
        assert!(!ie.is_factorized());
        ie.set_time_step(0.2, &ode).unwrap();
        assert!(ie.is_factorized());
        ie.set_time_step(0.2, &ode).unwrap();
        assert_eq!(ie.refactor_count(), 2);
    }

    #[test]
    fn refactors_only_when_latch_set() {
        let mut ode = Decay::new(1.0);
        let mut ie = ImplicitEuler::<Mat2<f64>>::new(0.1).with_state(Vec2::new(1.0, 1.0));
        let mut counter = CountingObserver::default();
        for _ in 0..5 {
            ie.step(&mut ode, &mut counter).unwrap();
        }
        assert_eq!(counter.refactors, 1);
        assert_eq!(counter.steps, 5);

        ode.set_rate(10.0);
        ie.step(&mut ode, &mut counter).unwrap();
        assert_eq!(counter.refactors, 2);
        assert_eq!(ie.refactor_count(), 2);
    }

    #[test]
    fn singular_system_leaves_state_untouched() {
        // A = diag(10, -2) with dt = 0.1 zeroes the first row of I - dt·A.
        let mut ode = Decay::new(-10.0);
        let mut ie = ImplicitEuler::<Mat2<f64>>::new(0.1).with_state(Vec2::new(1.0, 1.0));
        let err = ie.step(&mut ode, &mut NoOpStepObserver).unwrap_err();
        assert_eq!(err, PhysicsError::SingularSystem);
        assert_eq!(Integrator::<Decay>::state(&ie), Vec2::new(1.0, 1.0));
        assert_eq!(Integrator::<Decay>::time(&ie), 0.0);
        assert!(!ie.is_factorized());

        // Fixing the parameter recovers on the next step.
        ode.set_rate(1.0);
        ie.step(&mut ode, &mut NoOpStepObserver).unwrap();
        assert!(ie.is_factorized());
    }

    #[test]
    fn invalid_time_step_keeps_factorization() {
        let ode = Decay::new(1.0);
        let mut ie: ImplicitEuler<Mat2<f64>> = ImplicitEuler::new(0.1);
        ie.set_time_step(0.1, &ode).unwrap();
        assert_eq!(ie.set_time_step(-1.0, &ode), Err(PhysicsError::InvalidTimeStep));
        assert!(ie.is_factorized());
        assert_eq!(Integrator::<Decay>::time_step(&ie), 0.1);
    }
}
