//! Side-by-side comparison rig: one spring per integration scheme.

use crate::config::SpringConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::Scheme;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::spring::Spring;

/// A parameter that can be changed on every spring of a bank at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringParameter {
    Mass,
    Stiffness,
    Damping,
    Gravity,
    TimeStep,
}

/// Four identical springs, each integrated with a different [`Scheme`] and
/// all driven by the same frame clock.
#[derive(Clone, Debug)]
pub struct SpringBank<F: Float> {
    springs: [Spring<F>; 4],
    max_frame_delta: F,
}

impl<F: Float> SpringBank<F> {
    /// Build one spring per scheme from `config`, in [`Scheme::ALL`] order,
    /// each reset to the initial position.
    pub fn new(config: &SpringConfig<F>) -> Result<Self, PhysicsError> {
        let [a, b, c, d] = Scheme::ALL;
        Ok(SpringBank {
            springs: [
                Spring::with_scheme(config, a)?,
                Spring::with_scheme(config, b)?,
                Spring::with_scheme(config, c)?,
                Spring::with_scheme(config, d)?,
            ],
            max_frame_delta: config.max_frame_delta,
        })
    }

    /// Apply `value` to `parameter` on every spring.
    ///
    /// Only [`SpringParameter::TimeStep`] can fail; springs updated before
    /// the failure keep the new value.
    pub fn set_parameter(&mut self, parameter: SpringParameter, value: F) -> Result<(), PhysicsError> {
        for spring in self.springs.iter_mut() {
            match parameter {
                SpringParameter::Mass => spring.set_mass(value),
                SpringParameter::Stiffness => spring.set_stiffness(value),
                SpringParameter::Damping => spring.set_damping(value),
                SpringParameter::Gravity => spring.set_gravity(value),
                SpringParameter::TimeStep => spring.set_time_step(value)?,
            }
        }
        Ok(())
    }

    /// Advance every spring by one frame. The delta is clamped to
    /// `[0, max_frame_delta]` first.
    ///
    /// Every spring is updated even if one fails, so the healthy ones stay on
    /// the shared clock. The first error is returned.
    pub fn update(&mut self, frame_delta: F) -> Result<(), PhysicsError> {
        self.update_observed(frame_delta, &mut NoOpStepObserver)
    }

    /// [`SpringBank::update`] with one observer shared by all springs.
    pub fn update_observed<O: StepObserver>(&mut self, frame_delta: F, observer: &mut O) -> Result<(), PhysicsError> {
        let dt = frame_delta.clamp(F::zero(), self.max_frame_delta);
        self.for_each_spring(|spring| spring.update_observed(dt, &mut *observer).map(|_| ()))
    }

    /// Single-step every spring, with the same error policy as
    /// [`SpringBank::update`].
    pub fn step(&mut self) -> Result<(), PhysicsError> {
        self.for_each_spring(|spring| spring.update(-F::one()).map(|_| ()))
    }

    fn for_each_spring(
        &mut self,
        mut f: impl FnMut(&mut Spring<F>) -> Result<(), PhysicsError>,
    ) -> Result<(), PhysicsError> {
        let mut first_error = None;
        for spring in self.springs.iter_mut() {
            if let Err(e) = f(spring) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn reset(&mut self) {
        for spring in self.springs.iter_mut() {
            spring.reset();
        }
    }

    pub fn set_initial_position(&mut self, position: F) {
        for spring in self.springs.iter_mut() {
            spring.set_initial_position(position);
        }
    }

    pub fn spring(&self, scheme: Scheme) -> &Spring<F> {
        &self.springs[scheme.index()]
    }

    pub fn spring_mut(&mut self, scheme: Scheme) -> &mut Spring<F> {
        &mut self.springs[scheme.index()]
    }

    /// Positions in [`Scheme::ALL`] order.
    pub fn positions(&self) -> [F; 4] {
        let [a, b, c, d] = &self.springs;
        [a.position(), b.position(), c.position(), d.position()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Scheme, &Spring<F>)> {
        Scheme::ALL.into_iter().zip(self.springs.iter())
    }

    pub fn max_frame_delta(&self) -> F { self.max_frame_delta }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::AnyIntegrator;
    use crate::observer::CountingObserver;

    fn bank() -> SpringBank<f64> {
        SpringBank::new(&SpringConfig::demo()).unwrap()
    }

    #[test]
    fn one_spring_per_scheme_at_rest() {
        let bank = bank();
        for (scheme, spring) in bank.iter() {
            assert_eq!(spring.scheme(), Some(scheme));
            assert_eq!(spring.position(), 0.25);
            assert_eq!(spring.velocity(), 0.0);
        }
        assert_eq!(bank.positions(), [0.25; 4]);
    }

    #[test]
    fn frame_delta_is_clamped() {
        let config = SpringConfig::demo().with_time_step(0.01).with_max_frame_delta(0.05);
        let mut bank = SpringBank::new(&config).unwrap();
        let mut counter = CountingObserver::default();

        // A 10 s stall simulates at most 0.05 s.
        bank.update_observed(10.0, &mut counter).unwrap();
        for (_, spring) in bank.iter() {
            assert!(spring.time() <= 0.05 + 1e-12, "time = {}", spring.time());
        }

        // Negative deltas clamp to zero rather than forcing a step.
        let steps = counter.steps;
        bank.update_observed(-1.0, &mut counter).unwrap();
        assert_eq!(counter.steps, steps);
    }

    #[test]
    fn step_advances_each_spring_once() {
        let mut bank = bank();
        bank.step().unwrap();
        for (_, spring) in bank.iter() {
            assert_eq!(spring.time(), 0.005);
        }
    }

    #[test]
    fn parameters_reach_every_spring() {
        let mut bank = bank();
        bank.set_parameter(SpringParameter::Stiffness, 50.0).unwrap();
        bank.set_parameter(SpringParameter::TimeStep, 0.02).unwrap();
        for (_, spring) in bank.iter() {
            assert_eq!(spring.ode().stiffness(), 50.0);
            assert_eq!(spring.time_step(), Some(0.02));
        }
        assert_eq!(
            bank.set_parameter(SpringParameter::TimeStep, 0.0),
            Err(PhysicsError::InvalidTimeStep)
        );
    }

    #[test]
    fn implicit_member_refactors_on_stiffness_change() {
        let mut bank = bank();
        bank.update(0.05).unwrap();
        bank.set_parameter(SpringParameter::Stiffness, 800.0).unwrap();
        bank.update(0.05).unwrap();
        match bank.spring(Scheme::ImplicitEuler).integrator() {
            Some(AnyIntegrator::ImplicitEuler(ie)) => assert!(ie.refactor_count() >= 2),
            other => panic!("expected implicit Euler, got {:?}", other),
        }
    }

    #[test]
    fn reset_returns_all_to_start() {
        let mut bank = bank();
        bank.update(0.1).unwrap();
        assert_ne!(bank.positions(), [0.25; 4]);
        bank.reset();
        assert_eq!(bank.positions(), [0.25; 4]);
    }
}
