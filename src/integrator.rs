//! Fixed-step integrator contract and the closed set of schemes.
//!
//! Every scheme owns an [`IntegratorCore`] (state, time, step size) and
//! implements [`Integrator`]. The ODE is lent to the integrator on each call
//! rather than stored, so a model can own its integrator outright.
//!
//! | Scheme                               | Order | f-evals / step | Needs      |
//! |--------------------------------------|-------|----------------|------------|
//! | [`ExplicitEuler`]                    | 1     | 1              | [`Ode`]    |
//! | [`ModifiedMidpoint`]                 | 2     | 2              | [`Ode`]    |
//! | [`RungeKutta4`]                      | 4     | 4              | [`Ode`]    |
//! | [`ImplicitEuler`]                    | 1     | 0 (one solve)  | [`LinearOde`] |

use crate::error::PhysicsError;
use crate::explicit_euler::ExplicitEuler;
use crate::float::Float;
use crate::implicit_euler::ImplicitEuler;
use crate::midpoint::ModifiedMidpoint;
use crate::observer::StepObserver;
use crate::ode::{LinearOde, Ode};
use crate::runge_kutta::RungeKutta4;
use crate::vec::Vec;

/// Scalar type of an ODE's state.
pub type OdeScalar<O> = <<O as Ode>::State as Vec>::Scalar;

/// State shared by every scheme: current value, time, and step size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegratorCore<V: Vec> {
    state: V,
    time: V::Scalar,
    time_step: V::Scalar,
}

impl<V: Vec> IntegratorCore<V> {
    /// Zero state at time zero.
    pub fn new(time_step: V::Scalar) -> Self {
        debug_assert!(time_step > V::Scalar::zero(), "time step must be positive");
        IntegratorCore {
            state: V::zero(),
            time: V::Scalar::zero(),
            time_step,
        }
    }

    pub fn state(&self) -> V { self.state }
    pub fn time(&self) -> V::Scalar { self.time }
    pub fn time_step(&self) -> V::Scalar { self.time_step }

    pub fn set_state(&mut self, state: V) {
        self.state = state;
    }

    /// Store a new step size. Rejects zero, negative, and non-finite values
    /// and leaves the old one in place.
    pub fn set_time_step(&mut self, dt: V::Scalar) -> Result<(), PhysicsError> {
        if !dt.is_finite() || dt <= V::Scalar::zero() {
            return Err(PhysicsError::InvalidTimeStep);
        }
        self.time_step = dt;
        Ok(())
    }

    /// Commit one whole step: replace the state and advance time by `dt`.
    pub fn advance(&mut self, next: V) {
        self.state = next;
        self.time = self.time + self.time_step;
    }
}

/// One fixed-step integration scheme for the ODE type `O`.
pub trait Integrator<O: Ode> {
    fn core(&self) -> &IntegratorCore<O::State>;
    fn core_mut(&mut self) -> &mut IntegratorCore<O::State>;

    /// Which scheme this is.
    fn scheme(&self) -> Scheme;

    /// Replace the current state. Time is left alone.
    fn set_state(&mut self, state: O::State) {
        self.core_mut().set_state(state);
    }

    fn state(&self) -> O::State {
        self.core().state()
    }

    fn time(&self) -> OdeScalar<O> {
        self.core().time()
    }

    fn time_step(&self) -> OdeScalar<O> {
        self.core().time_step()
    }

    /// Change the step size. Schemes that cache step-size dependent data
    /// rebuild it here, which is why the ODE is passed in.
    fn set_time_step(&mut self, dt: OdeScalar<O>, _ode: &O) -> Result<(), PhysicsError> {
        self.core_mut().set_time_step(dt)
    }

    /// Advance exactly one step. On error neither state nor time changes.
    fn step<Obs: StepObserver>(&mut self, ode: &mut O, observer: &mut Obs) -> Result<(), PhysicsError>;
}

// --------------------------------------------------------------------------
// Scheme tags
// --------------------------------------------------------------------------

/// The available integration schemes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    ExplicitEuler,
    ModifiedMidpoint,
    RungeKutta4,
    ImplicitEuler,
}

impl Scheme {
    /// Every scheme, in order of increasing cost.
    pub const ALL: [Scheme; 4] = [
        Scheme::ExplicitEuler,
        Scheme::ModifiedMidpoint,
        Scheme::RungeKutta4,
        Scheme::ImplicitEuler,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::ExplicitEuler => "explicit Euler",
            Scheme::ModifiedMidpoint => "modified midpoint",
            Scheme::RungeKutta4 => "Runge-Kutta 4",
            Scheme::ImplicitEuler => "implicit Euler",
        }
    }

    /// Global order of accuracy.
    pub fn order(self) -> usize {
        match self {
            Scheme::ExplicitEuler | Scheme::ImplicitEuler => 1,
            Scheme::ModifiedMidpoint => 2,
            Scheme::RungeKutta4 => 4,
        }
    }

    /// Position of this scheme in [`Scheme::ALL`].
    pub fn index(self) -> usize {
        match self {
            Scheme::ExplicitEuler => 0,
            Scheme::ModifiedMidpoint => 1,
            Scheme::RungeKutta4 => 2,
            Scheme::ImplicitEuler => 3,
        }
    }
}

// --------------------------------------------------------------------------
// AnyIntegrator: tagged dispatch over the four schemes
// --------------------------------------------------------------------------

/// Any of the four schemes, bound to a linear ODE type.
///
/// This is what a model stores when the scheme is chosen at run time.
#[derive(Clone, Debug)]
pub enum AnyIntegrator<O: LinearOde> {
    ExplicitEuler(ExplicitEuler<O::State>),
    ModifiedMidpoint(ModifiedMidpoint<O::State>),
    RungeKutta4(RungeKutta4<O::State>),
    ImplicitEuler(ImplicitEuler<O::Matrix>),
}

impl<O: LinearOde> AnyIntegrator<O> {
    /// Build the given scheme with step size `dt`.
    pub fn new(scheme: Scheme, dt: OdeScalar<O>) -> Self {
        match scheme {
            Scheme::ExplicitEuler => AnyIntegrator::ExplicitEuler(ExplicitEuler::new(dt)),
            Scheme::ModifiedMidpoint => AnyIntegrator::ModifiedMidpoint(ModifiedMidpoint::new(dt)),
            Scheme::RungeKutta4 => AnyIntegrator::RungeKutta4(RungeKutta4::new(dt)),
            Scheme::ImplicitEuler => AnyIntegrator::ImplicitEuler(ImplicitEuler::new(dt)),
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $i:ident => $body:expr) => {
        match $self {
            AnyIntegrator::ExplicitEuler($i) => $body,
            AnyIntegrator::ModifiedMidpoint($i) => $body,
            AnyIntegrator::RungeKutta4($i) => $body,
            AnyIntegrator::ImplicitEuler($i) => $body,
        }
    };
}

impl<O: LinearOde> Integrator<O> for AnyIntegrator<O> {
    fn core(&self) -> &IntegratorCore<O::State> {
        dispatch!(self, i => Integrator::<O>::core(i))
    }

    fn core_mut(&mut self) -> &mut IntegratorCore<O::State> {
        dispatch!(self, i => Integrator::<O>::core_mut(i))
    }

    fn scheme(&self) -> Scheme {
        dispatch!(self, i => Integrator::<O>::scheme(i))
    }

    fn set_time_step(&mut self, dt: OdeScalar<O>, ode: &O) -> Result<(), PhysicsError> {
        dispatch!(self, i => Integrator::<O>::set_time_step(i, dt, ode))
    }

    fn step<Obs: StepObserver>(&mut self, ode: &mut O, observer: &mut Obs) -> Result<(), PhysicsError> {
        dispatch!(self, i => Integrator::<O>::step(i, ode, observer))
    }
}

impl<O: LinearOde> From<ExplicitEuler<O::State>> for AnyIntegrator<O> {
    fn from(i: ExplicitEuler<O::State>) -> Self { AnyIntegrator::ExplicitEuler(i) }
}

impl<O: LinearOde> From<ModifiedMidpoint<O::State>> for AnyIntegrator<O> {
    fn from(i: ModifiedMidpoint<O::State>) -> Self { AnyIntegrator::ModifiedMidpoint(i) }
}

impl<O: LinearOde> From<RungeKutta4<O::State>> for AnyIntegrator<O> {
    fn from(i: RungeKutta4<O::State>) -> Self { AnyIntegrator::RungeKutta4(i) }
}

impl<O: LinearOde> From<ImplicitEuler<O::Matrix>> for AnyIntegrator<O> {
    fn from(i: ImplicitEuler<O::Matrix>) -> Self { AnyIntegrator::ImplicitEuler(i) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec2;

    #[test]
    fn core_rejects_bad_time_steps() {
        let mut core: IntegratorCore<Vec2<f64>> = IntegratorCore::new(0.01);
        assert_eq!(core.set_time_step(0.0), Err(PhysicsError::InvalidTimeStep));
        assert_eq!(core.set_time_step(-0.5), Err(PhysicsError::InvalidTimeStep));
        assert_eq!(core.set_time_step(f64::NAN), Err(PhysicsError::InvalidTimeStep));
        assert_eq!(core.time_step(), 0.01);
        assert_eq!(core.set_time_step(0.02), Ok(()));
        assert_eq!(core.time_step(), 0.02);
    }

    #[test]
    fn advance_moves_time_by_whole_steps() {
        let mut core: IntegratorCore<Vec2<f64>> = IntegratorCore::new(0.25);
        core.advance(Vec2::new(1.0, 2.0));
        core.advance(Vec2::new(3.0, 4.0));
        assert_eq!(core.state(), Vec2::new(3.0, 4.0));
        assert_eq!(core.time(), 0.5);
    }

    #[test]
    fn scheme_table() {
        for (i, s) in Scheme::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
        assert_eq!(Scheme::RungeKutta4.order(), 4);
        assert_eq!(Scheme::ImplicitEuler.name(), "implicit Euler");
    }
}
