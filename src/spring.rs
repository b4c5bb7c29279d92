//! Damped, gravity-loaded mass-spring model and its fixed-step driver.
//!
//! The state is (velocity, position), in that order, so the equations of
//! motion `m·x'' = -k·x - b·x' + m·g` read as the linear system
//!
//! ```text
//! [v]'   [ -b/m  -k/m ] [v]   [g]
//! [x]  = [  1     0   ] [x] + [0]
//! ```

use crate::config::SpringConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::integrator::{AnyIntegrator, Integrator, Scheme};
use crate::matrix::{Mat2, SquareMatrix};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::ode::{LinearOde, Ode};
use crate::vec::{Vec, Vec2};

/// The spring's ODE: parameters plus the cached linear form.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringOde<F: Float> {
    mass: F,
    stiffness: F,
    damping: F,
    gravity: F,
    matrix_a: Mat2<F>,
    vector_b: Vec2<F>,
    matrix_changed: bool,
}

impl<F: Float> SpringOde<F> {
    /// Build with `A` and `b` assembled immediately. The changed flag starts
    /// set, since any cached factorization predates this `A`.
    pub fn new(mass: F, stiffness: F, damping: F, gravity: F) -> Self {
        debug_assert!(mass > F::zero(), "mass must be positive");
        let mut ode = SpringOde {
            mass,
            stiffness,
            damping,
            gravity,
            matrix_a: Mat2::default(),
            vector_b: Vec2::zero(),
            matrix_changed: false,
        };
        ode.compute_a();
        ode.compute_b();
        ode
    }

    fn compute_a(&mut self) {
        let m = self.mass;
        self.matrix_a = Mat2::new([
            [-self.damping / m, -self.stiffness / m],
            [F::one(), F::zero()],
        ]);
        self.matrix_changed = true;
    }

    fn compute_b(&mut self) {
        self.vector_b = Vec2::new(self.gravity, F::zero());
    }

    pub fn set_mass(&mut self, mass: F) {
        debug_assert!(mass > F::zero(), "mass must be positive");
        self.mass = mass;
        self.compute_a();
    }

    pub fn set_stiffness(&mut self, stiffness: F) {
        self.stiffness = stiffness;
        self.compute_a();
    }

    pub fn set_damping(&mut self, damping: F) {
        self.damping = damping;
        self.compute_a();
    }

    /// Only `b` depends on gravity, so the changed flag is left alone.
    pub fn set_gravity(&mut self, gravity: F) {
        self.gravity = gravity;
        self.compute_b();
    }

    pub fn mass(&self) -> F { self.mass }
    pub fn stiffness(&self) -> F { self.stiffness }
    pub fn damping(&self) -> F { self.damping }
    pub fn gravity(&self) -> F { self.gravity }

    /// Rest position under gravity, `g·m/k`. `None` for a slack spring.
    pub fn equilibrium_position(&self) -> Option<F> {
        if self.stiffness.is_near_zero(F::epsilon()) {
            None
        } else {
            Some(self.gravity * self.mass / self.stiffness)
        }
    }

    /// Undamped angular frequency `√(k/m)`.
    pub fn natural_frequency(&self) -> F {
        (self.stiffness / self.mass).sqrt()
    }
}

impl<F: Float> Default for SpringOde<F> {
    fn default() -> Self {
        let c = SpringConfig::new();
        SpringOde::new(c.mass, c.stiffness, c.damping, c.gravity)
    }
}

impl<F: Float> Ode for SpringOde<F> {
    type State = Vec2<F>;

    fn derivative(&self, _t: F, y: Vec2<F>) -> Vec2<F> {
        self.matrix_a.mul_vec(y) + self.vector_b
    }
}

impl<F: Float> LinearOde for SpringOde<F> {
    type Matrix = Mat2<F>;

    fn matrix_a(&self) -> Mat2<F> { self.matrix_a }
    fn vector_b(&self) -> Vec2<F> { self.vector_b }

    fn take_matrix_changed(&mut self) -> bool {
        core::mem::replace(&mut self.matrix_changed, false)
    }
}

/// A mass on a spring, simulated at a fixed step.
///
/// Owns its ODE and at most one integrator. [`Spring::update`] takes
/// wall-clock deltas of any size and runs the integrator a whole number of
/// times, carrying the leftover time to the next call.
#[derive(Clone, Debug)]
pub struct Spring<F: Float> {
    ode: SpringOde<F>,
    initial_position: F,
    time_remainder: F,
    integrator: Option<AnyIntegrator<SpringOde<F>>>,
}

impl<F: Float> Spring<F> {
    /// A spring with the given parameters and no integrator installed.
    pub fn new(mass: F, stiffness: F, damping: F, gravity: F) -> Self {
        Spring {
            ode: SpringOde::new(mass, stiffness, damping, gravity),
            initial_position: F::zero(),
            time_remainder: F::zero(),
            integrator: None,
        }
    }

    /// Parameters and initial position from `config`. No integrator yet;
    /// see [`Spring::with_scheme`].
    pub fn from_config(config: &SpringConfig<F>) -> Self {
        let mut spring = Spring::new(config.mass, config.stiffness, config.damping, config.gravity);
        spring.initial_position = config.initial_position;
        spring
    }

    /// Build from `config`, install `scheme` at `config.time_step`, and reset.
    pub fn with_scheme(config: &SpringConfig<F>, scheme: Scheme) -> Result<Self, PhysicsError> {
        let mut spring = Spring::from_config(config);
        spring.set_integrator(AnyIntegrator::new(scheme, config.time_step))?;
        spring.reset();
        Ok(spring)
    }

    /// Install `integrator`, replacing (and dropping) any previous one.
    ///
    /// The integrator's own step size is applied through `set_time_step`,
    /// which is where implicit schemes do their first factorization. On error
    /// the previous integrator stays installed.
    pub fn set_integrator<I>(&mut self, integrator: I) -> Result<(), PhysicsError>
    where
        I: Into<AnyIntegrator<SpringOde<F>>>,
    {
        let mut integrator = integrator.into();
        let dt = integrator.time_step();
        integrator.set_time_step(dt, &self.ode)?;
        self.integrator = Some(integrator);
        self.time_remainder = F::zero();
        Ok(())
    }

    pub fn integrator(&self) -> Option<&AnyIntegrator<SpringOde<F>>> {
        self.integrator.as_ref()
    }

    /// Scheme of the installed integrator.
    pub fn scheme(&self) -> Option<Scheme> {
        self.integrator.as_ref().map(|i| i.scheme())
    }

    pub fn ode(&self) -> &SpringOde<F> { &self.ode }

    /// Mutable access to the ODE, e.g. to consume its changed flag.
    pub fn ode_mut(&mut self) -> &mut SpringOde<F> { &mut self.ode }

    pub fn set_mass(&mut self, mass: F) { self.ode.set_mass(mass); }
    pub fn set_stiffness(&mut self, stiffness: F) { self.ode.set_stiffness(stiffness); }
    pub fn set_damping(&mut self, damping: F) { self.ode.set_damping(damping); }
    pub fn set_gravity(&mut self, gravity: F) { self.ode.set_gravity(gravity); }

    pub fn set_initial_position(&mut self, position: F) {
        self.initial_position = position;
    }

    pub fn initial_position(&self) -> F { self.initial_position }

    /// Forward a new step size to the integrator. Without one this does
    /// nothing.
    pub fn set_time_step(&mut self, dt: F) -> Result<(), PhysicsError> {
        match self.integrator.as_mut() {
            Some(integrator) => integrator.set_time_step(dt, &self.ode),
            None => Ok(()),
        }
    }

    pub fn time_step(&self) -> Option<F> {
        self.integrator.as_ref().map(|i| i.time_step())
    }

    /// Put the mass at rest at the initial position. Buffered time is
    /// dropped too, so a partially accumulated step is discarded. Does
    /// nothing without an integrator.
    pub fn reset(&mut self) {
        if let Some(integrator) = self.integrator.as_mut() {
            integrator.set_state(Vec2::new(F::zero(), self.initial_position));
            self.time_remainder = F::zero();
        }
    }

    /// Advance by `elapsed` seconds of wall-clock time.
    ///
    /// A negative `elapsed` requests exactly one step. A NaN or infinite
    /// `elapsed` is rejected with [`PhysicsError::InvalidTimeStep`] and leaves
    /// the buffered time alone. Returns how many steps ran.
    pub fn update(&mut self, elapsed: F) -> Result<usize, PhysicsError> {
        self.update_observed(elapsed, &mut NoOpStepObserver)
    }

    /// [`Spring::update`] with observer hooks.
    ///
    /// If a step fails the loop stops there and the remainder keeps the time
    /// that was not simulated.
    pub fn update_observed<O: StepObserver>(
        &mut self,
        elapsed: F,
        observer: &mut O,
    ) -> Result<usize, PhysicsError> {
        let integrator = match self.integrator.as_mut() {
            Some(integrator) => integrator,
            None => return Ok(0),
        };
        if !elapsed.is_finite() {
            return Err(PhysicsError::InvalidTimeStep);
        }

        let dt = integrator.time_step();
        let added = if elapsed < F::zero() { dt } else { elapsed };
        self.time_remainder = self.time_remainder + added;

        let mut steps = 0;
        while self.time_remainder >= dt {
            integrator.step(&mut self.ode, observer)?;
            self.time_remainder = self.time_remainder - dt;
            steps += 1;
        }

        observer.on_update_complete(steps);
        Ok(steps)
    }

    /// (velocity, position), or zeros without an integrator.
    pub fn current_state(&self) -> Vec2<F> {
        match self.integrator.as_ref() {
            Some(integrator) => integrator.state(),
            None => Vec2::zero(),
        }
    }

    pub fn position(&self) -> F { self.current_state().position() }
    pub fn velocity(&self) -> F { self.current_state().velocity() }

    /// Simulated time, a whole multiple of the step size.
    pub fn time(&self) -> F {
        self.integrator.as_ref().map_or(F::zero(), |i| i.time())
    }

    /// Wall-clock time buffered but not yet simulated.
    pub fn time_remainder(&self) -> F { self.time_remainder }

    pub fn equilibrium_position(&self) -> Option<F> {
        self.ode.equilibrium_position()
    }
}

impl<F: Float> Default for Spring<F> {
    fn default() -> Self {
        Spring::from_config(&SpringConfig::new())
    }
}
