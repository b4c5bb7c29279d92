//! Configuration for spring models and the comparison bank.

use crate::float::Float;

/// Physical and timing parameters for a [`Spring`](crate::Spring).
///
/// # Builder Pattern
/// ```
/// use springsim::config::SpringConfig;
///
/// let config: SpringConfig<f64> = SpringConfig::new()
///     .with_stiffness(200.0)
///     .with_damping(1.0)
///     .with_initial_position(0.25)
///     .with_time_step(0.005);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringConfig<F: Float> {
    /// Mass in kg. Must stay positive. Default: 1.0.
    pub mass: F,
    /// Spring constant in N/m. Default: 1000.0.
    pub stiffness: F,
    /// Viscous damping in N·s/m. Default: 0.0.
    pub damping: F,
    /// Gravitational acceleration in m/s², signed. Default: -9.81.
    pub gravity: F,
    /// Position `reset` returns to. Default: 0.0.
    pub initial_position: F,
    /// Fixed integration step in seconds. Default: 0.005.
    pub time_step: F,
    /// Largest frame delta a bank update will simulate, so a stalled frame
    /// clock cannot trigger a runaway catch-up. Default: 0.1.
    pub max_frame_delta: F,
}

impl<F: Float> SpringConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SpringConfig {
            mass: F::one(),
            stiffness: F::from_f32(1000.0),
            damping: F::zero(),
            gravity: F::from_f64(-9.81),
            initial_position: F::zero(),
            time_step: F::from_f64(0.005),
            max_frame_delta: F::from_f64(0.1),
        }
    }

    /// The four-spring comparison preset: a softer, lightly damped spring
    /// released from 0.25 m.
    pub fn demo() -> Self {
        Self::new()
            .with_stiffness(F::from_f32(200.0))
            .with_damping(F::one())
            .with_initial_position(F::from_f64(0.25))
    }

    /// Set the mass.
    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    /// Set the spring constant.
    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Set the damping coefficient.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Set gravity.
    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the reset position.
    pub fn with_initial_position(mut self, position: F) -> Self {
        self.initial_position = position;
        self
    }

    /// Set the integration step.
    pub fn with_time_step(mut self, time_step: F) -> Self {
        self.time_step = time_step;
        self
    }

    /// Set the frame delta cap.
    pub fn with_max_frame_delta(mut self, max_frame_delta: F) -> Self {
        self.max_frame_delta = max_frame_delta.max(F::zero());
        self
    }
}

impl<F: Float> Default for SpringConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c: SpringConfig<f64> = SpringConfig::default();
        assert_eq!(c.mass, 1.0);
        assert_eq!(c.stiffness, 1000.0);
        assert_eq!(c.damping, 0.0);
        assert_eq!(c.gravity, -9.81);
        assert_eq!(c.time_step, 0.005);
        assert_eq!(c.max_frame_delta, 0.1);
    }

    #[test]
    fn negative_frame_cap_clamped() {
        let c: SpringConfig<f32> = SpringConfig::new().with_max_frame_delta(-1.0);
        assert_eq!(c.max_frame_delta, 0.0);
    }
}
