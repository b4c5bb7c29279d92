//! Error types for integration operations.

use core::fmt;

/// Errors that can occur while configuring or stepping an integrator.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// `(I - dt·A)` could not be factored; the implicit solve is undefined.
    SingularSystem,
    /// Step size must be positive and finite.
    InvalidTimeStep,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::SingularSystem => write!(f, "system matrix (I - dt*A) is singular"),
            PhysicsError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
        }
    }
}
