//! Ordinary differential equation contracts.

use crate::matrix::SquareMatrix;
use crate::vec::Vec;

/// An ODE `y' = f(t, y)`.
///
/// `derivative` must be a pure function of its arguments and the model's
/// current parameters: multi-stage schemes call it several times per step at
/// off-grid `(t, y)` points.
pub trait Ode {
    /// State vector type.
    type State: Vec;

    /// Evaluate `f(t, y)`.
    fn derivative(&self, t: <Self::State as Vec>::Scalar, y: Self::State) -> Self::State;
}

/// An ODE of the form `y' = A·y + b`.
///
/// Implicit schemes factor `(I - dt·A)` once and reuse it, so implementors
/// report changes to `A` through [`LinearOde::take_matrix_changed`].
pub trait LinearOde: Ode {
    /// Matrix type for `A`.
    type Matrix: SquareMatrix<Vector = Self::State>;

    /// The current `A`.
    fn matrix_a(&self) -> Self::Matrix;

    /// The current `b`.
    fn vector_b(&self) -> Self::State;

    /// Returns `true` once after `A` changed, then `false` until it changes
    /// again. Reading clears the flag.
    fn take_matrix_changed(&mut self) -> bool {
        false
    }
}
