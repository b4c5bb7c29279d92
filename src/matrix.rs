//! Square matrices for linear ODEs and their factorizations.

use core::ops::Sub;

use crate::error::PhysicsError;
use crate::float::Float;
use crate::lu::Lu;
use crate::vec::{Vec, Vec2, Vec3};

/// A cached factorization that can be applied to right-hand sides.
pub trait Solve<V: Vec> {
    /// Solve `M·x = rhs` for `x`, where `M` is the factored matrix.
    fn solve_vec(&self, rhs: V) -> V;
}

/// Square matrix acting on a state vector type.
///
/// Only the operations implicit schemes need: build `I - dt·A`, multiply a
/// state, and factor for repeated solves.
pub trait SquareMatrix: Copy + Clone + Sub<Output = Self> + PartialEq + core::fmt::Debug {
    /// The vector type this matrix maps to itself.
    type Vector: Vec;

    /// Factorization produced by [`SquareMatrix::factorize`].
    type Factorization: Solve<Self::Vector> + Clone + core::fmt::Debug;

    /// Identity matrix.
    fn identity() -> Self;

    /// Multiply every entry by `s`.
    fn scale(self, s: <Self::Vector as Vec>::Scalar) -> Self;

    /// Matrix-vector product.
    fn mul_vec(self, v: Self::Vector) -> Self::Vector;

    /// Factor for repeated solves. Fails on a singular matrix.
    fn factorize(self) -> Result<Self::Factorization, PhysicsError>;
}

impl<F: Float, const N: usize> Lu<F, N> {
    fn solve_components<V: Vec<Scalar = F>>(&self, rhs: V) -> V {
        debug_assert_eq!(V::DIM, N);
        let b = core::array::from_fn(|i| rhs.component(i));
        let x = self.solve(b);
        V::from_fn(|i| x[i])
    }
}

// --------------------------------------------------------------------------
// Mat2<F>
// --------------------------------------------------------------------------

/// 2×2 matrix, row-major.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Mat2<F: Float> {
    pub rows: [[F; 2]; 2],
}

impl<F: Float> Mat2<F> {
    /// Create from rows.
    pub fn new(rows: [[F; 2]; 2]) -> Self { Mat2 { rows } }

    /// Determinant.
    pub fn determinant(&self) -> F {
        let [[a, b], [c, d]] = self.rows;
        a * d - b * c
    }
}

impl<F: Float> Sub for Mat2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut rows = self.rows;
        for (row, other) in rows.iter_mut().zip(rhs.rows.iter()) {
            for (a, b) in row.iter_mut().zip(other.iter()) {
                *a = *a - *b;
            }
        }
        Mat2 { rows }
    }
}

impl<F: Float> SquareMatrix for Mat2<F> {
    type Vector = Vec2<F>;
    type Factorization = Lu<F, 2>;

    fn identity() -> Self {
        Mat2::new([[F::one(), F::zero()], [F::zero(), F::one()]])
    }

    fn scale(self, s: F) -> Self {
        let [[a, b], [c, d]] = self.rows;
        Mat2::new([[a * s, b * s], [c * s, d * s]])
    }

    fn mul_vec(self, v: Vec2<F>) -> Vec2<F> {
        let [[a, b], [c, d]] = self.rows;
        Vec2::new(a * v.x + b * v.y, c * v.x + d * v.y)
    }

    fn factorize(self) -> Result<Lu<F, 2>, PhysicsError> {
        Lu::new(self.rows)
    }
}

impl<F: Float> Solve<Vec2<F>> for Lu<F, 2> {
    fn solve_vec(&self, rhs: Vec2<F>) -> Vec2<F> {
        self.solve_components(rhs)
    }
}

// --------------------------------------------------------------------------
// Mat3<F>
// --------------------------------------------------------------------------

/// 3×3 matrix, row-major.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Mat3<F: Float> {
    pub rows: [[F; 3]; 3],
}

impl<F: Float> Mat3<F> {
    /// Create from rows.
    pub fn new(rows: [[F; 3]; 3]) -> Self { Mat3 { rows } }
}

impl<F: Float> Sub for Mat3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut rows = self.rows;
        for (row, other) in rows.iter_mut().zip(rhs.rows.iter()) {
            for (a, b) in row.iter_mut().zip(other.iter()) {
                *a = *a - *b;
            }
        }
        Mat3 { rows }
    }
}

impl<F: Float> SquareMatrix for Mat3<F> {
    type Vector = Vec3<F>;
    type Factorization = Lu<F, 3>;

    fn identity() -> Self {
        let (o, z) = (F::one(), F::zero());
        Mat3::new([[o, z, z], [z, o, z], [z, z, o]])
    }

    fn scale(self, s: F) -> Self {
        let mut rows = self.rows;
        for row in rows.iter_mut() {
            for a in row.iter_mut() {
                *a = *a * s;
            }
        }
        Mat3 { rows }
    }

    fn mul_vec(self, v: Vec3<F>) -> Vec3<F> {
        Vec3::from_fn(|i| {
            let r = self.rows[i];
            r[0] * v.x + r[1] * v.y + r[2] * v.z
        })
    }

    fn factorize(self) -> Result<Lu<F, 3>, PhysicsError> {
        Lu::new(self.rows)
    }
}

impl<F: Float> Solve<Vec3<F>> for Lu<F, 3> {
    fn solve_vec(&self, rhs: Vec3<F>) -> Vec3<F> {
        self.solve_components(rhs)
    }
}
