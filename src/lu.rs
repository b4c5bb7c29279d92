//! LU decomposition with partial pivoting for small fixed-size systems.

use crate::error::PhysicsError;
use crate::float::Float;

/// Packed LU factors of an `N×N` matrix, row-major.
///
/// The upper triangle (diagonal included) holds U; the strict lower triangle
/// holds L, whose unit diagonal is implicit. `perm[i]` is the original row now
/// at position `i`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lu<F: Float, const N: usize> {
    lu: [[F; N]; N],
    perm: [usize; N],
    even: bool,
}

impl<F: Float, const N: usize> Lu<F, N> {
    /// Factor `a`. Fails with [`PhysicsError::SingularSystem`] when a pivot is
    /// below machine epsilon in magnitude or not finite.
    pub fn new(rows: [[F; N]; N]) -> Result<Self, PhysicsError> {
        let mut lu = rows;
        let mut perm = [0usize; N];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i;
        }
        let mut even = true;

        for col in 0..N {
            let mut max_row = col;
            let mut max_val = lu[col][col].abs();
            for row in (col + 1)..N {
                let val = lu[row][col].abs();
                if val > max_val {
                    max_val = val;
                    max_row = row;
                }
            }

            // NaN fails the `<` test, so check finiteness explicitly.
            if !max_val.is_finite() || max_val < F::epsilon() {
                return Err(PhysicsError::SingularSystem);
            }

            if max_row != col {
                lu.swap(col, max_row);
                perm.swap(col, max_row);
                even = !even;
            }

            let inv_pivot = F::one() / lu[col][col];
            for row in (col + 1)..N {
                let factor = lu[row][col] * inv_pivot;
                lu[row][col] = factor;
                for j in (col + 1)..N {
                    lu[row][j] = lu[row][j] - factor * lu[col][j];
                }
            }
        }

        Ok(Lu { lu, perm, even })
    }

    /// Solve `A·x = b` with the stored factors.
    pub fn solve(&self, b: [F; N]) -> [F; N] {
        let mut x = [F::zero(); N];

        // Ly = Pb
        for i in 0..N {
            let mut sum = b[self.perm[i]];
            for j in 0..i {
                sum = sum - self.lu[i][j] * x[j];
            }
            x[i] = sum;
        }

        // Ux = y
        for i in (0..N).rev() {
            let mut sum = x[i];
            for j in (i + 1)..N {
                sum = sum - self.lu[i][j] * x[j];
            }
            x[i] = sum / self.lu[i][i];
        }

        x
    }

    /// Determinant of the factored matrix.
    pub fn determinant(&self) -> F {
        let mut det = if self.even { F::one() } else { -F::one() };
        for i in 0..N {
            det = det * self.lu[i][i];
        }
        det
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_two_by_two() {
        let lu = Lu::new([[2.0f64, 1.0], [5.0, 3.0]]).unwrap();
        let x = lu.solve([4.0, 11.0]);
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
        assert!((lu.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn solves_with_row_swap() {
        // Zero leading entry forces a pivot.
        let lu = Lu::new([
            [0.0f64, 2.0, 1.0],
            [1.0, 1.0, 0.0],
            [3.0, 0.0, 1.0],
        ]).unwrap();
        let x = lu.solve([5.0, 3.0, 4.0]);
        // x = [1, 2, 1] (by substitution)
        assert!((x[0] - 1.0).abs() < 1e-12, "x0 = {}", x[0]);
        assert!((x[1] - 2.0).abs() < 1e-12, "x1 = {}", x[1]);
        assert!((x[2] - 1.0).abs() < 1e-12, "x2 = {}", x[2]);
    }

    #[test]
    fn determinant_tracks_swap_parity() {
        let lu = Lu::new([[0.0f64, 1.0], [1.0, 0.0]]).unwrap();
        assert!((lu.determinant() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn singular_rejected() {
        let err = Lu::new([[1.0f64, 2.0], [2.0, 4.0]]).unwrap_err();
        assert_eq!(err, PhysicsError::SingularSystem);
    }

    #[test]
    fn nan_rejected() {
        let err = Lu::new([[f64::NAN, 0.0], [0.0, 1.0]]).unwrap_err();
        assert_eq!(err, PhysicsError::SingularSystem);
    }
}
