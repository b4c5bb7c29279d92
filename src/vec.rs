//! State vector types and the state-vector capability trait.

use crate::float::Float;
use core::ops::{Add, Sub, Neg};

/// Trait for the state vectors an ODE evolves.
///
/// Integrators only need addition and scaling; the component accessors exist
/// so that matrix factorizations can move between a vector and raw arrays.
pub trait Vec:
    Copy
    + Clone
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + PartialEq
    + Default
    + core::fmt::Debug
{
    /// The scalar (float) type for this vector.
    type Scalar: Float;

    /// Number of components.
    const DIM: usize;

    /// Zero vector.
    fn zero() -> Self;

    /// Build a vector from a per-component function.
    fn from_fn(f: impl FnMut(usize) -> Self::Scalar) -> Self;

    /// Component `i`. Panics if `i >= DIM`.
    fn component(self, i: usize) -> Self::Scalar;

    /// Scale all components by a scalar.
    fn scale(self, s: Self::Scalar) -> Self;

    /// Largest absolute component.
    fn max_abs(self) -> Self::Scalar {
        let mut m = Self::Scalar::zero();
        for i in 0..Self::DIM {
            m = m.max(self.component(i).abs());
        }
        m
    }

    /// `self + other * s`, the update every explicit stage performs.
    fn add_scaled(self, other: Self, s: Self::Scalar) -> Self {
        self + other.scale(s)
    }

    /// True when every component is finite.
    fn is_finite(self) -> bool {
        (0..Self::DIM).all(|i| self.component(i).is_finite())
    }
}

// --------------------------------------------------------------------------
// Scalar<F>: 1D wrapper
// --------------------------------------------------------------------------

/// 1D state: a scalar value implementing the Vec trait.
///
/// Useful for first-order scalar ODEs such as exponential decay.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Scalar<F: Float>(pub F);

impl<F: Float> Add for Scalar<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Scalar(self.0 + rhs.0) }
}

impl<F: Float> Sub for Scalar<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Scalar(self.0 - rhs.0) }
}

impl<F: Float> Neg for Scalar<F> {
    type Output = Self;
    fn neg(self) -> Self { Scalar(-self.0) }
}

impl<F: Float> Vec for Scalar<F> {
    type Scalar = F;
    const DIM: usize = 1;
    fn zero() -> Self { Scalar(F::zero()) }
    fn from_fn(mut f: impl FnMut(usize) -> F) -> Self { Scalar(f(0)) }
    fn component(self, i: usize) -> F {
        match i {
            0 => self.0,
            _ => panic!("component index {} out of range for Scalar", i),
        }
    }
    fn scale(self, s: F) -> Self { Scalar(self.0 * s) }
}

// --------------------------------------------------------------------------
// Vec2<F>: 2D state
// --------------------------------------------------------------------------

/// 2D state vector.
///
/// The spring model stores (velocity, position) as (`x`, `y`); see
/// [`Vec2::velocity`] and [`Vec2::position`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// First component, read as velocity in a (velocity, position) state.
    pub fn velocity(self) -> F { self.x }

    /// Second component, read as position in a (velocity, position) state.
    pub fn position(self) -> F { self.y }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> Vec for Vec2<F> {
    type Scalar = F;
    const DIM: usize = 2;
    fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }
    fn from_fn(mut f: impl FnMut(usize) -> F) -> Self { Vec2 { x: f(0), y: f(1) } }
    fn component(self, i: usize) -> F {
        match i {
            0 => self.x,
            1 => self.y,
            _ => panic!("component index {} out of range for Vec2", i),
        }
    }
    fn scale(self, s: F) -> Self { Vec2 { x: self.x * s, y: self.y * s } }
}

// --------------------------------------------------------------------------
// Vec3<F>: 3D state
// --------------------------------------------------------------------------

/// 3D state vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Create a new 3D vector.
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

impl<F: Float> Vec for Vec3<F> {
    type Scalar = F;
    const DIM: usize = 3;
    fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }
    fn from_fn(mut f: impl FnMut(usize) -> F) -> Self {
        let x = f(0);
        let y = f(1);
        let z = f(2);
        Vec3 { x, y, z }
    }
    fn component(self, i: usize) -> F {
        match i {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("component index {} out of range for Vec3", i),
        }
    }
    fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_state_accessors() {
        let s = Vec2::new(-1.5f64, 0.25);
        assert_eq!(s.velocity(), -1.5);
        assert_eq!(s.position(), 0.25);
    }

    #[test]
    fn from_fn_matches_components() {
        let v: Vec3<f64> = Vec3::from_fn(|i| i as f64 + 1.0);
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
        for i in 0..3 {
            assert_eq!(v.component(i), i as f64 + 1.0);
        }
    }

    #[test]
    fn add_scaled_is_axpy() {
        let a = Vec2::new(1.0f64, 2.0);
        let b = Vec2::new(10.0f64, -10.0);
        assert_eq!(a.add_scaled(b, 0.5), Vec2::new(6.0, -3.0));
    }

    #[test]
    fn max_abs_picks_largest_magnitude() {
        let v = Vec3::new(1.0f64, -7.0, 3.0);
        assert_eq!(v.max_abs(), 7.0);
    }

    #[test]
    fn non_finite_detected() {
        assert!(Vec2::new(1.0f64, 2.0).is_finite());
        assert!(!Vec2::new(f64::NAN, 2.0).is_finite());
    }
}
