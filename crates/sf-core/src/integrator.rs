//! Fixed-step time integrators.
//!
//! The schemes only need the state to form a vector space (add two states,
//! scale a state by a scalar), so the same RK4 drives a plain vector, a
//! scalar, or a first/second moment pair.

use crate::algebra::{Matrix3, Vector3};
use crate::numeric::Real;

/// State that can be combined linearly by an integrator.
///
/// Implementations must satisfy the vector-space laws (commutative `add`,
/// `scale(1) = self`, `scale` distributes over `add`).
pub trait VectorSpace: Clone {
    /// Add two states element-wise: result = self + other.
    fn add(&self, other: &Self) -> Self;

    /// Scale a state by a scalar: result = s * self.
    fn scale(&self, s: Real) -> Self;
}

impl VectorSpace for Real {
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn scale(&self, s: Real) -> Self {
        self * s
    }
}

impl VectorSpace for Vector3 {
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn scale(&self, s: Real) -> Self {
        self * s
    }
}

impl VectorSpace for Matrix3 {
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn scale(&self, s: Real) -> Self {
        self * s
    }
}

/// Trait for time integrators.
///
/// `rhs` computes the time derivative of an (autonomous) state; errors it
/// returns abort the step unchanged.
pub trait Integrator {
    /// Advance state by one time step.
    fn step<S, E, F>(&self, rhs: F, x: &S, dt: Real) -> Result<S, E>
    where
        S: VectorSpace,
        F: FnMut(&S) -> Result<S, E>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<S, E, F>(&self, mut rhs: F, x: &S, dt: Real) -> Result<S, E>
    where
        S: VectorSpace,
        F: FnMut(&S) -> Result<S, E>,
    {
        let k1 = rhs(x)?;

        let x2 = x.add(&k1.scale(0.5 * dt));
        let k2 = rhs(&x2)?;

        let x3 = x.add(&k2.scale(0.5 * dt));
        let k3 = rhs(&x3)?;

        let x4 = x.add(&k3.scale(dt));
        let k4 = rhs(&x4)?;

        // Combine: x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = k1
            .add(&k2.scale(2.0))
            .add(&k3.scale(2.0).add(&k4));

        Ok(x.add(&k_sum.scale(dt / 6.0)))
    }
}

/// Forward Euler (explicit, 1st order).
/// Calls rhs() once per step instead of 4 times (RK4).
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<S, E, F>(&self, mut rhs: F, x: &S, dt: Real) -> Result<S, E>
    where
        S: VectorSpace,
        F: FnMut(&S) -> Result<S, E>,
    {
        let xdot = rhs(x)?;
        Ok(x.add(&xdot.scale(dt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn decay(x: &Real) -> Result<Real, Infallible> {
        Ok(-x)
    }

    #[test]
    fn rk4_exponential_decay_is_fourth_order() {
        let dt = 0.1;
        let mut x = 1.0;
        for _ in 0..10 {
            x = RK4.step(decay, &x, dt).unwrap();
        }
        let exact = (-1.0_f64).exp();
        assert!((x - exact).abs() < 1e-6, "rk4 error {}", (x - exact).abs());
    }

    #[test]
    fn euler_exponential_decay_matches_closed_form() {
        let dt = 0.1;
        let mut x = 1.0;
        for _ in 0..10 {
            x = ForwardEuler.step(decay, &x, dt).unwrap();
        }
        assert!((x - 0.9_f64.powi(10)).abs() < 1e-12);
    }

    #[test]
    fn zero_rhs_leaves_state_unchanged() {
        let x = Vector3::new(0.3, -0.4, 1.2);
        let zero = |_: &Vector3| -> Result<Vector3, Infallible> { Ok(Vector3::zeros()) };
        assert_eq!(RK4.step(zero, &x, 0.5).unwrap(), x);
        assert_eq!(ForwardEuler.step(zero, &x, 0.5).unwrap(), x);
    }

    #[test]
    fn rhs_error_aborts_step() {
        let failing = |_: &Real| -> Result<Real, &'static str> { Err("boom") };
        assert_eq!(RK4.step(failing, &1.0, 0.1), Err("boom"));
    }
}
