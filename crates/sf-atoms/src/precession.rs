//! Undamped precession of a unit spin around its local pulsation vector.
//!
//! Four schemes advance `ds/dt = ω × s` by one step of length `dt`:
//!
//! ```text
//! Euler:       s' = s + dt (ω × s)
//! Rk4:         classical Runge-Kutta on ω × s at fixed ω
//! Symplectic:  c = dt²/4,  c2 = 1 / (1 + c ω²)
//!              s' = c2 [ s + c (2(ω·s) ω − ω² s) + dt (ω × s) ]
//! Full:        Ω = ω/|ω|,  ξ = |ω| dt
//!              s' = cos ξ s + sin ξ (Ω × s) + (Ω·s)(1 − cos ξ) Ω
//! ```
//!
//! Every scheme renormalizes the result, so `|s'| = 1` after a successful
//! call. `Full` is an exact rigid rotation and needs `|ω| > 0`; the other
//! schemes leave the spin in place when `ω = 0`. `Symplectic` is the implicit
//! midpoint rule, which conserves the norm far better than `Euler` over long
//! runs at the same step.

use crate::error::{AtomError, AtomResult};
use serde::{Deserialize, Serialize};
use sf_core::algebra::try_normalize;
use sf_core::{Integrator, RK4, Real, Vector3};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Precession scheme selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecessionMethod {
    /// Explicit Euler (1st order, cheapest)
    Euler,
    /// Classical fourth-order Runge-Kutta
    Rk4,
    /// Implicit midpoint (norm-conserving to 2nd order)
    Symplectic,
    /// Closed-form rotation about ω (exact for a frozen field)
    #[default]
    Full,
}

impl PrecessionMethod {
    pub const ALL: [PrecessionMethod; 4] = [Self::Euler, Self::Rk4, Self::Symplectic, Self::Full];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::Rk4 => "rk4",
            Self::Symplectic => "symplectic",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for PrecessionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrecessionMethod {
    type Err = AtomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| AtomError::UnknownMethod {
                what: "precession method",
                name: s.to_string(),
            })
    }
}

/// Advance a unit spin by one precession step.
///
/// # Errors
/// - [`AtomError::DegenerateField`] for `Full` when `|ω| = 0` (no rotation axis)
/// - [`AtomError::Core`] if the updated spin cannot be renormalized
pub fn precess(
    spin: &Vector3,
    omega: &Vector3,
    dt: Real,
    method: PrecessionMethod,
) -> AtomResult<Vector3> {
    let s = match method {
        PrecessionMethod::Euler => spin + omega.cross(spin) * dt,
        PrecessionMethod::Rk4 => {
            let torque = |s: &Vector3| -> Result<Vector3, Infallible> { Ok(omega.cross(s)) };
            match RK4.step(torque, spin, dt) {
                Ok(s) => s,
                Err(never) => match never {},
            }
        }
        PrecessionMethod::Symplectic => {
            let w2 = omega.dot(omega);
            let c = 0.25 * dt * dt;
            let c2 = 1.0 / (1.0 + c * w2);
            let mut s1 = (omega * (2.0 * omega.dot(spin)) - spin * w2) * c;
            s1 += omega.cross(spin) * dt;
            (spin + s1) * c2
        }
        PrecessionMethod::Full => {
            let n = omega.norm();
            if n == 0.0 || !n.is_finite() {
                return Err(AtomError::DegenerateField);
            }
            let axis = omega / n;
            let xi = n * dt;
            let chi = axis.dot(spin);
            let (sin, cos) = xi.sin_cos();
            spin * cos + axis.cross(spin) * sin + axis * (chi * (1.0 - cos))
        }
    };
    try_normalize(&s, "precessed spin").map_err(AtomError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::algebra::vec3;
    use std::f64::consts::PI;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "Symplectic".parse::<PrecessionMethod>().unwrap(),
            PrecessionMethod::Symplectic
        );
        assert_eq!(" FULL ".parse::<PrecessionMethod>().unwrap(), PrecessionMethod::Full);
        assert_eq!("RK4".parse::<PrecessionMethod>().unwrap(), PrecessionMethod::Rk4);
        let err = "heun".parse::<PrecessionMethod>().unwrap_err();
        assert!(matches!(err, AtomError::UnknownMethod { .. }));
    }

    #[test]
    fn full_rotation_quarter_turn_about_z() {
        let omega = vec3(0.0, 0.0, 2.0);
        let s = precess(&Vector3::x(), &omega, PI / 4.0, PrecessionMethod::Full).unwrap();
        assert!((s - Vector3::y()).norm() < 1e-14, "got {s:?}");
    }

    #[test]
    fn full_rotation_rejects_zero_field() {
        let err = precess(&Vector3::x(), &Vector3::zeros(), 0.1, PrecessionMethod::Full)
            .unwrap_err();
        assert_eq!(err, AtomError::DegenerateField);
    }

    #[test]
    fn explicit_schemes_tolerate_zero_field() {
        let s0 = vec3(0.0, 0.6, 0.8);
        for method in [
            PrecessionMethod::Euler,
            PrecessionMethod::Rk4,
            PrecessionMethod::Symplectic,
        ] {
            let s = precess(&s0, &Vector3::zeros(), 0.1, method).unwrap();
            assert!((s - s0).norm() < 1e-15);
        }
    }

    #[test]
    fn symplectic_matches_cayley_rotation_angle() {
        // The implicit midpoint map is the Cayley transform: rotation angle 2·atan(|ω|dt/2).
        let omega = vec3(0.0, 0.0, 1.0);
        let dt = 0.5;
        let s = precess(&Vector3::x(), &omega, dt, PrecessionMethod::Symplectic).unwrap();
        let angle = 2.0 * (0.5 * dt).atan();
        assert!((s - vec3(angle.cos(), angle.sin(), 0.0)).norm() < 1e-14);
    }

    #[test]
    fn rk4_tracks_closed_form_rotation() {
        let omega = vec3(0.3, -0.4, 1.1);
        let s0 = vec3(0.48, 0.6, 0.64);
        let mut rk4 = s0;
        let mut exact = s0;
        for _ in 0..100 {
            rk4 = precess(&rk4, &omega, 0.01, PrecessionMethod::Rk4).unwrap();
            exact = precess(&exact, &omega, 0.01, PrecessionMethod::Full).unwrap();
        }
        assert!((rk4 - exact).norm() < 1e-10, "{rk4:?} vs {exact:?}");
    }

    #[test]
    fn projection_on_axis_is_conserved() {
        let omega = vec3(0.3, -0.4, 1.1);
        let s0 = vec3(0.48, 0.6, 0.64);
        let axis = omega.normalize();
        for method in [PrecessionMethod::Symplectic, PrecessionMethod::Full] {
            let mut s = s0;
            for _ in 0..100 {
                s = precess(&s, &omega, 0.05, method).unwrap();
            }
            assert!((axis.dot(&s) - axis.dot(&s0)).abs() < 1e-12, "{method}");
        }
    }
}
