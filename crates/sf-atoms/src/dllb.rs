//! Landau-Lifshitz-Bloch moment-closure equations (dLLB).
//!
//! The state is the pair `(s, Σ)` of first moment `⟨S⟩` and second moment
//! `⟨S⊗S⟩`. With damping `α`, bath temperature `T` and local pulsation `ω`:
//!
//! ```text
//! c  = 1 / (1 + α²)
//! D  = α k_B T / ħ                      (= α / (β ħ), β = 1 / k_B T)
//! P  = ω ⊗ s,   Q = s ⊗ s
//!
//! A1 = tr(Σ) P − Σᵀ P + P Σᵀ − tr(P) Σᵀ + (P − Pᵀ) Σᵀ − 2 (tr(Q) P − Qᵀ P)
//! M1 = ω × Σᵀ − α A1                    (column-wise cross product)
//! M2 = 2 tr(Σ) I − 3 (Σ + Σᵀ)
//!
//! ds/dt = c [ ω × s − α (tr(Σ) ω − Σᵀ ω) − 2 D c s ]
//! dΣ/dt = c [ M1 + D c M2 + M1ᵀ ]
//! ```
//!
//! The first line of `ds/dt` and the `M1 + M1ᵀ` pair are the precession of
//! both moments, the `α` terms the transverse damping, and the `D` terms the
//! longitudinal relaxation towards the paramagnetic state.

use crate::error::{AtomError, AtomResult};
use crate::moments::MomentState;
use serde::{Deserialize, Serialize};
use sf_core::algebra::{cross_columns, outer};
use sf_core::units::{Temperature, as_kelvin, kelvin};
use sf_core::{Matrix3, PhysicalConstants, Real, Vector3};
use std::fmt;
use std::str::FromStr;

/// Thermal bath coupling for the moment equations.
///
/// Validated on construction: temperature finite and `>= 0` K, damping
/// finite and `>= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bath {
    temperature: Temperature,
    alpha: Real,
}

impl Default for Bath {
    /// `T = 0 K`, no damping: the moment equations reduce to pure precession.
    fn default() -> Self {
        Self {
            temperature: kelvin(0.0),
            alpha: 0.0,
        }
    }
}

impl Bath {
    pub fn new(temperature: Temperature, alpha: Real) -> AtomResult<Self> {
        let t = as_kelvin(temperature);
        if !t.is_finite() || t < 0.0 {
            return Err(AtomError::NonPhysical {
                what: "temperature (K)",
                value: t,
            });
        }
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(AtomError::NonPhysical {
                what: "damping",
                value: alpha,
            });
        }
        Ok(Self { temperature, alpha })
    }

    /// Convenience constructor taking the temperature in kelvin.
    pub fn from_kelvin(t_k: Real, alpha: Real) -> AtomResult<Self> {
        Self::new(kelvin(t_k), alpha)
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn temperature_k(&self) -> Real {
        as_kelvin(self.temperature)
    }

    pub fn alpha(&self) -> Real {
        self.alpha
    }

    /// `1 / (1 + α²)`
    pub fn gilbert_factor(&self) -> Real {
        1.0 / (1.0 + self.alpha * self.alpha)
    }

    /// Diffusion coefficient `D = α k_B T / ħ` (1/ps).
    pub fn diffusion(&self, constants: &PhysicalConstants) -> Real {
        self.alpha * constants.thermal_energy(self.temperature) / constants.hbar
    }
}

/// Time derivative of the moment pair under the dLLB equations.
pub fn moment_rhs(
    moments: &MomentState,
    omega: &Vector3,
    bath: &Bath,
    constants: &PhysicalConstants,
) -> MomentState {
    let alpha = bath.alpha();
    let c = bath.gilbert_factor();
    let d = bath.diffusion(constants);

    let spin = &moments.spin;
    let sigma = &moments.sigma;
    let sigma_t = sigma.transpose();
    let tr_sigma = sigma.trace();

    let p = outer(omega, spin);
    let q = outer(spin, spin);

    let mut a1 = p * tr_sigma - sigma_t * p;
    a1 += p * sigma_t - sigma_t * p.trace();
    a1 += (p - p.transpose()) * sigma_t;
    a1 -= (p * q.trace() - q.transpose() * p) * 2.0;

    let m1 = cross_columns(omega, &sigma_t) - a1 * alpha;
    let m2 = Matrix3::identity() * (2.0 * tr_sigma) - (sigma + sigma_t) * 3.0;

    let damping = omega * (alpha * tr_sigma) - (sigma_t * omega) * alpha;
    let spin_dot = (omega.cross(spin) - damping - spin * (2.0 * d * c)) * c;
    let sigma_dot = (m1 + m2 * (d * c) + m1.transpose()) * c;

    MomentState::new(spin_dot, sigma_dot)
}

/// Moment-path stepping scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentMethod {
    /// Forward Euler: `m += dt f(m)`
    Euler,
    /// Classical fourth-order Runge-Kutta
    #[default]
    Rk4,
    /// Exponential (Lie-group) integrator, reserved; not implemented
    #[serde(rename = "expio1")]
    ExponentialLie,
}

impl MomentMethod {
    pub const ALL: [MomentMethod; 3] = [Self::Euler, Self::Rk4, Self::ExponentialLie];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::Rk4 => "rk4",
            Self::ExponentialLie => "expio1",
        }
    }
}

impl fmt::Display for MomentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MomentMethod {
    type Err = AtomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| AtomError::UnknownMethod {
                what: "moment method",
                name: s.to_string(),
            })
    }
}
