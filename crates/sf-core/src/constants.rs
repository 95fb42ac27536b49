//! Physical constants context.
//!
//! Internal units: energy in eV, time in ps, temperature in K, field in T.
//! The constants are passed explicitly into the equations of motion rather
//! than read from process-wide globals, so a run can override them.

use crate::error::CoreResult;
use crate::numeric::{Real, ensure_positive};
use crate::units::{Temperature, as_kelvin};

/// Boltzmann constant (eV/K).
pub const K_B_EV_PER_K: Real = 8.617_333_262e-5;
/// Reduced Planck constant (eV·ps).
pub const HBAR_EV_PS: Real = 6.582_119_569e-4;
/// Electron gyromagnetic ratio (rad/(ps·T)).
pub const GAMMA_RAD_PER_PS_T: Real = 0.176_085_964_4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalConstants {
    /// Boltzmann constant (eV/K)
    pub k_b: Real,
    /// Reduced Planck constant (eV·ps)
    pub hbar: Real,
    /// Gyromagnetic ratio (rad/(ps·T))
    pub gamma: Real,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            k_b: K_B_EV_PER_K,
            hbar: HBAR_EV_PS,
            gamma: GAMMA_RAD_PER_PS_T,
        }
    }
}

impl PhysicalConstants {
    /// Build a constants context, rejecting non-finite or non-positive values.
    pub fn new(k_b: Real, hbar: Real, gamma: Real) -> CoreResult<Self> {
        Ok(Self {
            k_b: ensure_positive(k_b, "k_b")?,
            hbar: ensure_positive(hbar, "hbar")?,
            gamma: ensure_positive(gamma, "gamma")?,
        })
    }

    /// Thermal energy k_B·T (eV).
    pub fn thermal_energy(&self, temperature: Temperature) -> Real {
        self.k_b * as_kelvin(temperature)
    }

    /// Larmor pulsation γ·B (rad/ps) of an induction `field_t` in tesla.
    pub fn larmor(&self, field_t: Real) -> Real {
        self.gamma * field_t
    }
}
