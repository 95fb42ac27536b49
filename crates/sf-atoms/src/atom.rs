//! One lattice site and its per-step advance operations.

use crate::dllb::{Bath, MomentMethod, moment_rhs};
use crate::error::{AtomError, AtomResult};
use crate::moments::MomentState;
use crate::precession::{PrecessionMethod, precess};
use serde::Serialize;
use sf_core::{CoreError, ForwardEuler, Integrator, PhysicalConstants, RK4, Real, Vector3};

/// Physical state of one atom.
///
/// `spin` is a unit vector on the precession (sLLG) path. On the moment
/// (dLLB) path `moments.spin` is authoritative and `spin` mirrors it after
/// every step, so its norm may shrink below one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AtomState {
    /// Name of the atomic species
    pub name: String,
    /// Identifier of the atomic type (used to select exchange pairs)
    pub kind: u32,
    g: Real,
    /// Cartesian position (nm)
    pub position: Vector3,
    /// Spin direction
    pub spin: Vector3,
    /// Local pulsation vector (rad/ps), refreshed by field assembly
    pub omega: Vector3,
    /// First and second moments for the dLLB equations
    pub moments: MomentState,
}

impl AtomState {
    pub fn builder(name: impl Into<String>) -> AtomBuilder {
        AtomBuilder::new(name)
    }

    /// Landé factor in Bohr magneton units.
    pub fn g(&self) -> Real {
        self.g
    }

    /// Advance the unit spin by one undamped precession step around `omega`.
    ///
    /// The state is unchanged on error.
    pub fn advance_spin(&mut self, method: PrecessionMethod, dt: Real) -> AtomResult<()> {
        self.spin = precess(&self.spin, &self.omega, dt, method)?;
        Ok(())
    }

    /// Advance the moment pair by one step of the dLLB equations.
    ///
    /// `omega` is held fixed for the whole step. Afterwards `spin` mirrors
    /// `moments.spin` (no renormalization). The state is unchanged on error.
    pub fn advance_moments(
        &mut self,
        method: MomentMethod,
        dt: Real,
        bath: &Bath,
        constants: &PhysicalConstants,
    ) -> AtomResult<()> {
        let omega = self.omega;
        let rhs = |m: &MomentState| -> AtomResult<MomentState> {
            Ok(moment_rhs(m, &omega, bath, constants))
        };

        let next = match method {
            MomentMethod::Euler => ForwardEuler.step(rhs, &self.moments, dt)?,
            MomentMethod::Rk4 => RK4.step(rhs, &self.moments, dt)?,
            MomentMethod::ExponentialLie => {
                return Err(AtomError::NotImplemented {
                    what: "exponential (Lie-group) moment integrator",
                });
            }
        };

        if !next.is_finite() {
            return Err(CoreError::NonFinite {
                what: "moment state",
                value: next.max_abs(),
            }
            .into());
        }

        self.moments = next;
        self.spin = self.moments.spin;
        Ok(())
    }

    pub fn to_json(&self) -> AtomResult<String> {
        serde_json::to_string(self).map_err(|e| AtomError::Serialization(e.to_string()))
    }
}

/// Builder producing a fully initialized [`AtomState`].
#[derive(Clone, Debug)]
pub struct AtomBuilder {
    name: String,
    kind: u32,
    g: Real,
    position: Vector3,
    spin: Vector3,
    omega: Vector3,
    moments: MomentState,
}

impl AtomBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: 0,
            g: 0.0,
            position: Vector3::zeros(),
            spin: Vector3::zeros(),
            omega: Vector3::zeros(),
            moments: MomentState::zero(),
        }
    }

    pub fn kind(mut self, kind: u32) -> Self {
        self.kind = kind;
        self
    }

    pub fn g(mut self, g: Real) -> Self {
        self.g = g;
        self
    }

    pub fn position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    pub fn spin(mut self, spin: Vector3) -> Self {
        self.spin = spin;
        self
    }

    pub fn omega(mut self, omega: Vector3) -> Self {
        self.omega = omega;
        self
    }

    pub fn moments(mut self, moments: MomentState) -> Self {
        self.moments = moments;
        self
    }

    /// # Errors
    /// [`AtomError::InvalidLandeFactor`] if `g` is negative or not finite.
    pub fn build(self) -> AtomResult<AtomState> {
        if !self.g.is_finite() || self.g < 0.0 {
            return Err(AtomError::InvalidLandeFactor { g: self.g });
        }
        Ok(AtomState {
            name: self.name,
            kind: self.kind,
            g: self.g,
            position: self.position,
            spin: self.spin,
            omega: self.omega,
            moments: self.moments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::Matrix3;
    use sf_core::algebra::vec3;

    fn precessing_atom() -> AtomState {
        AtomState::builder("Fe")
            .kind(1)
            .g(2.0)
            .spin(Vector3::x())
            .omega(vec3(0.0, 0.0, 1.0))
            .moments(MomentState::polarized(Vector3::x()))
            .build()
            .unwrap()
    }

    #[test]
    fn negative_g_is_rejected() {
        let err = AtomState::builder("Fe").g(-2.0).build().unwrap_err();
        assert_eq!(err, AtomError::InvalidLandeFactor { g: -2.0 });
        assert!(AtomState::builder("Fe").g(Real::NAN).build().is_err());
        assert!(AtomState::builder("O").g(0.0).build().is_ok());
    }

    #[test]
    fn advance_spin_keeps_unit_norm() {
        let mut atom = precessing_atom();
        for method in PrecessionMethod::ALL {
            atom.advance_spin(method, 0.01).unwrap();
            assert!((atom.spin.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_field_leaves_spin_untouched() {
        let mut atom = precessing_atom();
        atom.omega = Vector3::zeros();
        let before = atom.spin;
        assert_eq!(
            atom.advance_spin(PrecessionMethod::Full, 0.1),
            Err(AtomError::DegenerateField)
        );
        assert_eq!(atom.spin, before);
    }

    #[test]
    fn moment_advance_mirrors_spin() {
        let mut atom = precessing_atom();
        let bath = Bath::from_kelvin(100.0, 0.1).unwrap();
        atom.advance_moments(MomentMethod::Rk4, 0.01, &bath, &PhysicalConstants::default())
            .unwrap();
        assert_eq!(atom.spin, atom.moments.spin);
        // Longitudinal relaxation shrinks the magnetization.
        assert!(atom.spin.norm() < 1.0);
    }

    #[test]
    fn exponential_integrator_is_reported_not_implemented() {
        let mut atom = precessing_atom();
        let before = atom.clone();
        let bath = Bath::from_kelvin(10.0, 0.1).unwrap();
        let err = atom
            .advance_moments(
                MomentMethod::ExponentialLie,
                1e-3,
                &bath,
                &PhysicalConstants::default(),
            )
            .unwrap_err();
        assert!(matches!(err, AtomError::NotImplemented { .. }));
        assert_eq!(atom, before);
    }

    #[test]
    fn rk4_with_zero_rhs_leaves_moments_unchanged() {
        // ω = 0, T = 0: every term of the right-hand side vanishes for this state.
        let mut atom = AtomState::builder("Ni")
            .g(2.02)
            .moments(MomentState::new(Vector3::zeros(), Matrix3::zeros()))
            .build()
            .unwrap();
        let before = atom.moments;
        let bath = Bath::from_kelvin(0.0, 0.3).unwrap();
        atom.advance_moments(MomentMethod::Rk4, 0.1, &bath, &PhysicalConstants::default())
            .unwrap();
        assert_eq!(atom.moments, before);
    }

    #[test]
    fn json_contains_species_and_spin() {
        let json = precessing_atom().to_json().unwrap();
        assert!(json.contains("\"name\":\"Fe\""));
        assert!(json.contains("\"spin\""));
        assert!(json.contains("\"g\":2.0"));
    }
}
