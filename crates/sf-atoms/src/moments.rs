//! First and second moments of the local spin distribution.

use serde::{Deserialize, Serialize};
use sf_core::{Matrix3, Real, Vector3, VectorSpace};

/// Ensemble-averaged spin `⟨S⟩` and second-moment cumulant `⟨S⊗S⟩`.
///
/// Addition and scaling act component-wise on both fields, so a
/// `MomentState` is a single ODE state for the RK4 stepper.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MomentState {
    pub spin: Vector3,
    pub sigma: Matrix3,
}

impl Default for MomentState {
    fn default() -> Self {
        Self::zero()
    }
}

impl MomentState {
    pub fn new(spin: Vector3, sigma: Matrix3) -> Self {
        Self { spin, sigma }
    }

    pub fn zero() -> Self {
        Self {
            spin: Vector3::zeros(),
            sigma: Matrix3::zeros(),
        }
    }

    /// Pure (uncorrelated) state of a single unit spin: `⟨S⟩ = s`, `⟨S⊗S⟩ = s⊗s`.
    pub fn polarized(spin: Vector3) -> Self {
        Self {
            spin,
            sigma: sf_core::algebra::outer(&spin, &spin),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        Self {
            spin: self.spin + other.spin,
            sigma: self.sigma + other.sigma,
        }
    }

    pub fn scale(&self, s: Real) -> Self {
        Self {
            spin: self.spin * s,
            sigma: self.sigma * s,
        }
    }

    /// Largest absolute component over both fields.
    pub fn max_abs(&self) -> Real {
        self.spin.amax().max(self.sigma.amax())
    }

    pub fn is_finite(&self) -> bool {
        self.spin.iter().chain(self.sigma.iter()).all(|v| v.is_finite())
    }
}

impl VectorSpace for MomentState {
    fn add(&self, other: &Self) -> Self {
        MomentState::add(self, other)
    }

    fn scale(&self, s: Real) -> Self {
        MomentState::scale(self, s)
    }
}

impl std::ops::Add for MomentState {
    type Output = MomentState;

    fn add(self, rhs: MomentState) -> MomentState {
        MomentState::add(&self, &rhs)
    }
}

impl std::ops::AddAssign for MomentState {
    fn add_assign(&mut self, rhs: MomentState) {
        *self = MomentState::add(self, &rhs);
    }
}

impl std::ops::Mul<MomentState> for Real {
    type Output = MomentState;

    fn mul(self, rhs: MomentState) -> MomentState {
        rhs.scale(self)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use sf_core::algebra::vec3;

    fn moments() -> impl Strategy<Value = MomentState> {
        (
            prop::array::uniform3(-2.0_f64..2.0),
            prop::array::uniform9(-2.0_f64..2.0),
        )
            .prop_map(|(s, m)| {
                MomentState::new(vec3(s[0], s[1], s[2]), Matrix3::from_row_slice(&m))
            })
    }

    proptest! {
        #[test]
        fn add_commutes(a in moments(), b in moments()) {
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn scale_distributes_over_add(s in -3.0_f64..3.0, a in moments(), b in moments()) {
            let lhs = a.add(&b).scale(s);
            let rhs = a.scale(s).add(&b.scale(s));
            prop_assert!(lhs.add(&rhs.scale(-1.0)).max_abs() <= 1e-12);
        }

        #[test]
        fn scalar_addition_distributes(s in -3.0_f64..3.0, t in -3.0_f64..3.0, a in moments()) {
            let lhs = a.scale(s + t);
            let rhs = a.scale(s).add(&a.scale(t));
            prop_assert!(lhs.add(&rhs.scale(-1.0)).max_abs() <= 1e-12);
        }
    }
}
