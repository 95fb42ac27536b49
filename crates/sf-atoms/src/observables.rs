//! Aggregate observables over an atom collection.

use crate::atom::AtomState;
use sf_core::{Real, Vector3};

/// Average spin `M = (1/N) Σ s_i`. Zero for an empty collection.
pub fn magnetization(atoms: &[AtomState]) -> Vector3 {
    if atoms.is_empty() {
        return Vector3::zeros();
    }
    let sum: Vector3 = atoms.iter().map(|a| a.spin).sum();
    sum / atoms.len() as Real
}

/// `|M|`
pub fn magnetization_length(atoms: &[AtomState]) -> Real {
    magnetization(atoms).norm()
}
