//! Field-assembly seam consumed by the integrator.

use crate::error::FieldResult;
use sf_atoms::AtomState;

/// Recompute the local pulsation `ω` of every atom from the current spins.
///
/// Called by the integrator once per step, after all atoms have been
/// advanced. Implementations may cache data that only depends on positions
/// (neighbour lists), hence `&mut self`.
pub trait FieldAssembly {
    fn recompute(&mut self, atoms: &mut [AtomState]) -> FieldResult<()>;
}

/// Fields that never change: each atom keeps the `ω` it was built with.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticFields;

impl FieldAssembly for StaticFields {
    fn recompute(&mut self, _atoms: &mut [AtomState]) -> FieldResult<()> {
        Ok(())
    }
}
