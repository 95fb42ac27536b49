//! Crystal generation: replicate a unit cell over a supercell.

use crate::atom::AtomState;
use crate::error::{AtomError, AtomResult};
use crate::moments::MomentState;
use serde::{Deserialize, Serialize};
use sf_core::algebra::vec3;
use sf_core::{Real, Vector3};

/// Atom sites of a unit cell, in units of the lattice constant.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitCell {
    pub positions: Vec<Vector3>,
}

impl UnitCell {
    pub fn new(positions: Vec<Vector3>) -> Self {
        Self { positions }
    }

    /// Single site at the origin.
    pub fn simple_cubic() -> Self {
        Self::new(vec![Vector3::zeros()])
    }

    /// Conventional two-site body-centered cubic cell.
    pub fn bcc() -> Self {
        Self::new(vec![Vector3::zeros(), vec3(0.5, 0.5, 0.5)])
    }

    /// Conventional four-site face-centered cubic cell.
    pub fn fcc() -> Self {
        Self::new(vec![
            vec3(0.0, 0.0, 0.0),
            vec3(0.0, 0.5, 0.5),
            vec3(0.5, 0.0, 0.5),
            vec3(0.5, 0.5, 0.0),
        ])
    }
}

/// Number of unit-cell repetitions along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supercell {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl Supercell {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    pub fn cells(&self) -> usize {
        self.nx * self.ny * self.nz
    }
}

/// Per-site initial parameters shared by every generated atom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AtomTemplate {
    pub name: String,
    pub kind: u32,
    pub g: Real,
    pub spin: Vector3,
    pub moments: MomentState,
}

impl AtomTemplate {
    /// Build one atom at `position` from this template.
    pub fn instantiate(&self, position: Vector3) -> AtomResult<AtomState> {
        AtomState::builder(self.name.clone())
            .kind(self.kind)
            .g(self.g)
            .position(position)
            .spin(self.spin)
            .moments(self.moments)
            .build()
    }
}

/// Generate the atoms of `supercell` copies of `unit_cell`.
///
/// Site positions are `a · (p + (i, j, k))`, ordered with `i` outermost, then
/// `j`, `k`, then unit-cell order.
pub fn build_lattice(
    unit_cell: &UnitCell,
    supercell: Supercell,
    lattice_constant: Real,
    template: &AtomTemplate,
) -> AtomResult<Vec<AtomState>> {
    if unit_cell.positions.is_empty() {
        return Err(AtomError::InvalidArg {
            what: "unit cell has no sites",
        });
    }
    if supercell.cells() == 0 {
        return Err(AtomError::InvalidArg {
            what: "supercell dimensions must be at least 1",
        });
    }
    if !lattice_constant.is_finite() || lattice_constant <= 0.0 {
        return Err(AtomError::NonPhysical {
            what: "lattice constant",
            value: lattice_constant,
        });
    }

    let mut atoms = Vec::with_capacity(supercell.cells() * unit_cell.positions.len());
    for i in 0..supercell.nx {
        for j in 0..supercell.ny {
            for k in 0..supercell.nz {
                let translation = vec3(i as Real, j as Real, k as Real);
                for site in &unit_cell.positions {
                    let position = (site + translation) * lattice_constant;
                    atoms.push(template.instantiate(position)?);
                }
            }
        }
    }
    Ok(atoms)
}
