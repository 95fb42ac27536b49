//! Zeeman, uniaxial and exchange contributions to the local pulsation.
//!
//! For every atom `i`, `ω_i` is rebuilt from scratch on each call:
//!
//! ```text
//! ω_i = Σ_zeeman  value · d
//!     + Σ_uniax   value · (s_i · n) n
//!     + Σ_exch    J · Σ_{j ∈ N(i)} s_j
//! ```
//!
//! where `N(i)` holds the atoms `j ≠ i` whose types match the coupling pair
//! and whose (possibly minimum-image) distance satisfies `0 < r_ij ≤ r_cut`.
//! All values are pulsations (rad/ps). Neighbour lists depend only on
//! positions and types; they are built on the first recompute and rebuilt
//! whenever an atom's position or type differs from the last build.

use crate::boundary::Boundary;
use crate::error::{FieldError, FieldResult};
use crate::traits::FieldAssembly;
use sf_atoms::AtomState;
use sf_core::algebra::try_normalize;
use sf_core::{Real, Vector3};
use tracing::debug;

/// Exchange coupling between two atom types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExchangeCoupling {
    pub type_i: u32,
    pub type_j: u32,
    /// Coupling strength J (rad/ps)
    pub value: Real,
    /// Cutoff radius (nm)
    pub cutoff: Real,
}

impl ExchangeCoupling {
    fn couples(&self, a: u32, b: u32) -> bool {
        (a == self.type_i && b == self.type_j) || (a == self.type_j && b == self.type_i)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Zeeman {
    direction: Vector3,
    value: Real,
}

#[derive(Clone, Debug, PartialEq)]
struct Uniaxial {
    axis: Vector3,
    value: Real,
}

/// Neighbour list of one exchange coupling: `(i, j)` pairs, both directions.
#[derive(Clone, Debug, Default)]
struct Neighbours {
    per_atom: Vec<Vec<usize>>,
}

/// Configured interactions for one atom collection.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    zeeman: Vec<Zeeman>,
    uniaxial: Vec<Uniaxial>,
    exchange: Vec<ExchangeCoupling>,
    boundary: Boundary,
    neighbours: Option<Vec<Neighbours>>,
    /// `(kind, position)` of every atom when the lists were built
    sites: Vec<(u32, Vector3)>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uniform applied pulsation `value` along `direction`.
    pub fn zeeman(mut self, direction: Vector3, value: Real) -> FieldResult<Self> {
        let direction = try_normalize(&direction, "zeeman direction")?;
        ensure_finite(value, "zeeman value")?;
        self.zeeman.push(Zeeman { direction, value });
        Ok(self)
    }

    /// Uniaxial anisotropy of strength `value` along `axis`.
    pub fn uniaxial(mut self, axis: Vector3, value: Real) -> FieldResult<Self> {
        let axis = try_normalize(&axis, "uniaxial axis")?;
        ensure_finite(value, "uniaxial value")?;
        self.uniaxial.push(Uniaxial { axis, value });
        Ok(self)
    }

    /// Exchange coupling between atoms of `type_i` and `type_j` within `cutoff`.
    pub fn exchange(mut self, coupling: ExchangeCoupling) -> FieldResult<Self> {
        ensure_finite(coupling.value, "exchange value")?;
        if !coupling.cutoff.is_finite() || coupling.cutoff <= 0.0 {
            return Err(FieldError::NonPhysical {
                what: "exchange cutoff",
                value: coupling.cutoff,
            });
        }
        self.exchange.push(coupling);
        self.neighbours = None;
        Ok(self)
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self.neighbours = None;
        self
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn is_empty(&self) -> bool {
        self.zeeman.is_empty() && self.uniaxial.is_empty() && self.exchange.is_empty()
    }

    /// Build the exchange neighbour lists for `atoms`.
    ///
    /// Called automatically by recompute when the atoms' types or positions
    /// changed since the last build.
    pub fn prepare(&mut self, atoms: &[AtomState]) {
        let lists = self
            .exchange
            .iter()
            .map(|coupling| {
                let mut per_atom = vec![Vec::new(); atoms.len()];
                for (i, a) in atoms.iter().enumerate() {
                    for (j, b) in atoms.iter().enumerate().skip(i + 1) {
                        if !coupling.couples(a.kind, b.kind) {
                            continue;
                        }
                        let r = self.boundary.distance(&a.position, &b.position);
                        if r > 0.0 && r <= coupling.cutoff {
                            per_atom[i].push(j);
                            per_atom[j].push(i);
                        }
                    }
                }
                Neighbours { per_atom }
            })
            .collect::<Vec<_>>();

        for (coupling, list) in self.exchange.iter().zip(&lists) {
            let pairs: usize = list.per_atom.iter().map(Vec::len).sum::<usize>() / 2;
            debug!(
                type_i = coupling.type_i,
                type_j = coupling.type_j,
                cutoff = coupling.cutoff,
                pairs,
                "built exchange neighbour list"
            );
        }
        self.neighbours = Some(lists);
        self.sites = atoms.iter().map(|a| (a.kind, a.position)).collect();
    }

    /// Number of exchange neighbours of atom `index` for coupling `coupling`.
    pub fn neighbour_count(&self, coupling: usize, index: usize) -> Option<usize> {
        self.neighbours
            .as_ref()?
            .get(coupling)?
            .per_atom
            .get(index)
            .map(Vec::len)
    }

    fn is_prepared_for(&self, atoms: &[AtomState]) -> bool {
        self.neighbours.is_some()
            && self.sites.len() == atoms.len()
            && self
                .sites
                .iter()
                .zip(atoms)
                .all(|(&(kind, position), a)| kind == a.kind && position == a.position)
    }
}

impl FieldAssembly for Interaction {
    fn recompute(&mut self, atoms: &mut [AtomState]) -> FieldResult<()> {
        if !self.is_prepared_for(atoms) {
            self.prepare(atoms);
        }

        let spins: Vec<Vector3> = atoms.iter().map(|a| a.spin).collect();
        let lists = self.neighbours.as_deref().unwrap_or_default();

        for (i, atom) in atoms.iter_mut().enumerate() {
            let mut omega = Vector3::zeros();
            for z in &self.zeeman {
                omega += z.direction * z.value;
            }
            for u in &self.uniaxial {
                omega += u.axis * (u.value * u.axis.dot(&spins[i]));
            }
            for (coupling, list) in self.exchange.iter().zip(lists) {
                let sum: Vector3 = list.per_atom[i].iter().map(|&j| spins[j]).sum();
                omega += sum * coupling.value;
            }
            atom.omega = omega;
        }
        Ok(())
    }
}

fn ensure_finite(v: Real, what: &'static str) -> FieldResult<Real> {
    Ok(sf_core::ensure_finite(v, what)?)
}
