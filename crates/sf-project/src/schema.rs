//! Simulation configuration schema.

use serde::{Deserialize, Serialize};
use sf_fields::Boundary;
use sf_sim::{CurieSweep, Equations, Scheme};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<ConstantsDef>,
    pub lattice: LatticeDef,
    #[serde(default)]
    pub interactions: InteractionsDef,
    pub integration: IntegrationDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curie: Option<CurieSweep>,
}

/// Overrides of the physical constants; unset entries keep their default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConstantsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_b_ev_per_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hbar_ev_ps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma_rad_per_ps_t: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatticeDef {
    pub unit_cell: UnitCellDef,
    pub supercell: [usize; 3],
    pub lattice_constant_nm: f64,
    pub atom: AtomDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UnitCellDef {
    /// Simple cubic, one site
    Sc,
    Bcc,
    Fcc,
    /// Explicit fractional site positions
    Custom { positions: Vec<[f64; 3]> },
}

/// Template atom replicated on every lattice site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtomDef {
    pub name: String,
    #[serde(default)]
    pub kind: u32,
    pub g: f64,
    pub spin: DirectionDef,
    /// Initial second moment; defaults to the pure state `s ⊗ s`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma: Option<[[f64; 3]; 3]>,
}

/// Either a named axis (`"+z"`, `"-x"`, ...) or explicit components.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DirectionDef {
    Axis(String),
    Vector([f64; 3]),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InteractionsDef {
    #[serde(default)]
    pub zeeman: Vec<ZeemanDef>,
    #[serde(default)]
    pub uniaxial: Vec<UniaxialDef>,
    #[serde(default)]
    pub exchange: Vec<ExchangeDef>,
    #[serde(default)]
    pub boundary: Boundary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZeemanDef {
    pub direction: DirectionDef,
    /// Pulsation (rad/ps)
    #[serde(default)]
    pub value: f64,
    /// Applied induction (T), converted with the gyromagnetic ratio and added to `value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_t: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UniaxialDef {
    pub axis: DirectionDef,
    /// Pulsation (rad/ps)
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeDef {
    pub type_i: u32,
    pub type_j: u32,
    /// Pulsation (rad/ps)
    pub value: f64,
    pub cutoff_nm: f64,
}

fn one() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegrationDef {
    pub stop_ps: f64,
    pub dt_ps: f64,
    #[serde(default)]
    pub scheme: Scheme,
    #[serde(default)]
    pub equations: Equations,
    #[serde(default)]
    pub temperature_k: f64,
    #[serde(default)]
    pub alpha: f64,
    #[serde(default = "one")]
    pub record_every: usize,
    #[serde(default)]
    pub parallel: bool,
}
