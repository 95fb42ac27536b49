//! Turn a validated configuration into runtime objects.

use crate::schema::{ConstantsDef, LatticeDef, SimulationConfig, UnitCellDef};
use crate::validate::{resolve_direction, validate_config};
use crate::ProjectResult;
use sf_atoms::{AtomState, AtomTemplate, Bath, MomentState, Supercell, UnitCell, build_lattice};
use sf_core::algebra::vec3;
use sf_core::{Matrix3, PhysicalConstants};
use sf_fields::{ExchangeCoupling, Interaction};
use sf_sim::{CurieSweep, SimOptions};
use tracing::debug;

/// Everything a run needs, built from one configuration.
#[derive(Clone, Debug)]
pub struct CompiledSimulation {
    pub atoms: Vec<AtomState>,
    pub fields: Interaction,
    pub options: SimOptions,
    pub curie: Option<CurieSweep>,
}

pub fn compile(config: &SimulationConfig) -> ProjectResult<CompiledSimulation> {
    validate_config(config)?;

    let constants = compile_constants(config.constants.as_ref())?;
    let atoms = compile_lattice(&config.lattice)?;
    let fields = compile_interactions(config, &constants)?;

    let integration = &config.integration;
    let options = SimOptions {
        stop: integration.stop_ps,
        dt: integration.dt_ps,
        scheme: integration.scheme,
        equations: integration.equations,
        bath: Bath::from_kelvin(integration.temperature_k, integration.alpha)?,
        constants,
        record_every: integration.record_every,
        parallel: integration.parallel,
    };

    debug!(
        name = %config.name,
        atoms = atoms.len(),
        equations = %options.equations,
        scheme = %options.scheme,
        curie = config.curie.is_some(),
        "compiled simulation"
    );

    Ok(CompiledSimulation {
        atoms,
        fields,
        options,
        curie: config.curie.clone(),
    })
}

fn compile_constants(def: Option<&ConstantsDef>) -> ProjectResult<PhysicalConstants> {
    let defaults = PhysicalConstants::default();
    let Some(def) = def else {
        return Ok(defaults);
    };
    Ok(PhysicalConstants::new(
        def.k_b_ev_per_k.unwrap_or(defaults.k_b),
        def.hbar_ev_ps.unwrap_or(defaults.hbar),
        def.gamma_rad_per_ps_t.unwrap_or(defaults.gamma),
    )?)
}

pub fn unit_cell(def: &UnitCellDef) -> UnitCell {
    match def {
        UnitCellDef::Sc => UnitCell::simple_cubic(),
        UnitCellDef::Bcc => UnitCell::bcc(),
        UnitCellDef::Fcc => UnitCell::fcc(),
        UnitCellDef::Custom { positions } => {
            UnitCell::new(positions.iter().map(|[x, y, z]| vec3(*x, *y, *z)).collect())
        }
    }
}

/// Generate the atoms described by `lattice`.
pub fn compile_lattice(lattice: &LatticeDef) -> ProjectResult<Vec<AtomState>> {
    let atom = &lattice.atom;
    let spin = resolve_direction("lattice.atom.spin", &atom.spin)?;
    let moments = match &atom.sigma {
        Some(rows) => MomentState::new(spin, Matrix3::from_fn(|i, j| rows[i][j])),
        None => MomentState::polarized(spin),
    };
    let template = AtomTemplate {
        name: atom.name.clone(),
        kind: atom.kind,
        g: atom.g,
        spin,
        moments,
    };
    let [nx, ny, nz] = lattice.supercell;
    Ok(build_lattice(
        &unit_cell(&lattice.unit_cell),
        Supercell::new(nx, ny, nz),
        lattice.lattice_constant_nm,
        &template,
    )?)
}

fn compile_interactions(
    config: &SimulationConfig,
    constants: &PhysicalConstants,
) -> ProjectResult<Interaction> {
    let defs = &config.interactions;
    let mut fields = Interaction::new().with_boundary(defs.boundary);
    for z in &defs.zeeman {
        let d = resolve_direction("interactions.zeeman.direction", &z.direction)?;
        let value = z.value + z.field_t.map_or(0.0, |b| constants.larmor(b));
        fields = fields.zeeman(d, value)?;
    }
    for u in &defs.uniaxial {
        let n = resolve_direction("interactions.uniaxial.axis", &u.axis)?;
        fields = fields.uniaxial(n, u.value)?;
    }
    for e in &defs.exchange {
        fields = fields.exchange(ExchangeCoupling {
            type_i: e.type_i,
            type_j: e.type_j,
            value: e.value,
            cutoff: e.cutoff_nm,
        })?;
    }
    Ok(fields)
}
