//! Configuration validation.

use crate::schema::{DirectionDef, LatticeDef, SimulationConfig, UnitCellDef};
use sf_core::algebra::{direction, try_normalize, vec3};
use sf_core::Vector3;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing reference: atom type {kind} in {context}")]
    MissingType { kind: u32, context: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive"))
    }
}

fn non_negative(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be non-negative"))
    }
}

/// Resolve a direction entry to a unit vector.
pub fn resolve_direction(field: &str, def: &DirectionDef) -> Result<Vector3, ValidationError> {
    match def {
        DirectionDef::Axis(name) => {
            direction(name).map_err(|_| invalid(field, name, "expected ±x, ±y or ±z"))
        }
        DirectionDef::Vector([x, y, z]) => try_normalize(&vec3(*x, *y, *z), "direction")
            .map_err(|_| invalid(field, format!("[{x}, {y}, {z}]"), "must be a non-zero finite vector")),
    }
}

pub fn validate_config(config: &SimulationConfig) -> Result<(), ValidationError> {
    if config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    if let Some(c) = &config.constants {
        for (field, v) in [
            ("constants.k_b_ev_per_k", c.k_b_ev_per_k),
            ("constants.hbar_ev_ps", c.hbar_ev_ps),
            ("constants.gamma_rad_per_ps_t", c.gamma_rad_per_ps_t),
        ] {
            if let Some(v) = v {
                positive(field, v)?;
            }
        }
    }

    validate_lattice(&config.lattice)?;

    let kind = config.lattice.atom.kind;
    let interactions = &config.interactions;
    for (i, z) in interactions.zeeman.iter().enumerate() {
        resolve_direction(&format!("interactions.zeeman[{i}].direction"), &z.direction)?;
        if !z.value.is_finite() {
            return Err(invalid("interactions.zeeman.value", z.value, "must be finite"));
        }
        if let Some(b) = z.field_t.filter(|b| !b.is_finite()) {
            return Err(invalid("interactions.zeeman.field_t", b, "must be finite"));
        }
    }
    for (i, u) in interactions.uniaxial.iter().enumerate() {
        resolve_direction(&format!("interactions.uniaxial[{i}].axis"), &u.axis)?;
        if !u.value.is_finite() {
            return Err(invalid("interactions.uniaxial.value", u.value, "must be finite"));
        }
    }
    for e in &interactions.exchange {
        if !e.value.is_finite() {
            return Err(invalid("interactions.exchange.value", e.value, "must be finite"));
        }
        positive("interactions.exchange.cutoff_nm", e.cutoff_nm)?;
        for t in [e.type_i, e.type_j] {
            if t != kind {
                return Err(ValidationError::MissingType {
                    kind: t,
                    context: "interactions.exchange".to_string(),
                });
            }
        }
    }
    if let sf_fields::Boundary::Periodic { box_size } = interactions.boundary {
        for l in box_size {
            positive("interactions.boundary.box_size", l)?;
        }
    }

    let integration = &config.integration;
    positive("integration.dt_ps", integration.dt_ps)?;
    non_negative("integration.stop_ps", integration.stop_ps)?;
    non_negative("integration.temperature_k", integration.temperature_k)?;
    non_negative("integration.alpha", integration.alpha)?;
    if integration.record_every == 0 {
        return Err(invalid("integration.record_every", 0, "must be at least 1"));
    }

    if let Some(curie) = &config.curie {
        positive("curie.t_step", curie.t_step)?;
        non_negative("curie.t_initial", curie.t_initial)?;
        if !curie.t_final.is_finite() {
            return Err(invalid("curie.t_final", curie.t_final, "must be finite"));
        }
        positive("curie.dt", curie.dt)?;
        non_negative("curie.stop", curie.stop)?;
        non_negative("curie.alpha", curie.alpha)?;
        if curie.record_every == 0 {
            return Err(invalid("curie.record_every", 0, "must be at least 1"));
        }
    }

    Ok(())
}

fn validate_lattice(lattice: &LatticeDef) -> Result<(), ValidationError> {
    if let UnitCellDef::Custom { positions } = &lattice.unit_cell {
        if positions.is_empty() {
            return Err(invalid("lattice.unit_cell.positions", "[]", "needs at least one site"));
        }
        if positions.iter().flatten().any(|p| !p.is_finite()) {
            return Err(invalid("lattice.unit_cell.positions", "non-finite", "must be finite"));
        }
    }
    if lattice.supercell.contains(&0) {
        return Err(invalid(
            "lattice.supercell",
            format!("{:?}", lattice.supercell),
            "every dimension must be at least 1",
        ));
    }
    positive("lattice.lattice_constant_nm", lattice.lattice_constant_nm)?;

    let atom = &lattice.atom;
    non_negative("lattice.atom.g", atom.g)?;
    resolve_direction("lattice.atom.spin", &atom.spin)?;
    if let Some(sigma) = &atom.sigma {
        if sigma.iter().flatten().any(|v| !v.is_finite()) {
            return Err(invalid("lattice.atom.sigma", "non-finite", "must be finite"));
        }
    }
    Ok(())
}
