//! Content-based hashing for run IDs.

use crate::types::RunType;
use sha2::{Digest, Sha256};
use sf_project::SimulationConfig;

/// Run ID from the configuration, the effective run description and the
/// solver version. Identical inputs give identical IDs.
///
/// `run_type` carries what command-line overrides change (for instance the
/// Curie `restart` flag), so an override gets its own ID instead of
/// replacing the run made without it.
pub fn compute_run_id(
    config: &SimulationConfig,
    run_type: &RunType,
    solver_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());
    let run_json = serde_json::to_string(run_type).unwrap_or_default();
    hasher.update(run_json.as_bytes());
    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_project::schema::*;

    fn config(name: &str, g: f64) -> SimulationConfig {
        SimulationConfig {
            version: 1,
            name: name.to_string(),
            constants: None,
            lattice: LatticeDef {
                unit_cell: UnitCellDef::Sc,
                supercell: [1, 1, 1],
                lattice_constant_nm: 0.3,
                atom: AtomDef {
                    name: "Fe".to_string(),
                    kind: 0,
                    g,
                    spin: DirectionDef::Axis("+z".to_string()),
                    sigma: None,
                },
            },
            interactions: InteractionsDef::default(),
            integration: IntegrationDef {
                stop_ps: 1.0,
                dt_ps: 0.01,
                scheme: Default::default(),
                equations: Default::default(),
                temperature_k: 0.0,
                alpha: 0.0,
                record_every: 1,
                parallel: false,
            },
            curie: None,
        }
    }

    fn trajectory(dt_ps: f64) -> RunType {
        RunType::Trajectory {
            equations: Default::default(),
            scheme: Default::default(),
            dt_ps,
            stop_ps: 1.0,
            temperature_k: 0.0,
            atoms: 1,
        }
    }

    fn curie(restart: bool) -> RunType {
        RunType::Curie {
            t_initial_k: 0.0,
            t_step_k: 100.0,
            t_final_k: 300.0,
            temperatures: 3,
            atoms: 1,
            restart,
        }
    }

    #[test]
    fn hash_stability() {
        let c = config("a", 2.0);
        let run = trajectory(0.01);
        assert_eq!(compute_run_id(&c, &run, "v1"), compute_run_id(&c, &run, "v1"));
        assert_eq!(compute_run_id(&c, &run, "v1").len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let a = config("a", 2.0);
        let b = config("a", 2.1);
        let run = trajectory(0.01);
        assert_ne!(compute_run_id(&a, &run, "v1"), compute_run_id(&b, &run, "v1"));
        assert_ne!(
            compute_run_id(&a, &run, "v1"),
            compute_run_id(&a, &curie(false), "v1")
        );
        assert_ne!(compute_run_id(&a, &run, "v1"), compute_run_id(&a, &run, "v2"));
    }

    #[test]
    fn restart_override_gets_its_own_id() {
        let c = config("a", 2.0);
        assert_ne!(
            compute_run_id(&c, &curie(false), "v1"),
            compute_run_id(&c, &curie(true), "v1")
        );
    }

    #[test]
    fn effective_run_options_enter_the_id() {
        let c = config("a", 2.0);
        assert_ne!(
            compute_run_id(&c, &trajectory(0.01), "v1"),
            compute_run_id(&c, &trajectory(0.005), "v1")
        );
    }
}
