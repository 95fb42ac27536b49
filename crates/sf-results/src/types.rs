//! Result data types.

use serde::{Deserialize, Serialize};
use sf_sim::{Equations, Scheme};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    /// `name` of the configuration the run was made from
    pub config_name: String,
    pub timestamp: String,
    pub run_type: RunType,
    pub solver_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
}

impl RunManifest {
    /// New manifest stamped with the current UTC time.
    pub fn new(
        run_id: RunId,
        config_name: impl Into<String>,
        run_type: RunType,
        solver_version: impl Into<String>,
    ) -> Self {
        Self {
            run_id,
            config_name: config_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            run_type,
            solver_version: solver_version.into(),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: RunSummary) -> Self {
        self.summary = Some(summary);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RunType {
    Trajectory {
        equations: Equations,
        scheme: Scheme,
        dt_ps: f64,
        stop_ps: f64,
        temperature_k: f64,
        atoms: usize,
    },
    Curie {
        t_initial_k: f64,
        t_step_k: f64,
        t_final_k: f64,
        temperatures: usize,
        atoms: usize,
        /// Each temperature starts from the initial spins
        #[serde(default)]
        restart: bool,
    },
}

/// Final-state figures stored alongside the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub rows: usize,
    pub magnetization: [f64; 3],
    pub magnetization_length: f64,
    pub wall_time_s: f64,
}
