//! Run storage API.
//!
//! Layout of one run directory:
//!
//! ```text
//! <root>/<run_id>/manifest.json
//! <root>/<run_id>/trajectory.json      (trajectory runs)
//! <root>/<run_id>/trajectory.dat
//! <root>/<run_id>/curie.json           (Curie scans)
//! <root>/<run_id>/curie.dat
//! <root>/<run_id>/curie_T<T>.dat       (one per temperature)
//! ```

use crate::text::{format_curie_curve, format_trajectory};
use crate::types::RunManifest;
use crate::{ResultsError, ResultsResult};
use sf_sim::{CurieCurve, Trajectory};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store next to a configuration file, under `.spinflow/runs`.
    pub fn for_config(config_path: &Path) -> ResultsResult<Self> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "config path has no parent directory".to_string(),
            })?;
        Self::new(config_dir.join(".spinflow").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    fn write_manifest(&self, manifest: &RunManifest) -> ResultsResult<PathBuf> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;
        Ok(run_dir)
    }

    pub fn save_trajectory(
        &self,
        manifest: &RunManifest,
        trajectory: &Trajectory,
    ) -> ResultsResult<()> {
        let run_dir = self.write_manifest(manifest)?;
        fs::write(
            run_dir.join("trajectory.json"),
            serde_json::to_string(trajectory)?,
        )?;
        fs::write(run_dir.join("trajectory.dat"), format_trajectory(trajectory))?;
        Ok(())
    }

    pub fn save_curie(&self, manifest: &RunManifest, curve: &CurieCurve) -> ResultsResult<()> {
        let run_dir = self.write_manifest(manifest)?;
        fs::write(run_dir.join("curie.json"), serde_json::to_string(curve)?)?;
        fs::write(run_dir.join("curie.dat"), format_curie_curve(curve))?;
        for (point, trajectory) in curve.points.iter().zip(&curve.trajectories) {
            let name = format!("curie_T{}.dat", point.temperature);
            fs::write(run_dir.join(name), format_trajectory(trajectory))?;
        }
        Ok(())
    }

    fn read_file(&self, run_id: &str, name: &str) -> ResultsResult<String> {
        let path = self.run_dir(run_id).join(name);
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        Ok(fs::read_to_string(path)?)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let content = self.read_file(run_id, "manifest.json")?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_trajectory(&self, run_id: &str) -> ResultsResult<Trajectory> {
        let content = self.read_file(run_id, "trajectory.json")?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_curie(&self, run_id: &str) -> ResultsResult<CurieCurve> {
        let content = self.read_file(run_id, "curie.json")?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Manifests of every stored run made from the configuration `config_name`.
    pub fn list_runs(&self, config_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id)
                    && manifest.config_name == config_name
                {
                    runs.push(manifest);
                }
            }
        }

        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
