//! sf-project: simulation configuration files and validation.

pub mod compile;
pub mod schema;
pub mod validate;

pub use compile::{CompiledSimulation, compile, compile_lattice};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_config};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported configuration format: '{extension}' (expected yaml, yml or json)")]
    UnsupportedFormat { extension: String },

    #[error("Atom setup failed: {0}")]
    Atom(#[from] sf_atoms::AtomError),

    #[error("Field setup failed: {0}")]
    Field(#[from] sf_fields::FieldError),

    #[error("Invalid constants: {0}")]
    Core(#[from] sf_core::CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> ProjectResult<Format> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "yaml" | "yml" => Ok(Format::Yaml),
        "json" => Ok(Format::Json),
        _ => Err(ProjectError::UnsupportedFormat { extension }),
    }
}

/// Load a YAML or JSON configuration, chosen by file extension.
pub fn load(path: &Path) -> ProjectResult<SimulationConfig> {
    match format_of(path)? {
        Format::Yaml => load_yaml(path),
        Format::Json => load_json(path),
    }
}

pub fn save(path: &Path, config: &SimulationConfig) -> ProjectResult<()> {
    match format_of(path)? {
        Format::Yaml => save_yaml(path, config),
        Format::Json => save_json(path, config),
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &SimulationConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_json(path: &Path, config: &SimulationConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
