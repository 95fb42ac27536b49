use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Project(#[from] sf_project::ProjectError),

    #[error("Atom error: {0}")]
    Atom(#[from] sf_atoms::AtomError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] sf_sim::SimError),

    #[error("Results error: {0}")]
    Results(#[from] sf_results::ResultsError),

    #[error("No `curie` section in {}", path.display())]
    MissingCurie { path: PathBuf },
}

pub type AppResult<T> = Result<T, AppError>;
