//! Error types for simulation runs.

use sf_atoms::AtomError;
use sf_fields::FieldError;
use thiserror::Error;

/// Errors encountered while driving a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown {what} '{name}'")]
    UnknownName { what: &'static str, name: String },

    #[error("Atom {atom} failed at step {step}: {source}")]
    Atom {
        step: usize,
        atom: usize,
        #[source]
        source: AtomError,
    },

    #[error("Atom {atom} failed during splitting sweep: {source}")]
    Splitting {
        atom: usize,
        #[source]
        source: AtomError,
    },

    #[error("Field assembly failed: {0}")]
    Field(#[from] FieldError),

    #[error("Bath setup failed: {0}")]
    Bath(#[from] AtomError),

    #[error("Run cancelled at step {step}")]
    Cancelled { step: usize },
}

pub type SimResult<T> = Result<T, SimError>;
