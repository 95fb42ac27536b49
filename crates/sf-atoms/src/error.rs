//! Error types for per-atom operations.

use sf_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AtomError {
    #[error("Landé factor must be finite and non-negative, got {g}")]
    InvalidLandeFactor { g: f64 },

    #[error("Precession axis undefined: local field has zero length")]
    DegenerateField,

    #[error("Non-physical {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown {what}: '{name}'")]
    UnknownMethod { what: &'static str, name: String },

    #[error("Not implemented: {what}")]
    NotImplemented { what: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AtomResult<T> = Result<T, AtomError>;
