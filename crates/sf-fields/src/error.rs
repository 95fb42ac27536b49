use sf_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type FieldResult<T> = Result<T, FieldError>;
