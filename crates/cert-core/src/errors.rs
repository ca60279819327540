//! Errores del core del wizard.

use thiserror::Error;

/// Fallos de la capacidad de almacenamiento clave-valor.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StoreError {
    #[error("storage backend: {0}")] Backend(String),
    #[error("stored value could not be (de)serialized: {0}")] Serialization(String),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum WizardError {
    #[error("unknown field '{0}' for the current step")] UnknownField(String),
    #[error("wizard already submitted")] AlreadySubmitted,
    #[error("a submit is already in progress")] SubmitInProgress,
    #[error("no submit in progress")] NoSubmitInProgress,
    #[error("already at the first step")] AtFirstStep,
    #[error("validation failed for step {0}")] ValidationFailed(usize),
    #[error("invalid step index {index} (wizard has {total} steps)")] InvalidStep { index: usize, total: usize },
    #[error("wizard definition has no steps")] EmptyDefinition,
    #[error(transparent)] Storage(#[from] StoreError),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
