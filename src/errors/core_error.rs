use thiserror::Error;

use cert_core::{StoreError, WizardError};
use cert_persistence::PersistenceError;
use cert_rpc::QueryError;

use super::domain_error::DomainError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de almacenamiento: {0}")]
    Store(#[from] StoreError),
    #[error("Error de persistencia: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Error del wizard: {0}")]
    Wizard(#[from] WizardError),
    #[error("Error de consulta: {0}")]
    Query(#[from] QueryError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CoreError {
    /// Errores causados por la entrada del usuario (código de salida 4 en la
    /// CLI); el resto son fallos de backend (código 5).
    pub fn is_user_error(&self) -> bool {
        matches!(self,
                 CoreError::Domain(_)
                 | CoreError::Query(QueryError::InvalidInput)
                 | CoreError::Wizard(WizardError::UnknownField(_)
                                     | WizardError::ValidationFailed(_)
                                     | WizardError::AtFirstStep
                                     | WizardError::AlreadySubmitted))
    }
}
