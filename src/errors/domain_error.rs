use thiserror::Error;

/// Errores del dominio de certificados
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Entidad no encontrada: {0}")]
    NotFound(String),
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Certificado ya emitido: {0}")]
    Duplicate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_formats() {
        assert_eq!(DomainError::Validation("inválido".into()).to_string(), "Validación fallida: inválido");
        assert_eq!(DomainError::Duplicate("CERT-2024-001".into()).to_string(),
                   "Certificado ya emitido: CERT-2024-001");
    }
}
