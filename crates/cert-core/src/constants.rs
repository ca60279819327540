//! Constantes del wizard de certificados.
//!
//! Las claves de almacenamiento forman parte del contrato con el almacén
//! local: cambiarlas deja huérfanos los borradores ya guardados.

/// Versión lógica del wizard. Se incluye en el hash de la definición para que
/// un cambio incompatible en los pasos produzca un `definition_hash` distinto.
pub const WIZARD_VERSION: &str = "W1.0";

/// Prefijo de las claves de borrador por paso (`certificateFormStep1`, ...).
pub const STEP_STORAGE_PREFIX: &str = "certificateFormStep";

/// Clave bajo la que se guarda el catálogo de certificados emitidos.
pub const CATALOG_STORAGE_KEY: &str = "issuedCertificates";

pub const MSG_FIX_ERRORS: &str = "Please fix the errors before proceeding";
pub const MSG_SUBMIT_FAILED: &str = "Failed to submit form";
pub const MSG_UNEXPECTED: &str = "An unexpected error occurred";

/// Clave de almacenamiento para un paso (1-based).
pub fn step_storage_key(step: usize) -> String {
    format!("{STEP_STORAGE_PREFIX}{step}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_keys_are_one_based() {
        assert_eq!(step_storage_key(1), "certificateFormStep1");
        assert_eq!(step_storage_key(3), "certificateFormStep3");
    }
}
