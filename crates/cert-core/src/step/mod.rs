//! Definiciones relacionadas a los pasos del wizard.
//!
//! Un paso agrupa un conjunto fijo de campos y sus reglas. Este módulo define:
//! - `FormStepDefinition`: interfaz neutral usada por el controlador.
//! - `StepStatus`: estado de persistencia reconstruido desde eventos.
//! - Los tres pasos concretos del wizard de certificados.

pub mod certificate_steps;
pub mod definition;
mod status;

pub use certificate_steps::{fields, CertificateDetailsStep, RecipientValidityStep, ReviewStep, CERTIFICATE_TYPES, TEMPLATES};
pub use definition::FormStepDefinition;
pub use status::StepStatus;
