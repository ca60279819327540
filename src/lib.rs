//! QualiNova
//!
//! Librería de aplicación sobre los crates `cert-*`:
//! - `config`: configuración agregada (`CONFIG`).
//! - `errors`: errores de núcleo y dominio.
//! - `data`: certificados emitidos y su catálogo.
//! - `providers`: backends de envío de pasos.
//! - `workflow`: wizard asíncrono de emisión.

pub mod config;
pub mod data;
pub mod errors;
pub mod providers;
pub mod workflow;

pub use config::{AppConfig, CONFIG};
pub use data::{CatalogPage, CatalogQuery, Certificate, CertificateCatalog, CertificateStatus};
pub use errors::{CoreError, DomainError};
pub use providers::submission::{SimulatedSubmitter, StepSubmitter};
pub use workflow::CertificateWizard;
