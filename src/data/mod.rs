//! Modelo de certificados emitidos y su catálogo.
pub mod catalog;
pub mod certificate;

pub use catalog::{paginate, CatalogPage, CatalogQuery, CertificateCatalog, DEFAULT_PAGE_SIZE};
pub use certificate::{generate_certificate_id, Certificate, CertificateStatus};
