pub mod manager;

pub use manager::CertificateWizard;
