//! cert-persistence
//!
//! Implementación en archivo del `KeyValueStore` del core: el análogo local
//! del almacenamiento del navegador donde se guardan los borradores del
//! wizard y el catálogo de certificados emitidos.
//!
//! Módulos:
//! - `file`: `FileKeyValueStore` (objeto JSON, escritura atómica).
//! - `config`: ruta del archivo desde .env.
//! - `error`: `PersistenceError` y su conversión a `StoreError`.

pub mod config;
pub mod error;
pub mod file;

pub use config::StoreConfig;
pub use error::PersistenceError;
pub use file::FileKeyValueStore;
