//! Ubicación del almacén local desde variables de entorno.
//! Convención `QUALINOVA_STORAGE_PATH`, por defecto `.qualinova/storage.json`.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

pub const DEFAULT_STORAGE_PATH: &str = ".qualinova/storage.json";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_STORAGE_PATH) }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        match env::var("QUALINOVA_STORAGE_PATH") {
            Ok(p) if !p.trim().is_empty() => Self { path: PathBuf::from(p) },
            _ => Self::default(),
        }
    }
}
