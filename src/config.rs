//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`) que agrega la configuración de cada crate.
use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;

use cert_persistence::StoreConfig;
use cert_rpc::RpcConfig;

use crate::data::DEFAULT_PAGE_SIZE;

pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rpc: RpcConfig,
    pub storage: StoreConfig,
    pub wizard: WizardConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Latencia simulada del envío de cada paso.
    pub submit_delay_ms: u64,
}

impl WizardConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub page_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // RpcConfig fuerza la carga de .env antes de leer el resto
        let rpc = RpcConfig::from_env();
        let storage = StoreConfig::from_env();
        let submit_delay_ms = parse_env("QUALINOVA_SUBMIT_DELAY_MS").unwrap_or(DEFAULT_SUBMIT_DELAY_MS);
        let page_size = parse_env("QUALINOVA_PAGE_SIZE").filter(|n: &usize| *n > 0).unwrap_or(DEFAULT_PAGE_SIZE);
        Self { rpc, storage, wizard: WizardConfig { submit_delay_ms }, catalog: CatalogConfig { page_size } }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
