//! Configuración del cliente RPC desde variables de entorno (.env opcional).

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::client::NetworkConfig;

pub const DEFAULT_RPC_URL: &str = "https://soroban-testnet.stellar.org:443";
pub const DEFAULT_NETWORK_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    pub rpc_url: String,
    pub network_passphrase: String,
    pub contract_id: String,
    pub timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { rpc_url: DEFAULT_RPC_URL.to_string(),
               network_passphrase: DEFAULT_NETWORK_PASSPHRASE.to_string(),
               contract_id: String::new(),
               timeout_ms: DEFAULT_TIMEOUT_MS }
    }
}

impl RpcConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        Self { rpc_url: env::var("QUALINOVA_RPC_URL").unwrap_or(defaults.rpc_url),
               network_passphrase: env::var("QUALINOVA_NETWORK_PASSPHRASE").unwrap_or(defaults.network_passphrase),
               contract_id: env::var("QUALINOVA_CONTRACT_ID").unwrap_or(defaults.contract_id),
               timeout_ms: env::var("QUALINOVA_RPC_TIMEOUT_MS").ok()
                                                               .and_then(|v| v.parse().ok())
                                                               .unwrap_or(defaults.timeout_ms) }
    }

    pub fn network(&self) -> NetworkConfig {
        NetworkConfig { rpc_url: self.rpc_url.clone(),
                        network_passphrase: self.network_passphrase.clone(),
                        contract_id: self.contract_id.clone() }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
