//! Clientes de contrato: la costura entre el adaptador y la red.
//!
//! `HttpContractClient` habla JSON-RPC contra el nodo configurado y
//! `MockContractClient` responde con un guion en memoria (tests y modo
//! `--offline` de la CLI).
use async_trait::async_trait;
use serde_json::Value;

use crate::errors::QueryError;

mod http;
mod mock;

pub use http::HttpContractClient;
pub use mock::{MockContractClient, MockReply};

/// Parámetros de red con los que se construye un cliente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub network_passphrase: String,
    pub contract_id: String,
}

#[async_trait]
pub trait ContractClient: Send + Sync {
    fn network(&self) -> &NetworkConfig;

    /// Invoca `method` del contrato con argumentos ya codificados y
    /// devuelve la carga útil cruda.
    async fn invoke(&self, method: &str, args: Value) -> Result<Value, QueryError>;
}
