use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::{json, Value};

use super::{ContractClient, NetworkConfig};
use crate::config::RpcConfig;
use crate::errors::QueryError;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse, INVOKE_METHOD};

const ERROR_BODY_PREVIEW: usize = 200;

/// Cliente JSON-RPC sobre HTTP. Un `reqwest::Client` reutiliza conexiones,
/// así que se crea una vez y se comparte.
#[derive(Debug)]
pub struct HttpContractClient {
    http: Client,
    network: NetworkConfig,
    next_id: AtomicU64,
}

impl HttpContractClient {
    pub fn new(network: NetworkConfig, timeout: Duration) -> Result<Self, QueryError> {
        if network.contract_id.trim().is_empty() {
            return Err(QueryError::Config("contract id is not set (QUALINOVA_CONTRACT_ID)".into()));
        }
        let http = Client::builder().timeout(timeout)
                                    .build()
                                    .map_err(|e| QueryError::Config(e.to_string()))?;
        Ok(Self { http, network, next_id: AtomicU64::new(0) })
    }

    pub fn from_config(config: &RpcConfig) -> Result<Self, QueryError> {
        Self::new(config.network(), config.timeout())
    }

    fn envelope(&self, method: &str, args: Value) -> JsonRpcRequest {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        JsonRpcRequest::new(id,
                            INVOKE_METHOD,
                            json!({
                                "network": self.network.network_passphrase,
                                "contractId": self.network.contract_id,
                                "function": method,
                                "args": args,
                            }))
    }
}

#[async_trait]
impl ContractClient for HttpContractClient {
    fn network(&self) -> &NetworkConfig {
        &self.network
    }

    async fn invoke(&self, method: &str, args: Value) -> Result<Value, QueryError> {
        let request = self.envelope(method, args);
        debug!("rpc -> {} #{} {}", self.network.rpc_url, request.id, method);

        let response = self.http
                           .post(&self.network.rpc_url)
                           .header("Accept", "application/json")
                           .json(&request)
                           .send()
                           .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            warn!("rpc <- HTTP {status} for {method}");
            return Err(QueryError::Transport(format!("HTTP {status}: {preview}")));
        }

        let body: JsonRpcResponse = response.json().await?;
        body.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> NetworkConfig {
        NetworkConfig { rpc_url: "http://127.0.0.1:9".into(),
                        network_passphrase: "Test SDF Network ; September 2015".into(),
                        contract_id: "CDEMO".into() }
    }

    #[test]
    fn missing_contract_id_is_a_config_error() {
        let mut net = network();
        net.contract_id = " ".into();
        assert!(matches!(HttpContractClient::new(net, Duration::from_secs(1)), Err(QueryError::Config(_))));
    }

    #[test]
    fn envelope_carries_network_and_function() {
        let client = HttpContractClient::new(network(), Duration::from_secs(1)).unwrap();
        let first = client.envelope("hello", json!({"to": "Dev"}));
        let second = client.envelope("hello", json!({"to": "Dev"}));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.method, "invokeContract");
        assert_eq!(first.params["contractId"], "CDEMO");
        assert_eq!(first.params["function"], "hello");
        assert_eq!(first.params["args"], json!({"to": "Dev"}));
        assert_eq!(first.params["network"], "Test SDF Network ; September 2015");
    }
}
