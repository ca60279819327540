use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ContractClient, NetworkConfig};
use crate::errors::QueryError;

/// Respuesta guionizada del cliente simulado.
#[derive(Debug, Clone)]
pub enum MockReply {
    Payload { payload: Value, delay: Duration },
    Fail { error: QueryError, delay: Duration },
    /// Simula un fallo no tipado dentro del cliente.
    Panic,
}

impl MockReply {
    pub fn ok(payload: Value) -> Self {
        Self::Payload { payload, delay: Duration::ZERO }
    }

    pub fn ok_after(payload: Value, delay: Duration) -> Self {
        Self::Payload { payload, delay }
    }

    pub fn fail(error: QueryError) -> Self {
        Self::Fail { error, delay: Duration::ZERO }
    }

    pub fn fail_after(error: QueryError, delay: Duration) -> Self {
        Self::Fail { error, delay }
    }
}

/// Cliente en memoria. Consume las respuestas encoladas en orden; con la
/// cola vacía imita al contrato de demostración (`hello`,
/// `verify_certification`).
#[derive(Debug)]
pub struct MockContractClient {
    network: NetworkConfig,
    script: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl Default for MockContractClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockContractClient {
    pub fn new() -> Self {
        let network = NetworkConfig { rpc_url: "memory://".into(),
                                      network_passphrase: "Standalone Network".into(),
                                      contract_id: "MOCK".into() };
        Self { network, script: Mutex::new(VecDeque::new()), calls: Mutex::new(Vec::new()) }
    }

    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        let client = Self::new();
        for reply in replies {
            client.push(reply);
        }
        client
    }

    pub fn push(&self, reply: MockReply) {
        self.script.lock().unwrap_or_else(|e| e.into_inner()).push_back(reply);
    }

    /// Llamadas recibidas: (función, argumentos).
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn default_reply(method: &str, args: &Value) -> Result<Value, QueryError> {
        match method {
            "hello" => {
                let to = args.get("to").and_then(Value::as_str).unwrap_or_default();
                Ok(json!({ "result": ["Hello", to] }))
            }
            "verify_certification" => {
                let cert_id = args.get("cert_id").and_then(Value::as_str).unwrap_or_default();
                let status = if cert_id.starts_with("CERT-") { "Valid" } else { "Invalid" };
                Ok(json!({ "cert_id": cert_id, "status": status }))
            }
            other => Err(QueryError::Rpc { code: -32601, message: format!("unknown contract function '{other}'") }),
        }
    }
}

#[async_trait]
impl ContractClient for MockContractClient {
    fn network(&self) -> &NetworkConfig {
        &self.network
    }

    async fn invoke(&self, method: &str, args: Value) -> Result<Value, QueryError> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push((method.to_string(), args.clone()));
        let next = self.script.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
        match next {
            None => Self::default_reply(method, &args),
            Some(MockReply::Payload { payload, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(payload)
            }
            Some(MockReply::Fail { error, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Err(error)
            }
            Some(MockReply::Panic) => panic!("scripted client panic"),
        }
    }
}
