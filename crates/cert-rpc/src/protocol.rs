//! Tipos JSON-RPC 2.0 del lado cliente.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::QueryError;

/// Método JSON-RPC usado para invocar una función del contrato.
pub const INVOKE_METHOD: &str = "invokeContract";

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self { jsonrpc: "2.0", id, method: method.into(), params }
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    /// Un objeto `error` tiene prioridad sobre `result`.
    pub fn into_result(self) -> Result<Value, QueryError> {
        if let Some(err) = self.error {
            return Err(QueryError::Rpc { code: err.code, message: err.message });
        }
        self.result.ok_or_else(|| QueryError::Decode("response has neither result nor error".into()))
    }
}
