//! Descriptores de consulta: cómo codificar la entrada y decodificar la
//! respuesta de una función concreta del contrato.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::QueryError;

pub trait ContractQuery: Send + Sync + 'static {
    type Output: Clone + Default + Send + Sync + 'static;

    fn method(&self) -> &str;
    fn encode_args(&self, input: &str) -> Value;
    fn decode(&self, payload: Value) -> Result<Self::Output, QueryError>;
}

/// `hello(to)`: la respuesta `{ result: [..] }` se une con espacios.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingQuery;

impl ContractQuery for GreetingQuery {
    type Output = String;

    fn method(&self) -> &str {
        "hello"
    }

    fn encode_args(&self, input: &str) -> Value {
        json!({ "to": input })
    }

    fn decode(&self, payload: Value) -> Result<String, QueryError> {
        let parts = payload.get("result")
                           .and_then(Value::as_array)
                           .ok_or_else(|| QueryError::Decode("expected an object with a `result` array".into()))?;
        let words = parts.iter()
                         .map(|p| p.as_str().map(str::to_string))
                         .collect::<Option<Vec<String>>>()
                         .ok_or_else(|| QueryError::Decode("`result` must contain only strings".into()))?;
        Ok(words.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Valid,
    Invalid,
    Expired,
    Revoked,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub cert_id: String,
    pub status: VerificationStatus,
}

/// `verify_certification(cert_id)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyCertificateQuery;

impl ContractQuery for VerifyCertificateQuery {
    type Output = Option<VerificationReport>;

    fn method(&self) -> &str {
        "verify_certification"
    }

    fn encode_args(&self, input: &str) -> Value {
        json!({ "cert_id": input.trim() })
    }

    fn decode(&self, payload: Value) -> Result<Self::Output, QueryError> {
        let report: VerificationReport = serde_json::from_value(payload)?;
        Ok(Some(report))
    }
}
