//! Errores de consulta al contrato remoto.
//!
//! `QueryError` es `Clone` porque vive dentro de `QueryState`: el último
//! error queda visible hasta el siguiente intento.
use thiserror::Error;

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("query input must not be empty")]
    InvalidInput,
    #[error("rpc client misconfigured: {0}")]
    Config(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    #[error("{0}")]
    Remote(String),
    #[error("Unknown error occurred")]
    Unknown,
}

impl QueryError {
    /// Normaliza un fallo arbitrario: sin mensaje útil pasa a `Unknown`.
    pub fn from_fault(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() { Self::Unknown } else { Self::Remote(message) }
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<tokio::task::JoinError> for QueryError {
    fn from(err: tokio::task::JoinError) -> Self {
        // un pánico del cliente no trae un error tipado
        if err.is_panic() { Self::Unknown } else { Self::Transport(err.to_string()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keeps_the_generic_message() {
        assert_eq!(QueryError::Unknown.to_string(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(QueryError::from_fault("  "), QueryError::Unknown);
        assert_eq!(QueryError::from_fault("boom").to_string(), "boom");
    }

    #[test]
    fn rpc_error_format() {
        let err = QueryError::Rpc { code: -32601, message: "method not found".into() };
        assert_eq!(err.to_string(), "rpc error -32601: method not found");
    }
}
