//! Cliente de contratos QualiNova: adaptador de consultas con estado
//! observable, cliente JSON-RPC y cliente simulado.

pub mod adapter;
pub mod client;
pub mod config;
pub mod errors;
pub mod protocol;
pub mod query;

pub use adapter::{GreetingAdapter, QueryAdapter, QueryState, VerificationAdapter};
pub use client::{ContractClient, HttpContractClient, MockContractClient, MockReply, NetworkConfig};
pub use config::RpcConfig;
pub use errors::QueryError;
pub use query::{ContractQuery, GreetingQuery, VerificationReport, VerificationStatus, VerifyCertificateQuery};
