//! Adaptador de consultas: expone `{result, loading, error}` para una
//! función del contrato y aplica sólo la respuesta más reciente.
//!
//! Cada `run` recibe un número de secuencia monótono. Una respuesta se
//! aplica si su secuencia supera a la última aplicada; `loading` vuelve a
//! `false` cuando termina la última petición emitida. Tras `close()` las
//! respuestas tardías se descartan.
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::client::ContractClient;
use crate::config::DEFAULT_TIMEOUT_MS;
use crate::errors::QueryError;
use crate::query::{ContractQuery, GreetingQuery, VerifyCertificateQuery};

/// Instantánea observable del adaptador.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState<T> {
    pub result: T,
    pub loading: bool,
    pub error: Option<QueryError>,
}

#[derive(Debug, Default)]
struct Inner<T> {
    state: QueryState<T>,
    last_applied: u64,
    last_input: Option<String>,
}

pub struct QueryAdapter<C: ContractClient, Q: ContractQuery> {
    client: Arc<C>,
    query: Q,
    inner: RwLock<Inner<Q::Output>>,
    issued: AtomicU64,
    closed: AtomicBool,
    timeout: Duration,
}

pub type GreetingAdapter<C> = QueryAdapter<C, GreetingQuery>;
pub type VerificationAdapter<C> = QueryAdapter<C, VerifyCertificateQuery>;

impl<C, Q> QueryAdapter<C, Q>
    where C: ContractClient + 'static,
          Q: ContractQuery
{
    pub fn new(client: Arc<C>, query: Q) -> Self {
        Self { client,
               query,
               inner: RwLock::new(Inner { state: QueryState::default(), last_applied: 0, last_input: None }),
               issued: AtomicU64::new(0),
               closed: AtomicBool::new(false),
               timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS) }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    pub async fn state(&self) -> QueryState<Q::Output> {
        self.inner.read().await.state.clone()
    }

    /// Número de peticiones emitidas hasta ahora.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Deja de aceptar respuestas. Las peticiones en vuelo terminan pero
    /// su resultado no se aplica.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Emite una consulta y espera su finalización. Devuelve el estado tal
    /// como quedó al aplicar (o descartar) la respuesta.
    pub async fn run(&self, input: &str) -> QueryState<Q::Output> {
        if self.is_closed() {
            return self.state().await;
        }
        // la secuencia se toma bajo el mismo lock que marca `loading`: una
        // petición anterior no puede pisar el estado de una posterior
        let seq = {
            let mut inner = self.inner.write().await;
            inner.state.loading = true;
            inner.state.error = None;
            self.issued.fetch_add(1, Ordering::SeqCst) + 1
        };

        let outcome = if input.trim().is_empty() {
            Err(QueryError::InvalidInput)
        } else {
            self.call(input).await
        };
        self.apply(seq, outcome).await
    }

    /// Como `run`, pero sólo si la entrada cambió respecto de la anterior.
    pub async fn watch(&self, input: &str) -> Option<QueryState<Q::Output>> {
        {
            let mut inner = self.inner.write().await;
            if inner.last_input.as_deref() == Some(input) {
                return None;
            }
            inner.last_input = Some(input.to_string());
        }
        Some(self.run(input).await)
    }

    /// Lanza `run` en segundo plano.
    pub fn spawn_run(self: &Arc<Self>, input: impl Into<String>) -> JoinHandle<QueryState<Q::Output>> {
        let this = Arc::clone(self);
        let input = input.into();
        tokio::spawn(async move { this.run(&input).await })
    }

    async fn call(&self, input: &str) -> Result<Q::Output, QueryError> {
        let client = Arc::clone(&self.client);
        let method = self.query.method().to_string();
        let args = self.query.encode_args(input);

        // en una tarea propia: un pánico del cliente llega como JoinError
        let handle = tokio::spawn(async move { client.invoke(&method, args).await });
        let abort = handle.abort_handle();
        let payload = match tokio::time::timeout(self.timeout, handle).await {
            Err(_) => {
                abort.abort();
                return Err(QueryError::Timeout(self.timeout.as_millis() as u64));
            }
            Ok(joined) => joined??,
        };
        self.query.decode(payload)
    }

    async fn apply(&self, seq: u64, outcome: Result<Q::Output, QueryError>) -> QueryState<Q::Output> {
        let mut inner = self.inner.write().await;
        if self.is_closed() {
            debug!("{} #{seq}: adapter closed, response dropped", self.query.method());
            return inner.state.clone();
        }
        if seq <= inner.last_applied {
            debug!("{} #{seq}: stale response discarded (last applied #{})", self.query.method(), inner.last_applied);
            return inner.state.clone();
        }
        inner.last_applied = seq;
        match outcome {
            Ok(value) => {
                inner.state.result = value;
                inner.state.error = None;
            }
            Err(err) => {
                warn!("{} #{seq} failed: {err}", self.query.method());
                inner.state.error = Some(err);
            }
        }
        if seq == self.issued.load(Ordering::SeqCst) {
            inner.state.loading = false;
        }
        inner.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockContractClient, MockReply};
    use serde_json::json;

    fn greeting(replies: Vec<MockReply>) -> GreetingAdapter<MockContractClient> {
        QueryAdapter::new(Arc::new(MockContractClient::with_replies(replies)), GreetingQuery)
    }

    #[tokio::test]
    async fn initial_state_is_idle() {
        let adapter = greeting(vec![]);
        assert_eq!(adapter.state().await, QueryState { result: String::new(), loading: false, error: None });
    }

    #[tokio::test]
    async fn success_sets_result_and_clears_loading() {
        let adapter = greeting(vec![MockReply::ok(json!({"result": ["Hello", "Dev"]}))]);
        let state = adapter.run("Dev").await;
        assert_eq!(state.result, "Hello Dev");
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(adapter.client().calls()[0], ("hello".to_string(), json!({"to": "Dev"})));
    }

    #[tokio::test]
    async fn failure_keeps_previous_result() {
        let adapter = greeting(vec![MockReply::ok(json!({"result": ["Hello", "A"]})),
                                    MockReply::fail(QueryError::Remote("node unavailable".into()))]);
        adapter.run("A").await;
        let state = adapter.run("B").await;
        assert_eq!(state.result, "Hello A");
        assert_eq!(state.error, Some(QueryError::Remote("node unavailable".into())));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn empty_input_skips_the_network() {
        let adapter = greeting(vec![]);
        let state = adapter.run("   ").await;
        assert_eq!(state.error, Some(QueryError::InvalidInput));
        assert_eq!(adapter.client().call_count(), 0);
    }

    #[tokio::test]
    async fn client_panic_becomes_unknown_error() {
        let adapter = greeting(vec![MockReply::Panic]);
        let state = adapter.run("Dev").await;
        assert_eq!(state.error, Some(QueryError::Unknown));
        assert_eq!(state.error.unwrap().to_string(), "Unknown error occurred");
    }

    #[tokio::test]
    async fn watch_ignores_repeated_input() {
        let adapter = greeting(vec![]);
        assert!(adapter.watch("Dev").await.is_some());
        assert!(adapter.watch("Dev").await.is_none());
        assert!(adapter.watch("Ana").await.is_some());
        assert_eq!(adapter.client().call_count(), 2);
        assert_eq!(adapter.state().await.result, "Hello Ana");
    }
}
