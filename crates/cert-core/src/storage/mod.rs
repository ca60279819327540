//! Capacidad de almacenamiento clave-valor inyectable.
//!
//! Sustituye el acceso directo al almacenamiento local del navegador: el
//! controlador sólo conoce este trait, lo que permite probarlo en memoria y
//! usar un archivo JSON (ver `cert-persistence`) en la CLI.
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StoreError;

mod memory;

pub use memory::InMemoryKeyValueStore;

/// Almacén de cadenas por clave. Las implementaciones usan mutabilidad
/// interior para poder compartirse detrás de un `Arc`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Lee y deserializa un valor JSON. `Ok(None)` si la clave no existe.
pub fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serializa un valor como JSON y lo guarda bajo `key`.
pub fn set_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn json_helpers_roundtrip_through_store() {
        let store = InMemoryKeyValueStore::new();
        let mut value = BTreeMap::new();
        value.insert("name".to_string(), "ISO 9001".to_string());
        set_json(&store, "k", &value).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(r#"{"name":"ISO 9001"}"#));
        let back: Option<BTreeMap<String, String>> = get_json(&store, "k").unwrap();
        assert_eq!(back, Some(value));
    }

    #[test]
    fn corrupt_value_is_a_serialization_error() {
        let store = InMemoryKeyValueStore::new();
        store.set("k", "{not json").unwrap();
        let res: Result<Option<BTreeMap<String, String>>, _> = get_json(&store, "k");
        assert!(matches!(res, Err(StoreError::Serialization(_))));
    }
}
