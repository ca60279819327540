use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cert_core::{KeyValueStore, StoreError};
use log::{debug, error};

use crate::error::PersistenceError;

/// Almacén clave-valor en un único archivo JSON (objeto de cadenas).
///
/// El contenido se mantiene en memoria; cada escritura reescribe el archivo
/// completo vía archivo temporal + `rename`, así un lector nunca ve un
/// archivo a medio escribir.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// Abre (o prepara) el archivo. Si no existe se parte de un almacén vacío
    /// y el archivo se crea en la primera escritura.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt { path: path.clone(),
                                                                                         reason: e.to_string() })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("store {} opened with {} keys", path.display(), entries.len());
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).keys().cloned().collect()
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn mutate(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = entries.clone();
        apply(&mut next);
        // el estado en memoria sólo avanza si el archivo se escribió
        self.flush(&next).map_err(|e| {
                              error!("store {} write failed: {e}", self.path.display());
                              StoreError::from(e)
                          })?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.mutate(|m| {
                m.insert(key.to_string(), value.to_string());
            })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.get(key)?.is_none() {
            return Ok(());
        }
        self.mutate(|m| {
                m.remove(key);
            })
    }
}
