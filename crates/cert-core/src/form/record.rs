//! Registro de valores de un paso (`FormRecord`) y su mapa de errores
//! (`FormErrors`).
//!
//! Ambos preservan el orden de declaración de los campos (`IndexMap`), de
//! modo que el JSON persistido es estable y legible.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::field::FieldSpec;

/// Valores de un paso. Las claves quedan fijadas por los `FieldSpec` del paso.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormRecord {
    values: IndexMap<String, String>,
}

impl FormRecord {
    /// Registro inicial con los valores por defecto de cada campo.
    pub fn from_fields(fields: &[FieldSpec]) -> Self {
        let values = fields.iter().map(|f| (f.name.clone(), f.default.clone())).collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Valor del campo o `""` si no existe.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Actualiza un campo existente. Devuelve `false` si la clave no forma
    /// parte del registro (no se crean claves nuevas).
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Copia los valores de `other` cuyas claves existan en este registro.
    /// Devuelve cuántos campos se copiaron.
    pub fn merge_known(&mut self, other: &FormRecord) -> usize {
        other.values.iter().filter(|(k, v)| self.set(k, v.as_str())).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(self.values
                                      .iter()
                                      .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                                      .collect())
    }
}

/// Errores por campo, recalculados en bloque en cada validación.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    errors: IndexMap<String, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    /// Inserta sólo si el campo aún no tiene error (la primera regla manda).
    pub fn insert_if_absent(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Elimina el error de un campo. Devuelve si había uno.
    pub fn clear_field(&mut self, field: &str) -> bool {
        self.errors.shift_remove(field).is_some()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> Vec<String> {
        self.errors.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
