//! Estado observable del wizard: índice de paso, estado de la máquina y
//! mensajes de envío.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::WizardError;

/// Índice de paso 1-based dentro de `[1, N]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepIndex(usize);

impl StepIndex {
    pub const FIRST: StepIndex = StepIndex(1);

    pub fn new(index: usize, total: usize) -> Result<Self, WizardError> {
        if index == 0 || index > total {
            return Err(WizardError::InvalidStep { index, total });
        }
        Ok(Self(index))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Posición 0-based para indexar vectores.
    pub fn position(self) -> usize {
        self.0 - 1
    }

    /// Paso siguiente, `None` si ya es el último.
    pub fn next(self, total: usize) -> Option<Self> {
        (self.0 < total).then_some(Self(self.0 + 1))
    }

    /// Paso anterior, `None` en el primero.
    pub fn previous(self) -> Option<Self> {
        (self.0 > 1).then_some(Self(self.0 - 1))
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardState {
    Editing(StepIndex),
    /// Terminal: todos los pasos guardados.
    Submitted,
}

/// Mensaje visible tras un intento de envío.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitStatus {
    pub success: bool,
    pub message: String,
}

impl SubmitStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}

/// Respuesta del backend de envío de un paso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_index_bounds() {
        assert!(StepIndex::new(0, 3).is_err());
        assert!(StepIndex::new(4, 3).is_err());
        let s = StepIndex::new(3, 3).unwrap();
        assert_eq!(s.next(3), None);
        assert_eq!(s.previous().map(StepIndex::get), Some(2));
        assert_eq!(StepIndex::FIRST.previous(), None);
        assert_eq!(StepIndex::FIRST.position(), 0);
    }
}
