//! Tipos de evento del wizard y estructura `WizardEvent`.
//!
//! Rol en el flujo:
//! - Cada operación del `FormController` que cambia estado observable emite un
//!   evento a un `EventStore` append-only.
//! - El log permite reconstruir el progreso de una sesión (`repo`) sin
//!   depender del controlador vivo.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEventKind {
    /// Primer evento de toda sesión.
    SessionStarted { definition_hash: String, step_count: usize },
    /// Edición de un campo del paso actual. El valor no se registra.
    FieldEdited { step: usize, field: String },
    /// `submit` rechazado por validación; lista de campos con error.
    ValidationFailed { step: usize, fields: Vec<String> },
    SubmitStarted { step: usize },
    /// Registro del paso persistido bajo `storage_key`.
    StepSaved { step: usize, storage_key: String },
    SubmitFailed { step: usize, message: String },
    /// Retroceso explícito del usuario (`from` -> `to`).
    StepReverted { from: usize, to: usize },
    /// Borradores recuperados del almacén al reabrir la sesión.
    Restored { restored_steps: Vec<usize>, resumed_at: usize },
    /// Estado terminal.
    WizardSubmitted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub session_id: Uuid,
    pub kind: WizardEventKind,
    pub ts: DateTime<Utc>,
}
