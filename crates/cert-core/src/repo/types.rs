//! Reconstrucción (`replay`) del progreso de una sesión a partir de su log.
//!
//! El repositorio consume eventos en orden y produce un `WizardInstance`
//! con el estado de persistencia de cada paso y el cursor actual. No guarda
//! valores de campos: sólo el rastro de qué se guardó y cuándo.
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::event::{WizardEvent, WizardEventKind};
use crate::step::StepStatus;
use crate::wizard::WizardDefinition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardInstance {
    pub session_id: Uuid,
    pub steps: Vec<StepSlot>,
    /// Paso en edición (1-based).
    pub cursor: usize,
    pub submitted: bool,
}

/// Estado de un paso en la instancia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSlot {
    pub step_id: String,
    pub status: StepStatus,
    pub attempts: u32,
    pub saved_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

/// Trait para reconstruir el estado de una sesión a partir de eventos.
pub trait WizardRepository {
    fn load(&self, session_id: Uuid, events: &[WizardEvent], definition: &WizardDefinition) -> WizardInstance;
}

#[derive(Debug, Default)]
pub struct InMemoryWizardRepository;

impl InMemoryWizardRepository {
    pub fn new() -> Self {
        Self
    }
}

impl WizardRepository for InMemoryWizardRepository {
    fn load(&self, session_id: Uuid, events: &[WizardEvent], definition: &WizardDefinition) -> WizardInstance {
        let mut steps: Vec<StepSlot> = definition.steps
                                                 .iter()
                                                 .map(|s| StepSlot { step_id: s.id().to_string(),
                                                                     status: StepStatus::Pending,
                                                                     attempts: 0,
                                                                     saved_at: None,
                                                                     last_error: None })
                                                 .collect();
        let total = steps.len();
        let mut cursor = 1;
        let mut submitted = false;
        for ev in events.iter().filter(|e| e.session_id == session_id) {
            match &ev.kind {
                WizardEventKind::SubmitStarted { step } => {
                    if let Some(slot) = slot_mut(&mut steps, *step) {
                        slot.status = StepStatus::Saving;
                        slot.attempts += 1;
                    }
                }
                WizardEventKind::StepSaved { step, .. } => {
                    if let Some(slot) = slot_mut(&mut steps, *step) {
                        slot.status = StepStatus::Saved;
                        slot.saved_at = Some(ev.ts);
                        slot.last_error = None;
                    }
                    cursor = (*step + 1).min(total);
                }
                WizardEventKind::SubmitFailed { step, message } => {
                    if let Some(slot) = slot_mut(&mut steps, *step) {
                        slot.status = StepStatus::Failed;
                        slot.last_error = Some(message.clone());
                    }
                }
                WizardEventKind::StepReverted { to, .. } => cursor = *to,
                WizardEventKind::Restored { restored_steps, resumed_at } => {
                    for step in restored_steps {
                        if let Some(slot) = slot_mut(&mut steps, *step) {
                            slot.status = StepStatus::Saved;
                        }
                    }
                    cursor = *resumed_at;
                }
                WizardEventKind::WizardSubmitted => submitted = true,
                WizardEventKind::SessionStarted { .. }
                | WizardEventKind::FieldEdited { .. }
                | WizardEventKind::ValidationFailed { .. } => {}
            }
        }
        WizardInstance { session_id, steps, cursor, submitted }
    }
}

fn slot_mut(steps: &mut [StepSlot], step: usize) -> Option<&mut StepSlot> {
    step.checked_sub(1).and_then(|i| steps.get_mut(i))
}
