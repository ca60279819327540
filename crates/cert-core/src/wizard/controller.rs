//! Controlador síncrono del wizard multi-paso.
//!
//! Mantiene un `FormRecord` por paso, recalcula `FormErrors` en cada
//! validación y sólo avanza el índice de paso tras un envío exitoso. El envío
//! se divide en dos fases (`begin_submit` / `complete_submit`) para que la
//! espera asíncrona quede fuera del core: el llamador ejecuta el backend entre
//! ambas y entrega el resultado.
//!
//! Invariantes:
//! - `StepIndex` sólo decrece vía `previous`.
//! - `loading` vuelve a `false` en todo camino de `complete_submit`.
//! - Con `loading == true` se rechazan ediciones, retrocesos y nuevos envíos.
use std::sync::Arc;

use log::{debug, warn};
use uuid::Uuid;

use crate::constants::{step_storage_key, MSG_FIX_ERRORS, MSG_SUBMIT_FAILED, MSG_UNEXPECTED};
use crate::errors::{StoreError, WizardError};
use crate::event::{EventStore, InMemoryEventStore, WizardEvent, WizardEventKind};
use crate::form::{FormErrors, FormRecord};
use crate::step::FormStepDefinition;
use crate::storage::{get_json, set_json, KeyValueStore};

use super::definition::WizardDefinition;
use super::state::{StepIndex, SubmitResponse, SubmitStatus, WizardState};

pub struct FormController<E: EventStore = InMemoryEventStore> {
    definition: WizardDefinition,
    store: Arc<dyn KeyValueStore>,
    event_store: E,
    session_id: Uuid,
    records: Vec<FormRecord>,
    errors: FormErrors,
    status: Option<SubmitStatus>,
    state: WizardState,
    loading: bool,
}

impl FormController<InMemoryEventStore> {
    /// Controlador con log de eventos en memoria.
    pub fn new(definition: WizardDefinition, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_event_store(definition, store, InMemoryEventStore::default())
    }
}

impl<E: EventStore> FormController<E> {
    pub fn with_event_store(definition: WizardDefinition, store: Arc<dyn KeyValueStore>, event_store: E) -> Self {
        let records = definition.steps.iter().map(|s| s.initial_record()).collect();
        let mut controller = Self { definition,
                                    store,
                                    event_store,
                                    session_id: Uuid::new_v4(),
                                    records,
                                    errors: FormErrors::new(),
                                    status: None,
                                    state: WizardState::Editing(StepIndex::FIRST),
                                    loading: false };
        let kind = WizardEventKind::SessionStarted { definition_hash: controller.definition.definition_hash.clone(),
                                                     step_count: controller.definition.len() };
        controller.emit(kind);
        controller
    }

    fn emit(&mut self, kind: WizardEventKind) {
        let ev = self.event_store.append_kind(self.session_id, kind);
        debug!("[wizard {}] #{} {:?}", self.session_id, ev.seq, ev.kind);
    }

    fn editing_step(&self) -> Result<StepIndex, WizardError> {
        match self.state {
            WizardState::Editing(step) => Ok(step),
            WizardState::Submitted => Err(WizardError::AlreadySubmitted),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Paso en edición; `None` una vez enviado.
    pub fn current_step(&self) -> Option<StepIndex> {
        self.editing_step().ok()
    }

    pub fn current_definition(&self) -> Option<&dyn FormStepDefinition> {
        self.current_step().and_then(|s| self.definition.step(s.get()))
    }

    pub fn step_count(&self) -> usize {
        self.definition.len()
    }

    pub fn record(&self, step: StepIndex) -> Option<&FormRecord> {
        self.records.get(step.position())
    }

    pub fn current_record(&self) -> Option<&FormRecord> {
        self.current_step().and_then(|s| self.record(s))
    }

    pub fn records(&self) -> &[FormRecord] {
        &self.records
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn status(&self) -> Option<&SubmitStatus> {
        self.status.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitted(&self) -> bool {
        self.state == WizardState::Submitted
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn events(&self) -> Vec<WizardEvent> {
        self.event_store.list(self.session_id)
    }

    /// Actualiza un campo del paso actual, limpia su error (si lo había) y el
    /// mensaje de estado. No cambia de paso.
    pub fn edit_field(&mut self, key: &str, value: &str) -> Result<(), WizardError> {
        if self.loading {
            return Err(WizardError::SubmitInProgress);
        }
        let step = self.editing_step()?;
        let record = self.records
                         .get_mut(step.position())
                         .ok_or(WizardError::InvalidStep { index: step.get(), total: self.definition.len() })?;
        if !record.set(key, value) {
            return Err(WizardError::UnknownField(key.to_string()));
        }
        self.errors.clear_field(key);
        self.status = None;
        self.emit(WizardEventKind::FieldEdited { step: step.get(), field: key.to_string() });
        Ok(())
    }

    /// Recalcula los errores del paso actual. `true` si no hay ninguno.
    pub fn validate(&mut self) -> bool {
        let errors = match self.current_step() {
            Some(step) => match (self.definition.step(step.get()), self.records.get(step.position())) {
                (Some(def), Some(record)) => def.validate(record),
                _ => FormErrors::new(),
            },
            None => FormErrors::new(),
        };
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Primera fase del envío: valida y, si procede, marca `loading` y
    /// devuelve una copia del registro a enviar.
    pub fn begin_submit(&mut self) -> Result<(StepIndex, FormRecord), WizardError> {
        if self.loading {
            return Err(WizardError::SubmitInProgress);
        }
        let step = self.editing_step()?;
        if !self.validate() {
            self.status = Some(SubmitStatus::failure(MSG_FIX_ERRORS));
            let fields = self.errors.fields();
            self.emit(WizardEventKind::ValidationFailed { step: step.get(), fields });
            return Err(WizardError::ValidationFailed(step.get()));
        }
        self.loading = true;
        self.status = None;
        self.emit(WizardEventKind::SubmitStarted { step: step.get() });
        let record = self.records.get(step.position()).cloned().unwrap_or_default();
        Ok((step, record))
    }

    /// Segunda fase: aplica el resultado del backend. Un error de backend o de
    /// almacenamiento no es un `Err` aquí: queda como mensaje de estado y el
    /// wizard permanece en el paso actual.
    pub fn complete_submit(&mut self, outcome: Result<SubmitResponse, String>) -> Result<WizardState, WizardError> {
        self.complete_submit_with(outcome, |_| Ok(()))
    }

    /// Como `complete_submit`, pero tras guardar el último paso ejecuta
    /// `finalize` con todos los registros antes de pasar a `Submitted`. Si
    /// `finalize` falla, el wizard sigue en el último paso con el mensaje de
    /// error como estado.
    pub fn complete_submit_with<F>(&mut self, outcome: Result<SubmitResponse, String>, finalize: F) -> Result<WizardState, WizardError>
        where F: FnOnce(&[FormRecord]) -> Result<(), String>
    {
        if !self.loading {
            return Err(WizardError::NoSubmitInProgress);
        }
        let step = match self.editing_step() {
            Ok(step) => step,
            Err(e) => {
                self.loading = false;
                return Err(e);
            }
        };
        let saved = match outcome {
            Ok(resp) if resp.success => self.persist_step(step).map(|key| (key, resp.message)).map_err(|e| e.to_string()),
            Ok(resp) => Err(non_empty_or(resp.message, MSG_SUBMIT_FAILED)),
            Err(message) => Err(non_empty_or(message, MSG_UNEXPECTED)),
        };
        let saved = match saved {
            Ok(done) if step.next(self.definition.len()).is_none() => {
                finalize(&self.records).map(|_| done).map_err(|m| non_empty_or(m, MSG_UNEXPECTED))
            }
            other => other,
        };
        self.loading = false;

        match saved {
            Ok((storage_key, message)) => {
                self.status = Some(SubmitStatus::success(message));
                self.errors.clear();
                self.emit(WizardEventKind::StepSaved { step: step.get(), storage_key });
                match step.next(self.definition.len()) {
                    Some(next) => self.state = WizardState::Editing(next),
                    None => {
                        self.state = WizardState::Submitted;
                        self.emit(WizardEventKind::WizardSubmitted);
                    }
                }
            }
            Err(message) => {
                warn!("[wizard {}] submit of step {} failed: {}", self.session_id, step, message);
                self.status = Some(SubmitStatus::failure(message.clone()));
                self.emit(WizardEventKind::SubmitFailed { step: step.get(), message });
            }
        }
        Ok(self.state)
    }

    fn persist_step(&self, step: StepIndex) -> Result<String, StoreError> {
        let key = step_storage_key(step.get());
        if let Some(record) = self.records.get(step.position()) {
            set_json(self.store.as_ref(), &key, record)?;
        }
        Ok(key)
    }

    /// Único camino de retroceso: `Editing(k)` -> `Editing(k-1)`.
    pub fn previous(&mut self) -> Result<StepIndex, WizardError> {
        if self.loading {
            return Err(WizardError::SubmitInProgress);
        }
        let from = self.editing_step()?;
        let to = from.previous().ok_or(WizardError::AtFirstStep)?;
        self.state = WizardState::Editing(to);
        self.errors.clear();
        self.status = None;
        self.emit(WizardEventKind::StepReverted { from: from.get(), to: to.get() });
        Ok(to)
    }

    /// Recupera los borradores guardados y reanuda en el primer paso sin
    /// borrador (o en el último si todos lo tienen).
    pub fn restore(&mut self) -> Result<WizardState, WizardError> {
        if self.loading {
            return Err(WizardError::SubmitInProgress);
        }
        self.editing_step()?;
        let mut restored = Vec::new();
        for (i, record) in self.records.iter_mut().enumerate() {
            let key = step_storage_key(i + 1);
            if let Some(saved) = get_json::<FormRecord>(self.store.as_ref(), &key)? {
                record.merge_known(&saved);
                restored.push(i + 1);
            }
        }
        let total = self.definition.len();
        let resume = (1..=total).find(|s| !restored.contains(s)).unwrap_or(total);
        self.state = WizardState::Editing(StepIndex::new(resume, total)?);
        self.errors.clear();
        self.status = None;
        self.emit(WizardEventKind::Restored { restored_steps: restored, resumed_at: resume });
        Ok(self.state)
    }

    /// Borra los borradores de todos los pasos del almacén.
    pub fn clear_saved(&self) -> Result<(), WizardError> {
        for step in 1..=self.definition.len() {
            self.store.remove(&step_storage_key(step))?;
        }
        Ok(())
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() { fallback.to_string() } else { message }
}
