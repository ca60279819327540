//! Orquestador asíncrono del wizard de emisión.
//! Se encarga de:
//! - Delegar edición, validación y navegación al `FormController` del core.
//! - Ejecutar el envío de cada paso contra el `StepSubmitter` inyectado entre
//!   `begin_submit` y `complete_submit`.
//! - Al guardar el último paso, construir el `Certificate` y registrarlo en el
//!   catálogo antes de pasar a `Submitted`; luego borrar los borradores.
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use log::{info, warn};

use cert_core::{FormController, FormRecord, InMemoryWizardRepository, KeyValueStore, StepIndex, WizardDefinition, WizardInstance,
                WizardRepository, WizardState};

use crate::data::{Certificate, CertificateCatalog};
use crate::errors::CoreError;
use crate::providers::submission::StepSubmitter;

pub struct CertificateWizard {
    controller: FormController,
    submitter: Arc<dyn StepSubmitter>,
    catalog: CertificateCatalog,
    /// Día de referencia para el estado del certificado (hoy si es `None`).
    reference_date: Option<NaiveDate>,
    issued: Option<Certificate>,
}

impl CertificateWizard {
    pub fn new(store: Arc<dyn KeyValueStore>, submitter: Arc<dyn StepSubmitter>) -> Self {
        let controller = FormController::new(WizardDefinition::certificate(), Arc::clone(&store));
        Self { controller, submitter, catalog: CertificateCatalog::new(store), reference_date: None, issued: None }
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn catalog(&self) -> &CertificateCatalog {
        &self.catalog
    }

    pub fn state(&self) -> WizardState {
        self.controller.state()
    }

    pub fn current_step(&self) -> Option<StepIndex> {
        self.controller.current_step()
    }

    /// Certificado emitido al completar el último paso.
    pub fn issued(&self) -> Option<&Certificate> {
        self.issued.as_ref()
    }

    pub fn edit_field(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        Ok(self.controller.edit_field(key, value)?)
    }

    pub fn validate(&mut self) -> bool {
        self.controller.validate()
    }

    pub fn previous(&mut self) -> Result<StepIndex, CoreError> {
        Ok(self.controller.previous()?)
    }

    pub fn restore(&mut self) -> Result<WizardState, CoreError> {
        Ok(self.controller.restore()?)
    }

    /// Valida y envía el paso actual. Un fallo del backend no es `Err`: queda
    /// en `controller().status()` y el wizard no avanza. En el último paso el
    /// certificado se registra antes de cerrar el wizard; si el catálogo lo
    /// rechaza (p. ej. id duplicado) el wizard sigue editable en ese paso.
    pub async fn submit_step(&mut self) -> Result<WizardState, CoreError> {
        let (step, record) = self.controller.begin_submit()?;
        let outcome = self.submitter.submit(step, &record).await.map_err(|e| e.to_string());
        let reference = self.reference_date.unwrap_or_else(|| Local::now().date_naive());
        let catalog = &self.catalog;
        let mut issued = None;
        let state = self.controller.complete_submit_with(outcome, |records| {
                                       let certificate = issue(catalog, records, reference).map_err(|e| e.to_string())?;
                                       issued = Some(certificate);
                                       Ok(())
                                   })?;
        if let (WizardState::Submitted, Some(certificate)) = (state, issued) {
            self.controller.clear_saved()?;
            info!("certificate {} issued to {}", certificate.id, certificate.recipient);
            self.issued = Some(certificate);
        }
        Ok(state)
    }

    /// Progreso por paso (estado e intentos) reconstruido desde el log de eventos.
    pub fn progress(&self) -> WizardInstance {
        InMemoryWizardRepository::new().load(self.controller.session_id(),
                                             &self.controller.events(),
                                             self.controller.definition())
    }
}

fn issue(catalog: &CertificateCatalog, records: &[FormRecord], reference: NaiveDate) -> Result<Certificate, CoreError> {
    let certificate = Certificate::from_records(records, reference)?;
    if let Err(e) = catalog.append(certificate.clone()) {
        warn!("certificate {} not recorded: {e}", certificate.id);
        return Err(e);
    }
    Ok(certificate)
}
