use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_test::{assert_err, assert_ok};

use cert_core::constants::{step_storage_key, CATALOG_STORAGE_KEY};
use cert_core::{FormRecord, InMemoryKeyValueStore, KeyValueStore, StepIndex, StepStatus, SubmitResponse, SubmitStatus,
                WizardError, WizardState};
use cert_persistence::FileKeyValueStore;
use qualinova::providers::submission::SubmitError;
use qualinova::{CatalogQuery, CertificateStatus, CertificateWizard, CoreError, SimulatedSubmitter, StepSubmitter};

const DETAILS: &[(&str, &str)] = &[("name", "ISO 9001 Compliance"),
                                   ("type", "compliance"),
                                   ("description", "Quality management system certification")];
const RECIPIENT: &[(&str, &str)] = &[("recipient_name", "Acme Corporation"),
                                     ("recipient_email", "contact@acmecorp.com"),
                                     ("issue_date", "2024-01-15"),
                                     ("expiry_date", "2025-01-15")];
const REVIEW: &[(&str, &str)] = &[("confirmed", "true")];

fn fill(wizard: &mut CertificateWizard, values: &[(&str, &str)]) {
    for (k, v) in values {
        wizard.edit_field(k, v).unwrap();
    }
}

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

struct ScriptedSubmitter {
    outcome: Result<SubmitResponse, String>,
}

#[async_trait]
impl StepSubmitter for ScriptedSubmitter {
    fn get_name(&self) -> &str {
        "scripted"
    }

    async fn submit(&self, _step: StepIndex, _record: &FormRecord) -> Result<SubmitResponse, SubmitError> {
        self.outcome.clone().map_err(SubmitError::from)
    }
}

fn scripted(outcome: Result<SubmitResponse, String>) -> (Arc<InMemoryKeyValueStore>, CertificateWizard) {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let wizard = CertificateWizard::new(store.clone(), Arc::new(ScriptedSubmitter { outcome }));
    (store, wizard)
}

#[tokio::test(start_paused = true)]
async fn three_steps_issue_a_certificate() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let submitter = Arc::new(SimulatedSubmitter::new(Duration::from_millis(1500)));
    let mut wizard = CertificateWizard::new(store.clone(), submitter).with_reference_date(reference());

    fill(&mut wizard, DETAILS);
    assert_eq!(assert_ok!(wizard.submit_step().await), WizardState::Editing(StepIndex::new(2, 3).unwrap()));
    assert_eq!(wizard.controller().status(), Some(&SubmitStatus::success("Step 1 data saved successfully")));
    assert!(store.get(&step_storage_key(1)).unwrap().is_some());

    fill(&mut wizard, RECIPIENT);
    assert_ok!(wizard.submit_step().await);
    fill(&mut wizard, REVIEW);
    assert_eq!(assert_ok!(wizard.submit_step().await), WizardState::Submitted);
    assert_eq!(wizard.controller().status().map(|s| s.message.as_str()), Some("Step 3 data saved successfully"));

    let issued = wizard.issued().unwrap().clone();
    assert!(issued.id.starts_with("CERT-2024-"));
    assert_eq!(issued.status, CertificateStatus::Active);
    assert_eq!(issued.recipient, "Acme Corporation");

    // borradores borrados, catálogo con un certificado
    for step in 1..=3 {
        assert_eq!(store.get(&step_storage_key(step)).unwrap(), None);
    }
    assert!(store.get(CATALOG_STORAGE_KEY).unwrap().is_some());
    let page = wizard.catalog().query(&CatalogQuery::default(), reference()).unwrap();
    assert_eq!(page.summary(), "showing 1 out of 1 certificates");
    assert_eq!(page.items[0], issued);

    assert!(matches!(wizard.edit_field("name", "x"), Err(CoreError::Wizard(WizardError::AlreadySubmitted))));
}

#[tokio::test]
async fn invalid_step_is_not_sent() {
    let (store, mut wizard) = scripted(Ok(SubmitResponse { success: true, message: "ok".into() }));
    wizard.edit_field("name", "ab").unwrap();
    let err = assert_err!(wizard.submit_step().await);
    assert!(matches!(err, CoreError::Wizard(WizardError::ValidationFailed(1))));
    assert_eq!(wizard.controller().errors().get("name"), Some("Certificate name must be at least 3 characters"));
    assert_eq!(wizard.controller().status(), Some(&SubmitStatus::failure("Please fix the errors before proceeding")));
    assert_eq!(wizard.current_step(), Some(StepIndex::FIRST));
    assert!(store.is_empty());
}

#[tokio::test]
async fn backend_error_becomes_status_message() {
    let (store, mut wizard) = scripted(Err("backend unavailable".into()));
    fill(&mut wizard, DETAILS);
    assert_eq!(assert_ok!(wizard.submit_step().await), WizardState::Editing(StepIndex::FIRST));
    assert_eq!(wizard.controller().status(), Some(&SubmitStatus::failure("backend unavailable")));
    assert!(!wizard.controller().is_loading());
    assert!(store.is_empty());
}

#[tokio::test]
async fn messageless_failures_use_fallback_text() {
    let (_, mut wizard) = scripted(Err(String::new()));
    fill(&mut wizard, DETAILS);
    assert_ok!(wizard.submit_step().await);
    assert_eq!(wizard.controller().status().map(|s| s.message.as_str()), Some("An unexpected error occurred"));

    let (_, mut wizard) = scripted(Ok(SubmitResponse { success: false, message: String::new() }));
    fill(&mut wizard, DETAILS);
    assert_ok!(wizard.submit_step().await);
    assert_eq!(wizard.controller().status(), Some(&SubmitStatus::failure("Failed to submit form")));
    assert_eq!(wizard.current_step(), Some(StepIndex::FIRST));
}

#[tokio::test(start_paused = true)]
async fn draft_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let submitter = Arc::new(SimulatedSubmitter::new(Duration::from_millis(10)));

    {
        let store = Arc::new(FileKeyValueStore::open(&path).unwrap());
        let mut wizard = CertificateWizard::new(store, submitter.clone());
        fill(&mut wizard, DETAILS);
        assert_ok!(wizard.submit_step().await);
    }

    let store = Arc::new(FileKeyValueStore::open(&path).unwrap());
    let mut wizard = CertificateWizard::new(store, submitter);
    assert_eq!(wizard.restore().unwrap(), WizardState::Editing(StepIndex::new(2, 3).unwrap()));
    assert_eq!(wizard.controller().record(StepIndex::FIRST).unwrap().value("name"), "ISO 9001 Compliance");
    assert!(matches!(wizard.previous(), Ok(s) if s == StepIndex::FIRST));
    assert!(matches!(wizard.previous(), Err(CoreError::Wizard(WizardError::AtFirstStep))));
}

#[tokio::test(start_paused = true)]
async fn duplicate_certificate_id_keeps_wizard_editable() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let submitter = Arc::new(SimulatedSubmitter::new(Duration::from_millis(10)));
    let with_id: Vec<(&str, &str)> = RECIPIENT.iter().copied().chain([("certificate_id", "CERT-1")]).collect();

    let mut first = CertificateWizard::new(store.clone(), submitter.clone()).with_reference_date(reference());
    fill(&mut first, DETAILS);
    assert_ok!(first.submit_step().await);
    fill(&mut first, &with_id);
    assert_ok!(first.submit_step().await);
    fill(&mut first, REVIEW);
    assert_eq!(assert_ok!(first.submit_step().await), WizardState::Submitted);
    assert_eq!(first.issued().map(|c| c.id.as_str()), Some("CERT-1"));

    let mut second = CertificateWizard::new(store.clone(), submitter).with_reference_date(reference());
    fill(&mut second, DETAILS);
    assert_ok!(second.submit_step().await);
    fill(&mut second, &with_id);
    assert_ok!(second.submit_step().await);
    fill(&mut second, REVIEW);
    let last = StepIndex::new(3, 3).unwrap();
    assert_eq!(assert_ok!(second.submit_step().await), WizardState::Editing(last));
    assert!(second.issued().is_none());
    assert_eq!(second.controller().status(), Some(&SubmitStatus::failure("Certificado ya emitido: CERT-1")));
    assert_eq!(second.catalog().load().unwrap().len(), 1);

    // se puede volver, corregir el id y emitir
    assert!(matches!(second.previous(), Ok(s) if s == StepIndex::new(2, 3).unwrap()));
    assert_ok!(second.edit_field("certificate_id", "CERT-2"));
    assert_eq!(assert_ok!(second.submit_step().await), WizardState::Editing(last));
    assert_eq!(assert_ok!(second.submit_step().await), WizardState::Submitted);
    assert_eq!(second.issued().map(|c| c.id.as_str()), Some("CERT-2"));
    assert_eq!(second.catalog().load().unwrap().len(), 2);
}

#[tokio::test]
async fn progress_reports_status_and_attempts_per_step() {
    let (_, mut wizard) = scripted(Err("backend unavailable".into()));
    fill(&mut wizard, DETAILS);
    assert_ok!(wizard.submit_step().await);
    assert_ok!(wizard.submit_step().await);

    let progress = wizard.progress();
    assert_eq!(progress.cursor, 1);
    assert!(!progress.submitted);
    assert_eq!(progress.steps[0].step_id, "details");
    assert_eq!(progress.steps[0].status, StepStatus::Failed);
    assert_eq!(progress.steps[0].attempts, 2);
    assert_eq!(progress.steps[0].last_error.as_deref(), Some("backend unavailable"));
    assert_eq!(progress.steps[1].status, StepStatus::Pending);
    assert_eq!(progress.steps[1].attempts, 0);
}

#[tokio::test(start_paused = true)]
async fn progress_marks_saved_steps_and_advances_cursor() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let submitter = Arc::new(SimulatedSubmitter::new(Duration::from_millis(10)));
    let mut wizard = CertificateWizard::new(store, submitter).with_reference_date(reference());
    fill(&mut wizard, DETAILS);
    assert_ok!(wizard.submit_step().await);

    let progress = wizard.progress();
    assert_eq!(progress.cursor, 2);
    assert_eq!(progress.steps[0].status, StepStatus::Saved);
    assert_eq!(progress.steps[0].attempts, 1);
    assert!(progress.steps[0].saved_at.is_some());
    assert_eq!(progress.steps[2].status, StepStatus::Pending);
}
