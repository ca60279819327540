use std::sync::Arc;

use cert_core::constants::step_storage_key;
use cert_core::{FormController, KeyValueStore, StepIndex, SubmitResponse, WizardDefinition};
use cert_persistence::{FileKeyValueStore, PersistenceError};
use cert_core::StoreError;

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    {
        let store = FileKeyValueStore::open(&path).unwrap();
        store.set("certificateFormStep1", r#"{"name":"ISO 9001"}"#).unwrap();
        store.set("other", "x").unwrap();
        store.remove("other").unwrap();
    }
    let reopened = FileKeyValueStore::open(&path).unwrap();
    assert_eq!(reopened.get("certificateFormStep1").unwrap().as_deref(), Some(r#"{"name":"ISO 9001"}"#));
    assert_eq!(reopened.get("other").unwrap(), None);
    assert_eq!(reopened.keys(), vec!["certificateFormStep1".to_string()]);
}

#[test]
fn persistence_errors_map_to_store_errors() {
    let io = PersistenceError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
    assert!(matches!(StoreError::from(io), StoreError::Backend(_)));
    let ser = serde_json::from_str::<u8>("x").unwrap_err();
    assert!(matches!(StoreError::from(PersistenceError::Serialization(ser)), StoreError::Serialization(_)));
}

#[test]
fn saved_wizard_step_is_restored_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let store = Arc::new(FileKeyValueStore::open(&path).unwrap());
        let mut wizard = FormController::new(WizardDefinition::certificate(), store);
        wizard.edit_field("name", "ISO 9001").unwrap();
        wizard.edit_field("type", "quality").unwrap();
        wizard.edit_field("description", "Quality management system certificate").unwrap();
        wizard.begin_submit().unwrap();
        wizard.complete_submit(Ok(SubmitResponse { success: true, message: "Step 1 data saved successfully".into() }))
              .unwrap();
    }

    let store = Arc::new(FileKeyValueStore::open(&path).unwrap());
    assert!(store.get(&step_storage_key(1)).unwrap().is_some());
    let mut wizard = FormController::new(WizardDefinition::certificate(), store);
    wizard.restore().unwrap();
    assert_eq!(wizard.current_step(), Some(StepIndex::new(2, 3).unwrap()));
    assert_eq!(wizard.record(StepIndex::FIRST).map(|r| r.value("name").to_string()), Some("ISO 9001".to_string()));
}
