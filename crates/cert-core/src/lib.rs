//! cert-core: núcleo síncrono del wizard de certificados.
//!
//! - `form`: campos, reglas de validación, `FormRecord` y `FormErrors`.
//! - `step`: definición de pasos y los tres pasos del wizard de emisión.
//! - `wizard`: máquina de estados (`FormController`) e índice de paso.
//! - `event` / `repo`: log append-only de la sesión y su replay.
//! - `storage`: capacidad clave-valor inyectable.
pub mod constants;
pub mod errors;
pub mod event;
pub mod form;
pub mod hashing;
pub mod repo;
pub mod step;
pub mod storage;
pub mod wizard;

pub use errors::{StoreError, WizardError};
pub use event::{EventStore, InMemoryEventStore, WizardEvent, WizardEventKind};
pub use form::{FieldKind, FieldSpec, FormErrors, FormRecord, Rule};
pub use repo::{InMemoryWizardRepository, WizardInstance, WizardRepository};
pub use step::{FormStepDefinition, StepStatus};
pub use storage::{InMemoryKeyValueStore, KeyValueStore};
pub use wizard::{FormController, StepIndex, SubmitResponse, SubmitStatus, WizardDefinition, WizardState};
