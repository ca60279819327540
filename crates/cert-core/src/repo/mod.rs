pub mod types;
pub use types::{InMemoryWizardRepository, StepSlot, WizardInstance, WizardRepository};
