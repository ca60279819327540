//! Máquina de estados del wizard: definición, estado y controlador.

pub mod controller;
pub mod definition;
pub mod state;

pub use controller::FormController;
pub use definition::WizardDefinition;
pub use state::{StepIndex, SubmitResponse, SubmitStatus, WizardState};
