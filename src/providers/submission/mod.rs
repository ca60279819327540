//! Backends de envío de pasos del wizard.
pub mod implementations;
pub mod trait_submitter;

pub use implementations::simulated::SimulatedSubmitter;
pub use trait_submitter::{StepSubmitter, SubmitError};
