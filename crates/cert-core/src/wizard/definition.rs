//! Definición inmutable del wizard: lista ordenada de pasos y su hash.
use serde_json::json;

use crate::constants::WIZARD_VERSION;
use crate::errors::WizardError;
use crate::hashing::hash_value;
use crate::step::{CertificateDetailsStep, FormStepDefinition, RecipientValidityStep, ReviewStep};

pub struct WizardDefinition {
    pub steps: Vec<Box<dyn FormStepDefinition>>,
    pub definition_hash: String,
}

impl WizardDefinition {
    /// Construye la definición. Un wizard sin pasos no es válido.
    pub fn new(steps: Vec<Box<dyn FormStepDefinition>>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::EmptyDefinition);
        }
        let definition_hash = definition_hash(&steps);
        Ok(Self { steps, definition_hash })
    }

    /// Wizard de emisión de certificados de tres pasos.
    pub fn certificate() -> Self {
        let steps: Vec<Box<dyn FormStepDefinition>> =
            vec![Box::new(CertificateDetailsStep::new()), Box::new(RecipientValidityStep::new()), Box::new(ReviewStep::new())];
        let definition_hash = definition_hash(&steps);
        Self { steps, definition_hash }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Paso por índice 1-based.
    pub fn step(&self, index: usize) -> Option<&dyn FormStepDefinition> {
        index.checked_sub(1).and_then(|i| self.steps.get(i)).map(|s| s.as_ref())
    }
}

/// Hash sobre versión + ids y nombres de campo de cada paso.
fn definition_hash(steps: &[Box<dyn FormStepDefinition>]) -> String {
    let shape: Vec<serde_json::Value> = steps.iter()
                                             .map(|s| {
                                                 let fields: Vec<&str> = s.fields().iter().map(|f| f.name.as_str()).collect();
                                                 json!({ "id": s.id(), "fields": fields })
                                             })
                                             .collect();
    hash_value(&json!({ "version": WIZARD_VERSION, "steps": shape }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_definition_is_rejected() {
        assert!(matches!(WizardDefinition::new(Vec::new()), Err(WizardError::EmptyDefinition)));
    }

    #[test]
    fn certificate_wizard_has_three_steps_and_stable_hash() {
        let a = WizardDefinition::certificate();
        let b = WizardDefinition::certificate();
        assert_eq!(a.len(), 3);
        assert_eq!(a.definition_hash, b.definition_hash);
        assert_eq!(a.step(1).map(|s| s.id()), Some("details"));
        assert_eq!(a.step(3).map(|s| s.id()), Some("review"));
        assert!(a.step(0).is_none());
        assert!(a.step(4).is_none());
    }
}
