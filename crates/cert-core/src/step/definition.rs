use crate::form::{validate_fields, FieldSpec, FormErrors, FormRecord};

/// Trait que define un paso del wizard. La validación debe ser pura respecto
/// al registro recibido.
pub trait FormStepDefinition: Send + Sync {
    /// Identificador estable y único dentro del wizard.
    fn id(&self) -> &str;

    /// Título visible del paso.
    fn title(&self) -> &str;

    fn description(&self) -> &str { "" }

    /// Campos del paso, en orden de presentación.
    fn fields(&self) -> &[FieldSpec];

    /// Registro inicial del paso.
    fn initial_record(&self) -> FormRecord { FormRecord::from_fields(self.fields()) }

    /// Reglas por campo. Los pasos con reglas entre campos sobreescriben este
    /// método y combinan `validate_fields` con sus comprobaciones.
    fn validate(&self, record: &FormRecord) -> FormErrors { validate_fields(self.fields(), record) }
}
