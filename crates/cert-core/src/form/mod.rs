//! Modelo de formulario: campos, reglas, registro de valores y errores.

pub mod field;
pub mod record;
pub mod rules;

pub use field::{FieldKind, FieldSpec};
pub use record::{FormErrors, FormRecord};
pub use rules::{parse_date, Rule, DATE_FORMAT};

/// Valida un registro contra una lista de campos. El resultado se recalcula
/// completo: no hay fusión parcial con errores previos.
pub fn validate_fields(fields: &[FieldSpec], record: &FormRecord) -> FormErrors {
    let mut errors = FormErrors::new();
    for field in fields {
        if let Some(message) = field.check(record.value(&field.name)) {
            errors.insert(&field.name, message);
        }
    }
    errors
}
