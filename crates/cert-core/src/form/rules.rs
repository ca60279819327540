//! Reglas de validación por campo.
//!
//! Cada campo declara una lista ordenada de reglas; la primera que falla
//! aporta el mensaje del campo (equivale a una cadena `if / else if`). Las
//! reglas de formato (`MinLength`, `Email`, `Date`, `OneOf`) se omiten cuando
//! el valor está vacío: la obligatoriedad la expresa `Required` / `Selected`.
use chrono::NaiveDate;

/// Formato de fecha aceptado por los campos de tipo fecha.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Valor no vacío tras `trim`.
    Required { message: String },
    /// Longitud mínima (en caracteres) del valor recortado.
    MinLength { min: usize, message: String },
    /// Selección obligatoria: el valor crudo no puede estar vacío.
    Selected { message: String },
    /// El valor debe ser una de las opciones declaradas.
    OneOf { options: Vec<String>, message: String },
    Email { message: String },
    /// Fecha `YYYY-MM-DD`.
    Date { message: String },
    /// Casilla marcada (`"true"`).
    Checked { message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required { message: message.into() }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength { min, message: message.into() }
    }

    pub fn selected(message: impl Into<String>) -> Self {
        Self::Selected { message: message.into() }
    }

    pub fn one_of(options: &[&str], message: impl Into<String>) -> Self {
        Self::OneOf { options: options.iter().map(|o| o.to_string()).collect(),
                      message: message.into() }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::Email { message: message.into() }
    }

    pub fn date(message: impl Into<String>) -> Self {
        Self::Date { message: message.into() }
    }

    pub fn checked(message: impl Into<String>) -> Self {
        Self::Checked { message: message.into() }
    }

    /// Devuelve el mensaje de error si la regla no se cumple.
    pub fn check(&self, value: &str) -> Option<&str> {
        let trimmed = value.trim();
        let ok = match self {
            Rule::Required { .. } => !trimmed.is_empty(),
            Rule::MinLength { min, .. } => trimmed.is_empty() || trimmed.chars().count() >= *min,
            Rule::Selected { .. } => !value.is_empty(),
            Rule::OneOf { options, .. } => value.is_empty() || options.iter().any(|o| o == value),
            Rule::Email { .. } => trimmed.is_empty() || is_valid_email(trimmed),
            Rule::Date { .. } => trimmed.is_empty() || parse_date(trimmed).is_some(),
            Rule::Checked { .. } => value == "true",
        };
        if ok { None } else { Some(self.message()) }
    }

    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::Selected { message }
            | Rule::OneOf { message, .. }
            | Rule::Email { message }
            | Rule::Date { message }
            | Rule::Checked { message } => message,
        }
    }
}

/// Parsea una fecha `YYYY-MM-DD`; `None` si no es válida.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_whitespace() {
        let r = Rule::required("req");
        assert_eq!(r.check("   "), Some("req"));
        assert_eq!(r.check(" a "), None);
    }

    #[test]
    fn min_length_counts_trimmed_chars() {
        let r = Rule::min_length(3, "short");
        assert_eq!(r.check("ab"), Some("short"));
        assert_eq!(r.check("  ab  "), Some("short"));
        assert_eq!(r.check("abc"), None);
        // tres caracteres multibyte siguen siendo tres
        assert_eq!(r.check("ñóé"), None);
        assert_eq!(r.check(""), None);
    }

    #[test]
    fn selected_does_not_trim() {
        let r = Rule::selected("pick");
        assert_eq!(r.check(""), Some("pick"));
        assert_eq!(r.check(" "), None);
    }

    #[test]
    fn email_shapes() {
        let r = Rule::email("bad");
        assert_eq!(r.check("contact@acmecorp.com"), None);
        assert_eq!(r.check("contact@acmecorp"), Some("bad"));
        assert_eq!(r.check("@acmecorp.com"), Some("bad"));
        assert_eq!(r.check("a b@acme.com"), Some("bad"));
        assert_eq!(r.check("a@@acme.com"), Some("bad"));
        assert_eq!(r.check("a@acme..com"), Some("bad"));
    }

    #[test]
    fn date_format() {
        let r = Rule::date("bad date");
        assert_eq!(r.check("2024-12-14"), None);
        assert_eq!(r.check("14/12/2024"), Some("bad date"));
        assert_eq!(r.check("2024-02-30"), Some("bad date"));
    }

    #[test]
    fn checked_requires_literal_true() {
        let r = Rule::checked("confirm");
        assert_eq!(r.check("true"), None);
        assert_eq!(r.check("yes"), Some("confirm"));
        assert_eq!(r.check(""), Some("confirm"));
    }
}
