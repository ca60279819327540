use super::rules::Rule;

/// Tipo de control del campo. Sólo afecta a cómo un front (CLI/UI) lo
/// presenta; la validación la definen las reglas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Date,
    Select(Vec<String>),
    Radio(Vec<String>),
    Checkbox,
}

/// Declaración de un campo del formulario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    /// Valor inicial del registro (nunca nulo).
    pub default: String,
    pub placeholder: Option<String>,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self { name: name.to_string(),
               label: label.to_string(),
               kind,
               default: String::new(),
               placeholder: None,
               rules: Vec::new() }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = default.to_string();
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Primer mensaje de error de las reglas del campo, si lo hay.
    pub fn check(&self, value: &str) -> Option<String> {
        self.rules.iter().find_map(|r| r.check(value)).map(str::to_string)
    }

    /// Opciones válidas para selects y radios.
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Select(opts) | FieldKind::Radio(opts) => Some(opts),
            _ => None,
        }
    }
}
