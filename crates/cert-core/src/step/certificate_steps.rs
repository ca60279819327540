//! Pasos concretos del wizard de emisión de certificados.
//!
//! 1. Datos del certificado (nombre, tipo, descripción, plantilla).
//! 2. Destinatario y vigencia (nombre, email, fechas, ID opcional).
//! 3. Revisión y confirmación.
use crate::form::{parse_date, validate_fields, FieldKind, FieldSpec, FormErrors, FormRecord, Rule};

use super::definition::FormStepDefinition;

pub mod fields {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const DESCRIPTION: &str = "description";
    pub const TEMPLATE: &str = "template";
    pub const RECIPIENT_NAME: &str = "recipient_name";
    pub const RECIPIENT_EMAIL: &str = "recipient_email";
    pub const ISSUE_DATE: &str = "issue_date";
    pub const EXPIRY_DATE: &str = "expiry_date";
    pub const CERTIFICATE_ID: &str = "certificate_id";
    pub const CONFIRMED: &str = "confirmed";
}

pub const CERTIFICATE_TYPES: &[&str] = &["quality", "compliance", "achievement"];
pub const TEMPLATES: &[&str] = &["standard", "premium", "custom"];

fn owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|o| o.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct CertificateDetailsStep {
    fields: Vec<FieldSpec>,
}

impl CertificateDetailsStep {
    pub fn new() -> Self {
        let fields = vec![
            FieldSpec::new(fields::NAME, "Certificate Name", FieldKind::Text)
                .with_placeholder("e.g. ISO 9001 Quality Management")
                .rule(Rule::required("Certificate name is required"))
                .rule(Rule::min_length(3, "Certificate name must be at least 3 characters")),
            FieldSpec::new(fields::TYPE, "Certificate Type", FieldKind::Select(owned(CERTIFICATE_TYPES)))
                .rule(Rule::selected("Please select a certificate type"))
                .rule(Rule::one_of(CERTIFICATE_TYPES, "Please select a valid certificate type")),
            FieldSpec::new(fields::DESCRIPTION, "Description", FieldKind::TextArea)
                .with_placeholder("Describe what this certificate represents...")
                .rule(Rule::required("Description is required"))
                .rule(Rule::min_length(10, "Description must be at least 10 characters")),
            FieldSpec::new(fields::TEMPLATE, "Certificate Template", FieldKind::Radio(owned(TEMPLATES)))
                .with_default("standard")
                .rule(Rule::one_of(TEMPLATES, "Please select a valid template")),
        ];
        Self { fields }
    }
}

impl Default for CertificateDetailsStep {
    fn default() -> Self { Self::new() }
}

impl FormStepDefinition for CertificateDetailsStep {
    fn id(&self) -> &str { "details" }
    fn title(&self) -> &str { "Certificate Details" }
    fn description(&self) -> &str { "Enter the basic certificate information" }
    fn fields(&self) -> &[FieldSpec] { &self.fields }
}

#[derive(Debug, Clone)]
pub struct RecipientValidityStep {
    fields: Vec<FieldSpec>,
}

impl RecipientValidityStep {
    pub fn new() -> Self {
        let fields = vec![
            FieldSpec::new(fields::RECIPIENT_NAME, "Recipient Name", FieldKind::Text)
                .with_placeholder("e.g Acme Corporation")
                .rule(Rule::required("Recipient name is required")),
            FieldSpec::new(fields::RECIPIENT_EMAIL, "Recipient Email", FieldKind::Email)
                .with_placeholder("e.g contact@acmecorp.com")
                .rule(Rule::required("Recipient email is required"))
                .rule(Rule::email("Please enter a valid email address")),
            FieldSpec::new(fields::ISSUE_DATE, "Issue Date", FieldKind::Date)
                .rule(Rule::required("Issue date is required"))
                .rule(Rule::date("Issue date must be a valid date (YYYY-MM-DD)")),
            FieldSpec::new(fields::EXPIRY_DATE, "Expiry Date", FieldKind::Date)
                .rule(Rule::required("Expiry date is required"))
                .rule(Rule::date("Expiry date must be a valid date (YYYY-MM-DD)")),
            FieldSpec::new(fields::CERTIFICATE_ID, "Certificate ID (Optional)", FieldKind::Text)
                .with_placeholder("Leave blank to autogenerate"),
        ];
        Self { fields }
    }
}

impl Default for RecipientValidityStep {
    fn default() -> Self { Self::new() }
}

impl FormStepDefinition for RecipientValidityStep {
    fn id(&self) -> &str { "recipient" }
    fn title(&self) -> &str { "Recipient & Validity" }
    fn description(&self) -> &str { "Add recipient and validity details" }
    fn fields(&self) -> &[FieldSpec] { &self.fields }

    fn validate(&self, record: &FormRecord) -> FormErrors {
        let mut errors = validate_fields(&self.fields, record);
        // sólo se compara cuando ambas fechas ya son válidas por sí mismas
        if let (Some(issue), Some(expiry)) = (parse_date(record.value(fields::ISSUE_DATE)),
                                              parse_date(record.value(fields::EXPIRY_DATE)))
        {
            if expiry <= issue {
                errors.insert_if_absent(fields::EXPIRY_DATE, "Expiry date must be after the issue date");
            }
        }
        errors
    }
}

#[derive(Debug, Clone)]
pub struct ReviewStep {
    fields: Vec<FieldSpec>,
}

impl ReviewStep {
    pub fn new() -> Self {
        let fields = vec![FieldSpec::new(fields::CONFIRMED, "I confirm the certificate details are correct", FieldKind::Checkbox)
                              .with_default("false")
                              .rule(Rule::checked("Please confirm the certificate details before issuing"))];
        Self { fields }
    }
}

impl Default for ReviewStep {
    fn default() -> Self { Self::new() }
}

impl FormStepDefinition for ReviewStep {
    fn id(&self) -> &str { "review" }
    fn title(&self) -> &str { "Review & Issue" }
    fn description(&self) -> &str { "Review the certificate before issuing it" }
    fn fields(&self) -> &[FieldSpec] { &self.fields }
}
