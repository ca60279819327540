//! Certificado emitido y su estado derivado de las fechas de vigencia.
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use cert_core::form::parse_date;
use cert_core::hashing::hash_value;
use cert_core::step::fields;
use cert_core::FormRecord;

use crate::errors::DomainError;

/// Formato de fecha usado al mostrar certificados en la tabla.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateStatus {
    Active,
    Pending,
    Expired,
}

impl CertificateStatus {
    /// Estado relativo a `reference`: pendiente antes de la emisión, vencido
    /// después de la expiración, activo en otro caso (ambos extremos incluidos).
    pub fn at(issue_date: NaiveDate, expiry_date: NaiveDate, reference: NaiveDate) -> Self {
        if reference < issue_date {
            Self::Pending
        } else if reference > expiry_date {
            Self::Expired
        } else {
            Self::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Expired => "Expired",
        }
    }

    /// Parseo sin distinción de mayúsculas (filtro de la CLI).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl std::fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub name: String,
    pub cert_type: String,
    pub description: String,
    pub template: String,
    pub recipient: String,
    pub recipient_email: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: CertificateStatus,
}

impl Certificate {
    /// Construye el certificado a partir de los registros de los tres pasos
    /// (detalles, destinatario, revisión). Si el ID opcional viene vacío se
    /// genera uno determinista.
    pub fn from_records(records: &[FormRecord], reference: NaiveDate) -> Result<Self, DomainError> {
        let (details, recipient) = match records {
            [details, recipient, ..] => (details, recipient),
            _ => return Err(DomainError::Validation(format!("expected at least 2 step records, got {}", records.len()))),
        };
        let issue_date = required_date(recipient, fields::ISSUE_DATE)?;
        let expiry_date = required_date(recipient, fields::EXPIRY_DATE)?;

        let explicit_id = recipient.value(fields::CERTIFICATE_ID).trim();
        let id = if explicit_id.is_empty() {
            generate_certificate_id(issue_date.year(), records)
        } else {
            explicit_id.to_string()
        };

        Ok(Self { id,
                  name: details.value(fields::NAME).trim().to_string(),
                  cert_type: details.value(fields::TYPE).to_string(),
                  description: details.value(fields::DESCRIPTION).trim().to_string(),
                  template: details.value(fields::TEMPLATE).to_string(),
                  recipient: recipient.value(fields::RECIPIENT_NAME).trim().to_string(),
                  recipient_email: recipient.value(fields::RECIPIENT_EMAIL).trim().to_string(),
                  issue_date,
                  expiry_date,
                  status: CertificateStatus::at(issue_date, expiry_date, reference) })
    }

    pub fn status_at(&self, reference: NaiveDate) -> CertificateStatus {
        CertificateStatus::at(self.issue_date, self.expiry_date, reference)
    }

    /// Coincidencia sin distinción de mayúsculas sobre id, nombre y destinatario.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.id, &self.name, &self.recipient].iter().any(|h| h.to_lowercase().contains(&needle))
    }
}

fn required_date(record: &FormRecord, field: &str) -> Result<NaiveDate, DomainError> {
    parse_date(record.value(field)).ok_or_else(|| DomainError::Validation(format!("{field} is not a valid date")))
}

/// `CERT-<año>-<8 hex>`: prefijo del sha256 del JSON canónico de los registros.
pub fn generate_certificate_id(year: i32, records: &[FormRecord]) -> String {
    let value = Value::Array(records.iter().map(FormRecord::to_json_value).collect());
    let digest = hash_value(&value);
    format!("CERT-{year}-{}", &digest[..8])
}
