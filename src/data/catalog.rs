//! Catálogo de certificados emitidos: persistido como arreglo JSON bajo
//! `issuedCertificates`, con búsqueda, filtro por estado y paginación.
use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use cert_core::constants::CATALOG_STORAGE_KEY;
use cert_core::storage::{get_json, set_json};
use cert_core::KeyValueStore;

use super::certificate::{Certificate, CertificateStatus};
use crate::errors::{CoreError, DomainError};

pub const DEFAULT_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub status: Option<CertificateStatus>,
    /// Página 1-based; 0 se trata como 1.
    pub page: usize,
    pub page_size: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self { search: None, status: None, page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub items: Vec<Certificate>,
    pub page: usize,
    pub page_count: usize,
    /// Certificados que pasan búsqueda y filtro.
    pub matching: usize,
    /// Total en el catálogo.
    pub total: usize,
}

impl CatalogPage {
    pub fn summary(&self) -> String {
        format!("showing {} out of {} certificates", self.items.len(), self.matching)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// Filtra y pagina. El estado de cada certificado se recalcula respecto de
/// `reference`; una página fuera de rango se ajusta a la última.
pub fn paginate(certificates: Vec<Certificate>, query: &CatalogQuery, reference: NaiveDate) -> CatalogPage {
    let total = certificates.len();
    let needle = query.search.as_deref().unwrap_or("");
    let matching: Vec<Certificate> = certificates.into_iter()
                                                 .map(|mut c| {
                                                     c.status = c.status_at(reference);
                                                     c
                                                 })
                                                 .filter(|c| c.matches(needle))
                                                 .filter(|c| query.status.map_or(true, |s| c.status == s))
                                                 .collect();
    let page_size = query.page_size.max(1);
    let page_count = matching.len().div_ceil(page_size).max(1);
    let page = query.page.clamp(1, page_count);
    let items = matching.iter().skip((page - 1) * page_size).take(page_size).cloned().collect();
    CatalogPage { items, page, page_count, matching: matching.len(), total }
}

pub struct CertificateCatalog {
    store: Arc<dyn KeyValueStore>,
}

impl CertificateCatalog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Vec<Certificate>, CoreError> {
        Ok(get_json::<Vec<Certificate>>(self.store.as_ref(), CATALOG_STORAGE_KEY)?.unwrap_or_default())
    }

    /// Agrega un certificado. Un ID ya emitido se rechaza.
    pub fn append(&self, certificate: Certificate) -> Result<(), CoreError> {
        let mut all = self.load()?;
        if all.iter().any(|c| c.id == certificate.id) {
            return Err(DomainError::Duplicate(certificate.id).into());
        }
        debug!("catalog: issuing {} ({} already stored)", certificate.id, all.len());
        all.push(certificate);
        set_json(self.store.as_ref(), CATALOG_STORAGE_KEY, &all)?;
        Ok(())
    }

    pub fn find(&self, id: &str) -> Result<Certificate, CoreError> {
        self.load()?
            .into_iter()
            .find(|c| c.id.eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| DomainError::NotFound(id.to_string()).into())
    }

    pub fn query(&self, query: &CatalogQuery, reference: NaiveDate) -> Result<CatalogPage, CoreError> {
        Ok(paginate(self.load()?, query, reference))
    }
}
