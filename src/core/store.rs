use crate::domain::model::{CompanyRecord, LeadRecord, RecordKind};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Collections {
    leads: Vec<LeadRecord>,
    companies: Vec<CompanyRecord>,
}

/// Append-only, in-memory lead and company collections.
///
/// One mutex covers both collections. Every read and write holds it for the whole
/// call, so batches are appended atomically and snapshots are never torn.
#[derive(Debug, Default)]
pub struct RecordStore {
    inner: Mutex<Collections>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        // appends never panic halfway, so a poisoned guard still holds consistent data
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_many_leads(&self, leads: Vec<LeadRecord>) -> usize {
        let added = leads.len();
        self.lock().leads.extend(leads);
        tracing::debug!("Appended {} leads to store", added);
        added
    }

    pub fn add_many_companies(&self, companies: Vec<CompanyRecord>) -> usize {
        let added = companies.len();
        self.lock().companies.extend(companies);
        tracing::debug!("Appended {} companies to store", added);
        added
    }

    pub fn leads(&self) -> Vec<LeadRecord> {
        self.lock().leads.clone()
    }

    pub fn companies(&self) -> Vec<CompanyRecord> {
        self.lock().companies.clone()
    }

    pub fn count(&self, kind: RecordKind) -> usize {
        let collections = self.lock();
        match kind {
            RecordKind::Lead => collections.leads.len(),
            RecordKind::Company => collections.companies.len(),
        }
    }

    /// `(leads, companies)` read under a single acquisition.
    pub fn counts(&self) -> (usize, usize) {
        let collections = self.lock();
        (collections.leads.len(), collections.companies.len())
    }
}
