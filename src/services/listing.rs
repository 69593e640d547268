use tracing::info;

use crate::models::CertificateRecord;

pub const PAGE_SIZE: usize = 10;

/// Asks the operator to approve an irreversible action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub fn delete_prompt(student_name: &str) -> String {
    format!("Are you sure you want to delete the certificate for {}?", student_name)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ListView<'a> {
    Empty,
    Page {
        number: usize,
        total_pages: usize,
        total_records: usize,
        /// Position of the first row in the whole collection, 0-based.
        offset: usize,
        rows: &'a [CertificateRecord],
    },
}

/// Read-only paginated projection over a certificate collection.
#[derive(Debug, Clone, Copy)]
pub struct CertificateList<'a> {
    records: &'a [CertificateRecord],
}

impl<'a> CertificateList<'a> {
    pub fn new(records: &'a [CertificateRecord]) -> Self {
        Self { records }
    }

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.records.len().div_ceil(PAGE_SIZE)
    }

    /// Records on 1-based page `number`; empty when out of range.
    pub fn page(&self, number: usize) -> &'a [CertificateRecord] {
        if number == 0 {
            return &[];
        }
        let start = (number - 1).saturating_mul(PAGE_SIZE);
        if start >= self.records.len() {
            return &[];
        }
        let end = (start + PAGE_SIZE).min(self.records.len());
        &self.records[start..end]
    }

    /// Page `number` clamped into range, or the empty state.
    pub fn view(&self, number: usize) -> ListView<'a> {
        if self.is_empty() {
            return ListView::Empty;
        }
        let total_pages = self.page_count();
        let number = number.clamp(1, total_pages);
        ListView::Page {
            number,
            total_pages,
            total_records: self.records.len(),
            offset: (number - 1) * PAGE_SIZE,
            rows: self.page(number),
        }
    }

    /// Full record for the edit action. Does not touch the collection.
    pub fn edit(&self, id: &str) -> Option<CertificateRecord> {
        self.records.iter().find(|record| record.id == id).cloned()
    }

    /// Returns the id to delete once the operator confirms, naming the
    /// student in the prompt.
    pub fn request_delete(&self, id: &str, confirmer: &dyn Confirm) -> Option<String> {
        let record = self.records.iter().find(|record| record.id == id)?;
        if confirmer.confirm(&delete_prompt(&record.student_name)) {
            Some(record.id.clone())
        } else {
            info!("delete of certificate {} cancelled", record.id);
            None
        }
    }
}
