use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppError, ValidationError};
use crate::models::{CertificateRecord, SearchField, SearchQuery};
use crate::remote::CertificateService;

pub const NOT_FOUND_FALLBACK: &str = "Please check your details and try again";

pub const NOT_FOUND_GUIDANCE: [&str; 3] = [
    "Certificate number is entered accurately",
    "Certificate number format is correct",
    "Certificate exists in our database",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Authentic(CertificateRecord),
    NotFound { message: String },
}

/// Public certificate lookup. Needs no admin session.
pub struct VerificationFlow {
    service: Arc<dyn CertificateService>,
    query: SearchQuery,
    outcome: Option<VerificationOutcome>,
}

impl VerificationFlow {
    pub fn new(service: Arc<dyn CertificateService>) -> Self {
        Self {
            service,
            query: SearchQuery::default(),
            outcome: None,
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn outcome(&self) -> Option<&VerificationOutcome> {
        self.outcome.as_ref()
    }

    /// Any edit drops the previous result so it is never shown next to
    /// changed inputs.
    pub fn set(&mut self, field: SearchField, value: impl Into<String>) {
        self.query.set(field, value);
        self.outcome = None;
    }

    pub async fn search(&mut self) -> Result<&VerificationOutcome, AppError> {
        self.outcome = None;

        let mut query = SearchQuery::default();
        let mut missing = Vec::new();
        for field in SearchField::ALL {
            let value = self.query.get(field).trim();
            if value.is_empty() {
                missing.push(field);
            }
            query.set(field, value);
        }
        if !missing.is_empty() {
            return Err(ValidationError::MissingSearchFields(missing).into());
        }

        let outcome = match self.service.find_certificate(&query).await {
            Ok(record) => {
                info!("certificate {} verified", record.certificate_number);
                VerificationOutcome::Authentic(record)
            }
            Err(err) => {
                warn!("certificate lookup failed: {}", err);
                VerificationOutcome::NotFound {
                    message: err.user_message(NOT_FOUND_FALLBACK),
                }
            }
        };

        let outcome = self.outcome.insert(outcome);
        Ok(&*outcome)
    }
}
