use reqwest::StatusCode;
use thiserror::Error;

use crate::models::{FormField, SearchField};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unauthorized: session expired or token invalid")]
    Unauthorized,

    #[error("Service error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Service {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode service response: {0}")]
    Decode(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("There are no certificates to export")]
    NothingToExport,

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Message to show a user: the service's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Service { message: Some(msg), .. } if !msg.trim().is_empty() => msg.clone(),
            AppError::Validation(e) => e.to_string(),
            AppError::NotLoggedIn | AppError::NothingToExport | AppError::NotFound(_) => {
                self.to_string()
            }
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", join_labels(.0.iter().map(|f| f.label())))]
    MissingFields(Vec<FormField>),

    #[error("missing search fields: {}", join_labels(.0.iter().map(|f| f.label())))]
    MissingSearchFields(Vec<SearchField>),

    #[error("invalid date of birth '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

fn join_labels(labels: impl Iterator<Item = &'static str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_service_message() {
        let err = AppError::Service {
            status: StatusCode::CONFLICT,
            message: Some("Certificate number already exists".to_string()),
        };
        assert_eq!(err.user_message("Failed"), "Certificate number already exists");
    }

    #[test]
    fn user_message_falls_back_without_service_message() {
        let err = AppError::Service {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.user_message("Failed to load certificates"), "Failed to load certificates");
        assert_eq!(AppError::Unauthorized.user_message("Failed"), "Failed");
    }

    #[test]
    fn missing_fields_message_names_every_field() {
        let err = ValidationError::MissingFields(vec![FormField::StudentName, FormField::RollNo]);
        assert_eq!(err.to_string(), "missing required fields: Student Name, Roll Number");
    }
}
