use serde::Deserialize;

use crate::models::{AdminAccount, CertificateRecord};

#[derive(Debug, Deserialize)]
pub struct CertificateEnvelope {
    pub certificate: CertificateRecord,
}

#[derive(Debug, Deserialize)]
pub struct CertificateListEnvelope {
    #[serde(default)]
    pub certificates: Vec<CertificateRecord>,
}

/// `createAdmin` has been seen both bare and wrapped in `{ "admin": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AdminEnvelope {
    Wrapped { admin: AdminAccount },
    Bare(AdminAccount),
}

impl AdminEnvelope {
    pub fn into_inner(self) -> AdminAccount {
        match self {
            AdminEnvelope::Wrapped { admin } => admin,
            AdminEnvelope::Bare(admin) => admin,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|msg| !msg.trim().is_empty())
    }
}
