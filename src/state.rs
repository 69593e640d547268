use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::remote::{CertificateService, HttpCertificateService};
use crate::services::{AdminSession, CertificateNumberGenerator, FileTokenStore, TokenStore, VerificationFlow};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub service: Arc<dyn CertificateService>,
    pub tokens: Arc<dyn TokenStore>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let service = Arc::new(HttpCertificateService::new(&config)?);
        let tokens = Arc::new(FileTokenStore::new(config.token_file.clone()));
        Ok(Self {
            config,
            service,
            tokens,
        })
    }

    pub fn session(&self) -> AdminSession {
        AdminSession::new(self.service.clone(), self.tokens.clone())
    }

    pub fn verification(&self) -> VerificationFlow {
        VerificationFlow::new(self.service.clone())
    }

    pub fn number_generator(&self) -> CertificateNumberGenerator {
        CertificateNumberGenerator::new(self.config.cert_prefix.clone())
    }
}
