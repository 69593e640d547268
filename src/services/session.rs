use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::AppError;
use crate::models::{AdminAccount, CertificateInput, CertificateRecord, LoginRequest, NewAdminRequest};
use crate::remote::{BearerToken, CertificateService};
use crate::services::token_store::TokenStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn {
        token: BearerToken,
        certificates: Vec<CertificateRecord>,
        editing: Option<CertificateRecord>,
    },
}

/// Result of a successful login. The initial load can still fail without
/// undoing the login.
#[derive(Debug)]
pub struct LoginOutcome {
    pub message: Option<String>,
    pub loaded: Result<usize, AppError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(CertificateRecord),
    /// The service has no update endpoint; the staged edit was dropped and
    /// the collection left alone.
    UpdateNotImplemented,
}

/// Owns the admin token, the loaded certificates and the edit selection.
/// Every authenticated call goes through [`AdminSession::authorized`] so a
/// rejected token always ends the session the same way.
pub struct AdminSession {
    service: Arc<dyn CertificateService>,
    tokens: Arc<dyn TokenStore>,
    state: SessionState,
}

impl AdminSession {
    pub fn new(service: Arc<dyn CertificateService>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            service,
            tokens,
            state: SessionState::LoggedOut,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    pub fn certificates(&self) -> &[CertificateRecord] {
        match &self.state {
            SessionState::LoggedIn { certificates, .. } => certificates,
            SessionState::LoggedOut => &[],
        }
    }

    pub fn editing(&self) -> Option<&CertificateRecord> {
        match &self.state {
            SessionState::LoggedIn { editing, .. } => editing.as_ref(),
            SessionState::LoggedOut => None,
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.service.login(&request).await?;
        let token = BearerToken::new(response.token);

        self.tokens.save(&token)?;
        self.state = SessionState::LoggedIn {
            token,
            certificates: Vec::new(),
            editing: None,
        };
        info!("admin {} logged in", request.email);

        let loaded = match self.reload().await {
            Ok(()) => Ok(self.certificates().len()),
            Err(e) => {
                warn!("initial certificate load failed: {}", e);
                Err(e)
            }
        };
        Ok(LoginOutcome {
            message: response.message,
            loaded,
        })
    }

    /// Picks up a token saved by an earlier run. Returns `false` when there
    /// is none.
    pub async fn resume(&mut self) -> Result<bool, AppError> {
        let Some(token) = self.tokens.load()? else {
            return Ok(false);
        };
        self.state = SessionState::LoggedIn {
            token,
            certificates: Vec::new(),
            editing: None,
        };
        self.reload().await?;
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<(), AppError> {
        self.state = SessionState::LoggedOut;
        self.tokens.clear()?;
        info!("admin logged out");
        Ok(())
    }

    pub async fn reload(&mut self) -> Result<(), AppError> {
        let token = self.token()?;
        let service = self.service.clone();
        let loaded = self
            .authorized(service.list_certificates(&token))
            .await?;

        info!("loaded {} certificates", loaded.len());
        if let SessionState::LoggedIn { certificates, .. } = &mut self.state {
            *certificates = loaded;
        }
        Ok(())
    }

    /// Appends the record the service echoes back, never the local input.
    pub async fn create(&mut self, input: &CertificateInput) -> Result<CertificateRecord, AppError> {
        let token = self.token()?;
        let service = self.service.clone();
        let record = self
            .authorized(service.create_certificate(&token, input))
            .await?;

        info!("certificate {} created for {}", record.id, record.student_name);
        if let SessionState::LoggedIn { certificates, .. } = &mut self.state {
            certificates.push(record.clone());
        }
        Ok(record)
    }

    /// Removes the record only after the service confirms the delete.
    pub async fn delete(&mut self, id: &str) -> Result<(), AppError> {
        let token = self.token()?;
        let service = self.service.clone();
        self.authorized(service.delete_certificate(&token, id))
            .await?;

        info!("certificate {} deleted", id);
        if let SessionState::LoggedIn { certificates, editing, .. } = &mut self.state {
            certificates.retain(|record| record.id != id);
            if editing.as_ref().is_some_and(|record| record.id == id) {
                *editing = None;
            }
        }
        Ok(())
    }

    pub fn begin_edit(&mut self, id: &str) -> Result<CertificateRecord, AppError> {
        match &mut self.state {
            SessionState::LoggedIn { certificates, editing, .. } => {
                let record = certificates
                    .iter()
                    .find(|record| record.id == id)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("certificate {}", id)))?;
                *editing = Some(record.clone());
                Ok(record)
            }
            SessionState::LoggedOut => Err(AppError::NotLoggedIn),
        }
    }

    pub fn cancel_edit(&mut self) {
        if let SessionState::LoggedIn { editing, .. } = &mut self.state {
            *editing = None;
        }
    }

    pub async fn submit(&mut self, input: &CertificateInput) -> Result<SubmitOutcome, AppError> {
        if !self.is_logged_in() {
            return Err(AppError::NotLoggedIn);
        }

        if let Some(id) = self.editing().map(|record| record.id.clone()) {
            warn!("update of certificate {} requested but not supported", id);
            self.cancel_edit();
            return Ok(SubmitOutcome::UpdateNotImplemented);
        }

        self.create(input).await.map(SubmitOutcome::Created)
    }

    pub async fn create_admin(&mut self, request: &NewAdminRequest) -> Result<AdminAccount, AppError> {
        let token = self.token()?;
        let service = self.service.clone();
        let admin = self
            .authorized(service.create_admin(Some(&token), request))
            .await?;
        info!("admin account {} created", admin.email);
        Ok(admin)
    }

    fn token(&self) -> Result<BearerToken, AppError> {
        match &self.state {
            SessionState::LoggedIn { token, .. } => Ok(token.clone()),
            SessionState::LoggedOut => Err(AppError::NotLoggedIn),
        }
    }

    /// Single decision point for rejected tokens: an unauthorized response
    /// drops the token, the collection and any staged edit.
    async fn authorized<T>(
        &mut self,
        call: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        match call.await {
            Err(AppError::Unauthorized) => {
                warn!("session rejected by service, logging out");
                self.state = SessionState::LoggedOut;
                if let Err(e) = self.tokens.clear() {
                    error!("failed to clear stored token: {}", e);
                }
                Err(AppError::Unauthorized)
            }
            other => other,
        }
    }
}
