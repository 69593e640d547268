pub mod dto;

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{
    AdminAccount, CertificateInput, CertificateRecord, LoginRequest, LoginResponse,
    NewAdminRequest, SearchQuery,
};

/// Opaque credential returned by `loginAdmin`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

/// Contract of the remote certificate service. Calls that need an admin
/// session take the token explicitly; nothing here remembers one.
#[async_trait]
pub trait CertificateService: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError>;
    async fn create_admin(
        &self,
        token: Option<&BearerToken>,
        request: &NewAdminRequest,
    ) -> Result<AdminAccount, AppError>;
    async fn create_certificate(
        &self,
        token: &BearerToken,
        input: &CertificateInput,
    ) -> Result<CertificateRecord, AppError>;
    async fn list_certificates(&self, token: &BearerToken) -> Result<Vec<CertificateRecord>, AppError>;
    async fn find_certificate(&self, query: &SearchQuery) -> Result<CertificateRecord, AppError>;
    async fn delete_certificate(&self, token: &BearerToken, id: &str) -> Result<(), AppError>;
}

pub struct HttpCertificateService {
    client: Client,
    base_url: Url,
}

impl HttpCertificateService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| AppError::Config(format!("Invalid API url '{}': {}", config.api_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("API url '{}' cannot be a base", config.api_url)));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url, token: Option<&BearerToken>) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token.as_str())),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} {}", status, response.url());

        if status == StatusCode::UNAUTHORIZED {
            warn!("service rejected credentials: {}", response.url());
            return Err(AppError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<dto::ErrorBody>(&body)
                .ok()
                .and_then(dto::ErrorBody::into_message);
            warn!("service error {}: {}", status, body);
            return Err(AppError::Service { status, message });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("Failed to parse service response: {}", e);
            AppError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl CertificateService for HttpCertificateService {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let url = self.endpoint(&["admin", "loginAdmin"]);
        let response = self.send(self.request(Method::POST, url, None).json(request)).await?;
        Self::decode(response).await
    }

    async fn create_admin(
        &self,
        token: Option<&BearerToken>,
        request: &NewAdminRequest,
    ) -> Result<AdminAccount, AppError> {
        let url = self.endpoint(&["admin", "createAdmin"]);
        let response = self.send(self.request(Method::POST, url, token).json(request)).await?;
        let envelope: dto::AdminEnvelope = Self::decode(response).await?;
        Ok(envelope.into_inner())
    }

    async fn create_certificate(
        &self,
        token: &BearerToken,
        input: &CertificateInput,
    ) -> Result<CertificateRecord, AppError> {
        let url = self.endpoint(&["certificate", "create"]);
        let response = self
            .send(self.request(Method::POST, url, Some(token)).json(input))
            .await?;
        let envelope: dto::CertificateEnvelope = Self::decode(response).await?;
        Ok(envelope.certificate)
    }

    async fn list_certificates(&self, token: &BearerToken) -> Result<Vec<CertificateRecord>, AppError> {
        let url = self.endpoint(&["certificate", "getAll"]);
        let response = self.send(self.request(Method::GET, url, Some(token))).await?;
        let envelope: dto::CertificateListEnvelope = Self::decode(response).await?;
        Ok(envelope.certificates)
    }

    async fn find_certificate(&self, query: &SearchQuery) -> Result<CertificateRecord, AppError> {
        let mut url = self.endpoint(&["certificate", "getOne"]);
        url.query_pairs_mut().extend_pairs(query.params());
        let response = self.send(self.request(Method::GET, url, None)).await?;
        let envelope: dto::CertificateEnvelope = Self::decode(response).await?;
        Ok(envelope.certificate)
    }

    async fn delete_certificate(&self, token: &BearerToken, id: &str) -> Result<(), AppError> {
        let url = self.endpoint(&["certificate", "delete", id]);
        self.send(self.request(Method::DELETE, url, Some(token))).await?;
        Ok(())
    }
}
