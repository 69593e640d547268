#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use certdesk::config::AppConfig;
use certdesk::models::{CertificateInput, CertificateRecord, SearchQuery};
use certdesk::remote::HttpCertificateService;
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@tallyexpert.com";
pub const ADMIN_PASSWORD: &str = "Tallyexpert@2025";

#[derive(Default)]
pub struct Registry {
    pub certificates: Vec<CertificateRecord>,
    pub tokens: HashSet<String>,
    pub create_calls: usize,
    pub delete_calls: usize,
    pub listing_broken: bool,
}

type Shared = Arc<Mutex<Registry>>;

/// In-process stand-in for the remote certificate service.
pub struct FakeService {
    pub base_url: String,
    registry: Shared,
    handle: JoinHandle<()>,
}

impl FakeService {
    pub async fn start() -> Self {
        let registry: Shared = Arc::new(Mutex::new(Registry::default()));
        let api = Router::new()
            .route("/admin/loginAdmin", post(login))
            .route("/admin/createAdmin", post(create_admin))
            .route("/certificate/create", post(create_certificate))
            .route("/certificate/getAll", get(list_certificates))
            .route("/certificate/getOne", get(find_certificate))
            .route("/certificate/delete/{id}", delete(delete_certificate))
            .with_state(registry.clone());
        let app = Router::new().nest("/api", api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake service");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake service crashed");
        });

        Self {
            base_url: format!("http://{}/api", addr),
            registry,
            handle,
        }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::for_api(&self.base_url)
    }

    pub fn client(&self) -> HttpCertificateService {
        HttpCertificateService::new(&self.config()).expect("Failed to build client")
    }

    /// Adds a record directly, as if another admin had created it.
    pub fn seed(&self, input: CertificateInput) -> CertificateRecord {
        let record = to_record(input);
        self.registry.lock().unwrap().certificates.push(record.clone());
        record
    }

    /// Invalidates every issued token, like an expired session.
    pub fn revoke_tokens(&self) {
        self.registry.lock().unwrap().tokens.clear();
    }

    /// Makes `getAll` answer 500 until further notice.
    pub fn break_listing(&self) {
        self.registry.lock().unwrap().listing_broken = true;
    }

    pub fn create_calls(&self) -> usize {
        self.registry.lock().unwrap().create_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.registry.lock().unwrap().delete_calls
    }

    pub fn stored(&self) -> Vec<CertificateRecord> {
        self.registry.lock().unwrap().certificates.clone()
    }
}

impl Drop for FakeService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn sample_input(n: usize) -> CertificateInput {
    CertificateInput {
        student_name: format!("Student {n}"),
        father_name: format!("Father {n}"),
        date_of_birth: "2001-04-12".to_string(),
        certificate_number: format!("TEC2025{n:03}"),
        roll_no: format!("R-{n}"),
        passing_year: "2025".to_string(),
        course_of_duration: "6 Months".to_string(),
        course_name: "Tally Prime".to_string(),
    }
}

fn to_record(input: CertificateInput) -> CertificateRecord {
    CertificateRecord {
        id: Uuid::new_v4().simple().to_string(),
        student_name: input.student_name,
        father_name: input.father_name,
        date_of_birth: format!("{}T00:00:00.000Z", input.date_of_birth),
        certificate_number: input.certificate_number,
        roll_no: input.roll_no,
        passing_year: input.passing_year,
        course_of_duration: input.course_of_duration,
        course_name: input.course_name,
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

fn reply(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn authorized(registry: &Shared, headers: &HeaderMap) -> bool {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| registry.lock().unwrap().tokens.contains(token))
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn login(State(registry): State<Shared>, Json(body): Json<Credentials>) -> Response {
    if body.email != ADMIN_EMAIL || body.password != ADMIN_PASSWORD {
        return reply(StatusCode::BAD_REQUEST, "Invalid email or password");
    }
    let token = format!("token-{}", Uuid::new_v4());
    registry.lock().unwrap().tokens.insert(token.clone());
    Json(json!({ "token": token, "message": "Login successful" })).into_response()
}

#[derive(Deserialize)]
struct NewAdmin {
    name: String,
    email: String,
    role: String,
}

async fn create_admin(
    State(registry): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<NewAdmin>,
) -> Response {
    if !authorized(&registry, &headers) {
        return reply(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let admin = json!({
        "_id": Uuid::new_v4().simple().to_string(),
        "name": body.name,
        "email": body.email,
        "role": body.role,
    });
    (StatusCode::CREATED, Json(json!({ "admin": admin }))).into_response()
}

async fn create_certificate(
    State(registry): State<Shared>,
    headers: HeaderMap,
    Json(input): Json<CertificateInput>,
) -> Response {
    if !authorized(&registry, &headers) {
        return reply(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let mut guard = registry.lock().unwrap();
    guard.create_calls += 1;
    if guard
        .certificates
        .iter()
        .any(|record| record.certificate_number == input.certificate_number)
    {
        return reply(StatusCode::BAD_REQUEST, "Certificate number already exists");
    }
    let record = to_record(input);
    guard.certificates.push(record.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Certificate created", "certificate": record })),
    )
        .into_response()
}

async fn list_certificates(State(registry): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&registry, &headers) {
        return reply(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let guard = registry.lock().unwrap();
    if guard.listing_broken {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let certificates = guard.certificates.clone();
    Json(json!({ "certificates": certificates })).into_response()
}

async fn find_certificate(State(registry): State<Shared>, Query(query): Query<SearchQuery>) -> Response {
    let guard = registry.lock().unwrap();
    let found = guard.certificates.iter().find(|record| {
        record.student_name == query.student_name
            && record.father_name == query.father_name
            && record.date_of_birth.starts_with(&query.date_of_birth)
            && record.certificate_number == query.certificate_number
    });
    match found {
        Some(record) => Json(json!({ "certificate": record })).into_response(),
        None => reply(StatusCode::NOT_FOUND, "Certificate not found"),
    }
}

async fn delete_certificate(
    State(registry): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !authorized(&registry, &headers) {
        return reply(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let mut guard = registry.lock().unwrap();
    guard.delete_calls += 1;
    let before = guard.certificates.len();
    guard.certificates.retain(|record| record.id != id);
    if guard.certificates.len() == before {
        return reply(StatusCode::NOT_FOUND, "Certificate not found");
    }
    Json(json!({ "message": "Certificate deleted successfully" })).into_response()
}
