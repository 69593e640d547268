pub mod admin;
pub mod certificate;

pub use admin::{AdminAccount, LoginRequest, LoginResponse, NewAdminRequest};
pub use certificate::{CertificateInput, CertificateRecord, FormField, SearchField, SearchQuery};
