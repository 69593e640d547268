pub mod export;
pub mod form;
pub mod listing;
pub mod session;
pub mod token_store;
pub mod verify;

pub use export::{ExportArtifact, ExportSheet, build_sheet, export_filename, export_workbook};
pub use form::{CertificateForm, CertificateNumberGenerator};
pub use listing::{CertificateList, Confirm, ListView, PAGE_SIZE};
pub use session::{AdminSession, LoginOutcome, SessionState, SubmitOutcome};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use verify::{VerificationFlow, VerificationOutcome};
