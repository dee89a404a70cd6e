//! # Presensi Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the remote API, the credential
//!   store, the session event sink and the offline draft store
//! - Session lifecycle and field-duty sync services
//!
//! ## Architecture Principles
//! - Only depends on `presensi-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod api;
pub mod field_duty;
pub mod session;

// Re-export specific items to avoid ambiguity
pub use api::ports::AttendanceApi;
pub use field_duty::ports::FieldDutyDraftRepository;
pub use field_duty::service::{FieldDutySyncService, SubmissionOutcome, SyncReport};
pub use session::ports::{CredentialStore, SessionEventSink};
pub use session::service::SessionService;
