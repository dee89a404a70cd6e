//! Local SQLite storage for offline field-duty drafts

pub mod field_duty_draft_repository;
pub mod manager;

pub use field_duty_draft_repository::SqliteFieldDutyDraftRepository;
pub use manager::{DbManager, SqliteConnection};
