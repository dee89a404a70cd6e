//! Port interface for the offline field-duty draft store

use async_trait::async_trait;
use presensi_domain::{DraftId, FieldDutyDraft, Result, StagedFieldDuty};

/// Durable local queue of field-duty drafts awaiting remote confirmation.
///
/// `(destination, description, address)` is unique across stored drafts.
#[async_trait]
pub trait FieldDutyDraftRepository: Send + Sync {
    /// Stage a new draft and return its surrogate id.
    ///
    /// Fails with `PresensiError::Conflict` if a draft with the same
    /// uniqueness triple exists; the existing draft is untouched.
    async fn create(&self, draft: &FieldDutyDraft) -> Result<DraftId>;

    /// Fetch one draft
    async fn get(&self, id: DraftId) -> Result<Option<StagedFieldDuty>>;

    /// All drafts in insertion order
    async fn list(&self) -> Result<Vec<StagedFieldDuty>>;

    /// Replace the fields of an existing draft.
    ///
    /// Fails with `PresensiError::NotFound` for an unknown id and
    /// `PresensiError::Conflict` if the new triple belongs to another draft.
    async fn update(&self, id: DraftId, draft: &FieldDutyDraft) -> Result<()>;

    /// Remove a draft. Unknown ids are a no-op; returns whether a row was
    /// removed.
    async fn delete(&self, id: DraftId) -> Result<bool>;

    /// Number of staged drafts
    async fn count(&self) -> Result<usize>;
}
