//! Field-duty staging and sync service
//!
//! Every submission is written to the local draft store before any network
//! traffic. A draft is deleted only after the server confirmed the upload, so
//! a crash or connectivity loss in between leaves it recoverable.
//!
//! Sync passes are serialized: a second caller waits for the running pass and
//! then re-reads the queue, so a draft is never uploaded twice concurrently.

use std::sync::Arc;

use presensi_domain::{DraftId, FieldDuty, FieldDutyDraft, PresensiError, Result};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::ports::FieldDutyDraftRepository;
use crate::api::ports::AttendanceApi;

/// Outcome of [`FieldDutySyncService::stage_and_submit`]
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// Server accepted the upload; the local draft was removed.
    Submitted(FieldDuty),
    /// Upload failed; the draft stays queued under `id`.
    Pending { id: DraftId, error: PresensiError },
}

/// Summary of one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Drafts confirmed by the server and removed locally
    pub submitted: usize,
    /// Drafts whose upload failed (draft id, error)
    pub failed: Vec<(DraftId, String)>,
    /// Drafts still queued after the pass
    pub remaining: usize,
    /// Pass stopped early because the session expired
    pub aborted: bool,
}

/// Offline-first field-duty submission service
pub struct FieldDutySyncService {
    api: Arc<dyn AttendanceApi>,
    drafts: Arc<dyn FieldDutyDraftRepository>,
    pass_lock: Mutex<()>,
}

impl FieldDutySyncService {
    /// Create a new sync service
    pub fn new(api: Arc<dyn AttendanceApi>, drafts: Arc<dyn FieldDutyDraftRepository>) -> Self {
        Self { api, drafts, pass_lock: Mutex::new(()) }
    }

    /// Stage a draft locally without contacting the server.
    ///
    /// # Errors
    ///
    /// `PresensiError::Conflict` if an identical draft is already queued.
    pub async fn stage(&self, draft: &FieldDutyDraft) -> Result<DraftId> {
        self.drafts.create(draft).await
    }

    /// Stage a draft, then try to upload it once.
    ///
    /// # Errors
    ///
    /// Staging errors (including `Conflict`) are returned. Every upload
    /// failure, `SessionExpired` included, yields
    /// [`SubmissionOutcome::Pending`] with the draft left queued.
    #[instrument(skip(self, draft), fields(destination = %draft.destination))]
    pub async fn stage_and_submit(&self, draft: &FieldDutyDraft) -> Result<SubmissionOutcome> {
        // Held from staging on: a concurrent pass must not see the draft
        // before this upload settles.
        let _guard = self.pass_lock.lock().await;

        let id = self.drafts.create(draft).await?;
        debug!(draft_id = %id, "draft staged");

        match self.submit_one(id, draft).await {
            Ok(remote) => Ok(SubmissionOutcome::Submitted(remote)),
            Err(error) => {
                warn!(
                    draft_id = %id,
                    error = %error,
                    error_type = error.label(),
                    "upload failed, draft kept for sync"
                );
                Ok(SubmissionOutcome::Pending { id, error })
            }
        }
    }

    /// Upload every queued draft in insertion order.
    ///
    /// Failed uploads stay queued and are reported; a `SessionExpired`
    /// failure stops the pass since every later upload would be rejected too.
    /// No upload is retried within a pass.
    ///
    /// # Errors
    ///
    /// Only draft-store errors abort with `Err`.
    #[instrument(skip(self))]
    pub async fn sync_pending(&self) -> Result<SyncReport> {
        let _guard = self.pass_lock.lock().await;

        let queued = self.drafts.list().await?;
        let mut report = SyncReport::default();

        for staged in queued {
            match self.submit_one(staged.id, &staged.draft).await {
                Ok(_) => report.submitted += 1,
                Err(PresensiError::SessionExpired(message)) => {
                    warn!(draft_id = %staged.id, %message, "session expired, sync pass aborted");
                    report.failed.push((staged.id, message));
                    report.aborted = true;
                    break;
                }
                Err(err) => {
                    warn!(draft_id = %staged.id, error = %err, error_type = err.label(), "draft upload failed");
                    report.failed.push((staged.id, err.to_string()));
                }
            }
        }

        report.remaining = self.drafts.count().await?;
        info!(
            submitted = report.submitted,
            failed = report.failed.len(),
            remaining = report.remaining,
            aborted = report.aborted,
            "field-duty sync pass finished"
        );
        Ok(report)
    }

    /// Drop a draft the user no longer wants to submit. Unknown ids are a
    /// no-op.
    pub async fn discard(&self, id: DraftId) -> Result<bool> {
        self.drafts.delete(id).await
    }

    /// Drafts waiting for upload, oldest first
    pub async fn pending(&self) -> Result<Vec<presensi_domain::StagedFieldDuty>> {
        self.drafts.list().await
    }

    async fn submit_one(&self, id: DraftId, draft: &FieldDutyDraft) -> Result<FieldDuty> {
        let remote = self.api.create_field_duty(&draft.form(), &draft.photo_path()).await?;
        // Only a confirmed remote write releases the local copy.
        match self.drafts.delete(id).await {
            Ok(_) => debug!(draft_id = %id, remote_id = remote.id, "draft submitted"),
            Err(err) => warn!(
                draft_id = %id,
                remote_id = remote.id,
                error = %err,
                "upload confirmed but local draft not removed"
            ),
        }
        Ok(remote)
    }
}
