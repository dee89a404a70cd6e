//! In-memory port implementations
//!
//! `MockAttendanceApi` only implements the calls the services use (login and
//! field-duty create); every other call fails loudly so an unexpected call
//! shows up as a test failure.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use presensi_core::{AttendanceApi, CredentialStore, FieldDutyDraftRepository};
use presensi_domain::{
    ChangePasswordRequest, CheckInRecord, CheckInRequest, CheckOutRequest, DeviceRegistration,
    DraftId, Employee, FieldDuty, FieldDutyDraft, FieldDutyForm, LeaveRecord, LoginRequest,
    LoginResponse, MessageResponse, MonitoredDevice, MonthlyRecap, PresensiError, Result,
    StagedFieldDuty, StatusResponse, TodayCheckIn,
};
use tokio::sync::Notify;

/// Credential store backed by a plain mutex.
#[derive(Default)]
pub struct MemoryCredentials {
    token: Mutex<Option<String>>,
}

impl MemoryCredentials {
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_string())) }
    }
}

impl CredentialStore for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token.lock().clone().filter(|t| !t.is_empty())
    }

    fn store(&self, token: String) {
        *self.token.lock() = Some(token);
    }

    fn clear(&self) -> bool {
        self.token.lock().take().is_some()
    }

    fn clear_if_current(&self, token: &str) -> bool {
        let mut guard = self.token.lock();
        if guard.as_deref() == Some(token) {
            *guard = None;
            true
        } else {
            false
        }
    }
}

/// Draft store keeping insertion order in a `Vec`.
#[derive(Default)]
pub struct MemoryDrafts {
    rows: Mutex<Vec<StagedFieldDuty>>,
    next_id: AtomicUsize,
    fail_deletes: AtomicBool,
    create_stall: Mutex<Option<Duration>>,
    created: Notify,
}

impl MemoryDrafts {
    /// Make every later `delete` fail with a database error.
    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    /// Make `create` pause for `delay` after the row is visible.
    pub fn stall_creates(&self, delay: Duration) {
        *self.create_stall.lock() = Some(delay);
    }

    /// Resolves once a `create` has inserted its row.
    pub async fn wait_for_create(&self) {
        self.created.notified().await;
    }
}

#[async_trait]
impl FieldDutyDraftRepository for MemoryDrafts {
    async fn create(&self, draft: &FieldDutyDraft) -> Result<DraftId> {
        let id = {
            let mut rows = self.rows.lock();
            if rows.iter().any(|row| row.draft.same_identity(draft)) {
                return Err(PresensiError::Conflict("duplicate field-duty draft".into()));
            }
            let id = DraftId(self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1);
            rows.push(StagedFieldDuty { id, draft: draft.clone() });
            id
        };
        self.created.notify_one();
        let stall = *self.create_stall.lock();
        if let Some(delay) = stall {
            tokio::time::sleep(delay).await;
        }
        Ok(id)
    }

    async fn get(&self, id: DraftId) -> Result<Option<StagedFieldDuty>> {
        Ok(self.rows.lock().iter().find(|row| row.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<StagedFieldDuty>> {
        Ok(self.rows.lock().clone())
    }

    async fn update(&self, id: DraftId, draft: &FieldDutyDraft) -> Result<()> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|row| row.id != id && row.draft.same_identity(draft)) {
            return Err(PresensiError::Conflict("duplicate field-duty draft".into()));
        }
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| PresensiError::NotFound(format!("draft {id}")))?;
        row.draft = draft.clone();
        Ok(())
    }

    async fn delete(&self, id: DraftId) -> Result<bool> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(PresensiError::Database("disk I/O error".into()));
        }
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.rows.lock().len())
    }
}

/// Scripted API: responses are popped in call order.
#[derive(Default)]
pub struct MockAttendanceApi {
    login_results: Mutex<VecDeque<Result<LoginResponse>>>,
    create_results: Mutex<VecDeque<Result<FieldDuty>>>,
    uploads: Mutex<Vec<(FieldDutyForm, PathBuf)>>,
}

impl MockAttendanceApi {
    pub fn push_login(&self, result: Result<LoginResponse>) {
        self.login_results.lock().push_back(result);
    }

    pub fn push_create(&self, result: Result<FieldDuty>) {
        self.create_results.lock().push_back(result);
    }

    /// Forms and photo paths passed to `create_field_duty`, in call order.
    pub fn uploads(&self) -> Vec<(FieldDutyForm, PathBuf)> {
        self.uploads.lock().clone()
    }
}

fn not_mocked(call: &str) -> PresensiError {
    PresensiError::Internal(format!("{call} not mocked"))
}

#[async_trait]
impl AttendanceApi for MockAttendanceApi {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse> {
        self.login_results.lock().pop_front().unwrap_or_else(|| Err(not_mocked("login")))
    }

    async fn fetch_employee(&self, _pin: &str) -> Result<Employee> {
        Err(not_mocked("fetch_employee"))
    }

    async fn fetch_checkin_history(&self, _pin: &str) -> Result<Vec<CheckInRecord>> {
        Err(not_mocked("fetch_checkin_history"))
    }

    async fn fetch_leave_records(&self, _employee_id: i64) -> Result<Vec<LeaveRecord>> {
        Err(not_mocked("fetch_leave_records"))
    }

    async fn fetch_monthly_recap(
        &self,
        _year: i32,
        _exclude_weekend: bool,
    ) -> Result<Vec<MonthlyRecap>> {
        Err(not_mocked("fetch_monthly_recap"))
    }

    async fn list_field_duties(&self) -> Result<Vec<FieldDuty>> {
        Err(not_mocked("list_field_duties"))
    }

    async fn create_field_duty(&self, form: &FieldDutyForm, photo: &Path) -> Result<FieldDuty> {
        self.uploads.lock().push((form.clone(), photo.to_path_buf()));
        self.create_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(not_mocked("create_field_duty")))
    }

    async fn update_field_duty(
        &self,
        _id: i64,
        _form: &FieldDutyForm,
        _photo: Option<&Path>,
    ) -> Result<FieldDuty> {
        Err(not_mocked("update_field_duty"))
    }

    async fn delete_field_duty(&self, _id: i64) -> Result<()> {
        Err(not_mocked("delete_field_duty"))
    }

    async fn check_in(&self, _device_id: &str, _request: &CheckInRequest) -> Result<CheckInRecord> {
        Err(not_mocked("check_in"))
    }

    async fn check_out(
        &self,
        _device_id: &str,
        _request: &CheckOutRequest,
    ) -> Result<CheckInRecord> {
        Err(not_mocked("check_out"))
    }

    async fn today_checkin(&self) -> Result<StatusResponse<TodayCheckIn>> {
        Err(not_mocked("today_checkin"))
    }

    async fn change_password(
        &self,
        _request: &ChangePasswordRequest,
    ) -> Result<StatusResponse<MessageResponse>> {
        Err(not_mocked("change_password"))
    }

    async fn monitor_devices(
        &self,
        _skpd_id: i64,
    ) -> Result<StatusResponse<Vec<MonitoredDevice>>> {
        Err(not_mocked("monitor_devices"))
    }

    async fn register_device(
        &self,
        _registration: &DeviceRegistration,
    ) -> Result<MessageResponse> {
        Err(not_mocked("register_device"))
    }
}

pub fn draft(destination: &str, description: &str, address: &str, image: &str) -> FieldDutyDraft {
    FieldDutyDraft {
        destination: destination.into(),
        description: description.into(),
        address: address.into(),
        latitude: "-1.1".into(),
        longitude: "140.2".into(),
        image_path: image.into(),
    }
}

pub fn remote(id: i64, draft: &FieldDutyDraft) -> FieldDuty {
    FieldDuty {
        id,
        tujuan: draft.destination.clone(),
        keterangan_tugas: draft.description.clone(),
        alamat: draft.address.clone(),
        latitude: Some(draft.latitude.clone()),
        longitude: Some(draft.longitude.clone()),
        foto: Some(format!("uploads/{id}.jpg")),
        status: None,
        created_at: None,
    }
}
