//! Port interface for the remote attendance API
//!
//! One method per remote operation. Implementations map each call directly
//! onto the authenticated gateway: no retries, no caching, no business
//! validation.

use std::path::Path;

use async_trait::async_trait;
use presensi_domain::{
    ChangePasswordRequest, CheckInRecord, CheckInRequest, CheckOutRequest, DeviceRegistration,
    Employee, FieldDuty, FieldDutyForm, LeaveRecord, LoginRequest, LoginResponse,
    MessageResponse, MonitoredDevice, MonthlyRecap, Result, StatusResponse, TodayCheckIn,
};

/// Typed contract of the attendance REST API
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    /// `POST /api/auth/login`. Rejected credentials surface as
    /// `PresensiError::Auth` and never invalidate the current session.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// `GET /api/pegawai/{pin}`
    async fn fetch_employee(&self, pin: &str) -> Result<Employee>;

    /// `GET /api/checkin/{pin}`
    async fn fetch_checkin_history(&self, pin: &str) -> Result<Vec<CheckInRecord>>;

    /// `GET /api/izin/pegawai/{id}`
    async fn fetch_leave_records(&self, employee_id: i64) -> Result<Vec<LeaveRecord>>;

    /// `GET /api/rekap-bulanan?year=&excludeWeekend=`
    async fn fetch_monthly_recap(
        &self,
        year: i32,
        exclude_weekend: bool,
    ) -> Result<Vec<MonthlyRecap>>;

    /// `GET /api/tugas-luar`
    async fn list_field_duties(&self) -> Result<Vec<FieldDuty>>;

    /// `POST /api/tugas-luar` (multipart, photo required)
    async fn create_field_duty(&self, form: &FieldDutyForm, photo: &Path) -> Result<FieldDuty>;

    /// `PUT /api/tugas-luar/{id}` (multipart). `None` leaves the remote photo
    /// unchanged.
    async fn update_field_duty(
        &self,
        id: i64,
        form: &FieldDutyForm,
        photo: Option<&Path>,
    ) -> Result<FieldDuty>;

    /// `DELETE /api/tugas-luar/{id}`
    async fn delete_field_duty(&self, id: i64) -> Result<()>;

    /// `POST /api/checkin`, bound to the device via `X-Device-Id`.
    async fn check_in(&self, device_id: &str, request: &CheckInRequest) -> Result<CheckInRecord>;

    /// `POST /api/checkout`, bound to the device via `X-Device-Id`.
    async fn check_out(&self, device_id: &str, request: &CheckOutRequest)
        -> Result<CheckInRecord>;

    /// `GET /api/checkin/today`. "No record yet" is a non-2xx reply the
    /// caller inspects, so the raw status is exposed.
    async fn today_checkin(&self) -> Result<StatusResponse<TodayCheckIn>>;

    /// `PUT /api/auth/change-password`
    async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<StatusResponse<MessageResponse>>;

    /// `GET /api/monitor/devices?skpdid=`
    async fn monitor_devices(&self, skpd_id: i64) -> Result<StatusResponse<Vec<MonitoredDevice>>>;

    /// `POST /api/device/register`
    async fn register_device(&self, registration: &DeviceRegistration)
        -> Result<MessageResponse>;
}
