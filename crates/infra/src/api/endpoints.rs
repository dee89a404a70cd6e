//! Typed endpoint mapping
//!
//! Implements [`AttendanceApi`] directly on top of the gateway client. No
//! retries, caching or validation happen here: each call is one request.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use presensi_core::AttendanceApi;
use presensi_domain::constants::{
    CHANGE_PASSWORD_PATH, CHECKIN_PATH, CHECKIN_TODAY_PATH, CHECKOUT_PATH, DEVICE_REGISTER_PATH,
    EMPLOYEE_PATH, FIELD_DUTY_PATH, HEADER_DEVICE_ID, LEAVE_BY_EMPLOYEE_PATH, LOGIN_PATH,
    MONITOR_DEVICES_PATH, MONTHLY_RECAP_PATH, PART_ADDRESS, PART_DESCRIPTION, PART_DESTINATION,
    PART_LATITUDE, PART_LONGITUDE, PART_PHOTO,
};
use presensi_domain::{
    ChangePasswordRequest, CheckInRecord, CheckInRequest, CheckOutRequest, DeviceRegistration,
    Employee, FieldDuty, FieldDutyForm, LeaveRecord, LoginRequest, LoginResponse, MessageResponse,
    MonitoredDevice, MonthlyRecap, Result, StatusResponse, TodayCheckIn,
};
use tracing::instrument;

use super::errors::ApiError;
use super::gateway::{ApiGateway, GatewayClient};
use super::pipeline::{GatewayRequest, MultipartBody};

/// [`AttendanceApi`] over an [`ApiGateway`]
pub struct GatewayEndpoints {
    gateway: Arc<ApiGateway>,
}

impl GatewayEndpoints {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    fn client(&self) -> std::result::Result<Arc<GatewayClient>, ApiError> {
        self.gateway.client()
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Scalar parts for a field-duty create/update.
fn form_parts(form: &FieldDutyForm) -> MultipartBody {
    MultipartBody::new()
        .text(PART_DESTINATION, form.destination.clone())
        .text(PART_DESCRIPTION, form.description.clone())
        .text(PART_ADDRESS, form.address.clone())
        .text(PART_LATITUDE, form.latitude.clone())
        .text(PART_LONGITUDE, form.longitude.clone())
}

/// Read `photo` from disk and append it as the `foto` part.
async fn with_photo(body: MultipartBody, photo: &Path) -> std::result::Result<MultipartBody, ApiError> {
    let bytes = tokio::fs::read(photo)
        .await
        .map_err(|e| ApiError::Io(format!("cannot read photo {}: {e}", photo.display())))?;
    let file_name = photo
        .file_name()
        .map_or_else(|| "foto.jpg".to_string(), |name| name.to_string_lossy().into_owned());
    Ok(body.file(PART_PHOTO, file_name, photo_content_type(photo), bytes))
}

fn photo_content_type(photo: &Path) -> &'static str {
    match photo
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl AttendanceApi for GatewayEndpoints {
    #[instrument(skip(self, request), fields(username = %request.username))]
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let request = GatewayRequest::post(LOGIN_PATH).json(request)?;
        Ok(self.client()?.send_json(request).await?)
    }

    async fn fetch_employee(&self, pin: &str) -> Result<Employee> {
        let request = GatewayRequest::get(format!("{EMPLOYEE_PATH}/{}", segment(pin)));
        Ok(self.client()?.send_json(request).await?)
    }

    async fn fetch_checkin_history(&self, pin: &str) -> Result<Vec<CheckInRecord>> {
        let request = GatewayRequest::get(format!("{CHECKIN_PATH}/{}", segment(pin)));
        Ok(self.client()?.send_json(request).await?)
    }

    async fn fetch_leave_records(&self, employee_id: i64) -> Result<Vec<LeaveRecord>> {
        let request = GatewayRequest::get(format!("{LEAVE_BY_EMPLOYEE_PATH}/{employee_id}"));
        Ok(self.client()?.send_json(request).await?)
    }

    async fn fetch_monthly_recap(
        &self,
        year: i32,
        exclude_weekend: bool,
    ) -> Result<Vec<MonthlyRecap>> {
        let request = GatewayRequest::get(MONTHLY_RECAP_PATH)
            .query("year", year)
            .query("excludeWeekend", exclude_weekend);
        Ok(self.client()?.send_json(request).await?)
    }

    async fn list_field_duties(&self) -> Result<Vec<FieldDuty>> {
        Ok(self.client()?.send_json(GatewayRequest::get(FIELD_DUTY_PATH)).await?)
    }

    #[instrument(skip(self, form, photo), fields(destination = %form.destination))]
    async fn create_field_duty(&self, form: &FieldDutyForm, photo: &Path) -> Result<FieldDuty> {
        let body = with_photo(form_parts(form), photo).await?;
        let request = GatewayRequest::post(FIELD_DUTY_PATH).multipart(body);
        Ok(self.client()?.send_json(request).await?)
    }

    #[instrument(skip(self, form, photo))]
    async fn update_field_duty(
        &self,
        id: i64,
        form: &FieldDutyForm,
        photo: Option<&Path>,
    ) -> Result<FieldDuty> {
        let mut body = form_parts(form);
        if let Some(photo) = photo {
            body = with_photo(body, photo).await?;
        }
        let request = GatewayRequest::put(format!("{FIELD_DUTY_PATH}/{id}")).multipart(body);
        Ok(self.client()?.send_json(request).await?)
    }

    async fn delete_field_duty(&self, id: i64) -> Result<()> {
        let request = GatewayRequest::delete(format!("{FIELD_DUTY_PATH}/{id}"));
        Ok(self.client()?.send_empty(request).await?)
    }

    async fn check_in(&self, device_id: &str, request: &CheckInRequest) -> Result<CheckInRecord> {
        let request =
            GatewayRequest::post(CHECKIN_PATH).header(HEADER_DEVICE_ID, device_id)?.json(request)?;
        Ok(self.client()?.send_json(request).await?)
    }

    async fn check_out(
        &self,
        device_id: &str,
        request: &CheckOutRequest,
    ) -> Result<CheckInRecord> {
        let request = GatewayRequest::post(CHECKOUT_PATH)
            .header(HEADER_DEVICE_ID, device_id)?
            .json(request)?;
        Ok(self.client()?.send_json(request).await?)
    }

    async fn today_checkin(&self) -> Result<StatusResponse<TodayCheckIn>> {
        Ok(self.client()?.send_for_status(GatewayRequest::get(CHECKIN_TODAY_PATH)).await?)
    }

    async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<StatusResponse<MessageResponse>> {
        let request = GatewayRequest::put(CHANGE_PASSWORD_PATH).json(request)?;
        Ok(self.client()?.send_for_status(request).await?)
    }

    async fn monitor_devices(&self, skpd_id: i64) -> Result<StatusResponse<Vec<MonitoredDevice>>> {
        let request = GatewayRequest::get(MONITOR_DEVICES_PATH).query("skpdid", skpd_id);
        Ok(self.client()?.send_for_status(request).await?)
    }

    async fn register_device(&self, registration: &DeviceRegistration) -> Result<MessageResponse> {
        let request = GatewayRequest::post(DEVICE_REGISTER_PATH).json(registration)?;
        Ok(self.client()?.send_json(request).await?)
    }
}
