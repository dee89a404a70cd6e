//! Application constants
//!
//! Centralized location for wire-level constants shared by the gateway and
//! its tests.

// Gateway defaults
pub const DEFAULT_BASE_URL: &str = "https://presensi.example.go.id";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

// Header names
pub const HEADER_API_KEY: &str = "X-Api-Key";
pub const HEADER_DEVICE_ID: &str = "X-Device-Id";
pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const BEARER_PREFIX: &str = "Bearer ";

// Endpoint paths
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const CHANGE_PASSWORD_PATH: &str = "/api/auth/change-password";
pub const EMPLOYEE_PATH: &str = "/api/pegawai";
pub const CHECKIN_PATH: &str = "/api/checkin";
pub const CHECKIN_TODAY_PATH: &str = "/api/checkin/today";
pub const CHECKOUT_PATH: &str = "/api/checkout";
pub const LEAVE_BY_EMPLOYEE_PATH: &str = "/api/izin/pegawai";
pub const MONTHLY_RECAP_PATH: &str = "/api/rekap-bulanan";
pub const FIELD_DUTY_PATH: &str = "/api/tugas-luar";
pub const MONITOR_DEVICES_PATH: &str = "/api/monitor/devices";
pub const DEVICE_REGISTER_PATH: &str = "/api/device/register";

// Multipart part names for field-duty create/update
pub const PART_DESTINATION: &str = "tujuan";
pub const PART_DESCRIPTION: &str = "keterangan_tugas";
pub const PART_ADDRESS: &str = "alamat";
pub const PART_LATITUDE: &str = "latitude";
pub const PART_LONGITUDE: &str = "longitude";
pub const PART_PHOTO: &str = "foto";

// Session event channel
pub const SESSION_EVENT_CAPACITY: usize = 16;
