//! Check-in / check-out, leave and recap payloads

use serde::{Deserialize, Serialize};

/// Body of `POST /api/checkin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub pin: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
}

/// Body of `POST /api/checkout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutRequest {
    pub pin: String,
    pub latitude: String,
    pub longitude: String,
}

/// One attendance row as returned by the check-in endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub pin: String,
    #[serde(default)]
    pub tanggal: Option<String>,
    #[serde(default)]
    pub jam_masuk: Option<String>,
    #[serde(default)]
    pub jam_keluar: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Payload of `GET /api/checkin/today` when a record exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayCheckIn {
    #[serde(default)]
    pub checked_in: bool,
    #[serde(default)]
    pub checked_out: bool,
    #[serde(default)]
    pub data: Option<CheckInRecord>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Leave (izin) entry for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub id: i64,
    #[serde(default)]
    pub jenis: Option<String>,
    #[serde(default)]
    pub tanggal_mulai: Option<String>,
    #[serde(default)]
    pub tanggal_selesai: Option<String>,
    #[serde(default)]
    pub keterangan: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Per-month attendance totals from `GET /api/rekap-bulanan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecap {
    pub bulan: u32,
    #[serde(default)]
    pub hadir: u32,
    #[serde(default)]
    pub izin: u32,
    #[serde(default)]
    pub tugas_luar: u32,
    #[serde(default)]
    pub alpha: u32,
    #[serde(default)]
    pub terlambat: u32,
}
