//! Device identity payloads

use serde::{Deserialize, Serialize};

/// Physical device a session is bound to. Pass-through data; never persisted
/// by the client core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdentity {
    pub device_id: String,
    pub device_model: String,
}

/// Body of `POST /api/device/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistration {
    pub pin: String,
    #[serde(flatten)]
    pub device: DeviceIdentity,
    /// Push-notification registration token, if the platform issued one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_token: Option<String>,
    /// One-time code issued when moving a session to a new handset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_code: Option<String>,
}

/// Row of `GET /api/monitor/devices?skpdid=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredDevice {
    #[serde(default)]
    pub pin: Option<String>,
    #[serde(default)]
    pub nama: Option<String>,
    #[serde(default, rename = "deviceId")]
    pub device_id: Option<String>,
    #[serde(default, rename = "deviceModel")]
    pub device_model: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
}
