//! Authentication payloads

use serde::{Deserialize, Serialize};

use super::device::DeviceIdentity;
use super::employee::Employee;

/// Body of `POST /api/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Device binding; flattened into the body as `deviceId` / `deviceModel`.
    #[serde(flatten)]
    pub device: Option<DeviceIdentity>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("device", &self.device)
            .finish()
    }
}

/// Successful login payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub pegawai: Option<Employee>,
    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("pegawai", &self.pegawai)
            .field("message", &self.message)
            .finish()
    }
}

/// Body of `PUT /api/auth/change-password`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePasswordRequest { .. }")
    }
}

/// Generic `{ "message": ... }` reply used by several endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_flattens_device_identity() {
        let request = LoginRequest {
            username: "198001".into(),
            password: "rahasia".into(),
            device: Some(DeviceIdentity {
                device_id: "dev-1".into(),
                device_model: "Pixel 7".into(),
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["deviceId"], "dev-1");
        assert_eq!(json["deviceModel"], "Pixel 7");
        assert!(json.get("device").is_none());
    }

    #[test]
    fn login_request_without_device_omits_fields() {
        let request =
            LoginRequest { username: "u".into(), password: "p".into(), device: None };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("deviceId").is_none());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let request =
            LoginRequest { username: "u".into(), password: "hunter2".into(), device: None };
        assert!(!format!("{request:?}").contains("hunter2"));

        let response: LoginResponse =
            serde_json::from_str(r#"{"token":"abc123"}"#).unwrap();
        assert!(!format!("{response:?}").contains("abc123"));
    }
}
