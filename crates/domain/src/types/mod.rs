//! Domain types and models
//!
//! Wire DTOs exchanged with the attendance API plus the locally staged
//! field-duty draft.

pub mod attendance;
pub mod auth;
pub mod device;
pub mod employee;
pub mod field_duty;
pub mod response;
pub mod session;

pub use attendance::{
    CheckInRecord, CheckInRequest, CheckOutRequest, LeaveRecord, MonthlyRecap, TodayCheckIn,
};
pub use auth::{ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse};
pub use device::{DeviceIdentity, DeviceRegistration, MonitoredDevice};
pub use employee::Employee;
pub use field_duty::{DraftId, FieldDuty, FieldDutyDraft, FieldDutyForm, StagedFieldDuty};
pub use response::StatusResponse;
pub use session::{SessionEvent, SessionState};
