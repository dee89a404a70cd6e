//! Attendance API gateway
//!
//! Every remote call goes through one shared pipeline:
//! `RequestAuthenticator -> SessionMonitor -> HttpTransport`.
//!
//! - [`gateway::ApiGateway`] builds the shared client once, on first use
//! - [`endpoints::GatewayEndpoints`] maps the typed operations onto it
//! - [`scheduler::FieldDutySyncScheduler`] drives background draft sync

pub mod auth;
pub mod endpoints;
pub mod errors;
pub mod gateway;
pub mod pipeline;
pub mod scheduler;
pub mod session_monitor;

pub use auth::RequestAuthenticator;
pub use endpoints::GatewayEndpoints;
pub use errors::{ApiError, ApiErrorCategory};
pub use gateway::{ApiGateway, ApiGatewayBuilder, GatewayClient, HttpTransportFactory, TransportFactory};
pub use pipeline::{
    GatewayRequest, GatewayResponse, MultipartBody, MultipartPart, Next, PartValue, Pipeline,
    RequestBody, Stage, Transport,
};
pub use scheduler::{FieldDutySyncScheduler, SchedulerConfig, SchedulerError};
pub use session_monitor::SessionMonitor;
