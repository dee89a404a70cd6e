//! # Presensi Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The API gateway: request pipeline, authenticator, session monitor and
//!   the lazily built shared client
//! - Typed attendance / field-duty endpoints over reqwest
//! - SQLite storage for offline field-duty drafts
//! - Session token store and event broadcast
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `presensi-core`
//! - Depends on `presensi-domain` and `presensi-core`
//! - Contains all "impure" code (network, disk)

pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod observability;
pub mod session;

// Re-export commonly used items
pub use api::{
    ApiError, ApiGateway, FieldDutySyncScheduler, GatewayClient, GatewayEndpoints, SchedulerConfig,
};
pub use database::{DbManager, SqliteFieldDutyDraftRepository};
pub use errors::InfraError;
pub use observability::init_tracing;
pub use session::{BroadcastSessionEvents, SessionTokenStore};
