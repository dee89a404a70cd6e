//! # Presensi Domain
//!
//! Business domain types and models for the Presensi attendance client.
//!
//! This crate contains:
//! - Wire DTOs for the attendance / field-duty REST API
//! - Offline field-duty draft model
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Presensi crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
