//! Shared test helpers for `presensi-core` integration tests.
//!
//! In-memory fakes of every core port so service tests focus on behaviour
//! instead of I/O.

pub mod mocks;
