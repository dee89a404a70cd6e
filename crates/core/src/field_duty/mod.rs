//! Offline-first field-duty submissions

pub mod ports;
pub mod service;
