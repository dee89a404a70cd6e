//! Remote attendance API boundary

pub mod ports;
