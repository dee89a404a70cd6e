//! Session lifecycle: credential ports and the login/logout service

pub mod ports;
pub mod service;
