//! Session lifecycle: login stores the token, rejected logins leave state
//! untouched, logout clears.

#![allow(dead_code)]

mod support;

use std::sync::Arc;

use presensi_core::{CredentialStore, SessionService};
use presensi_domain::{LoginRequest, LoginResponse, PresensiError, SessionState};
use support::mocks::{MemoryCredentials, MockAttendanceApi};

fn request() -> LoginRequest {
    LoginRequest { username: "198001".into(), password: "rahasia".into(), device: None }
}

fn accepted(token: &str) -> LoginResponse {
    LoginResponse { token: token.into(), pegawai: None, message: None }
}

#[tokio::test]
async fn successful_login_stores_token() {
    let api = Arc::new(MockAttendanceApi::default());
    api.push_login(Ok(accepted("abc123")));
    let credentials = Arc::new(MemoryCredentials::default());
    let service = SessionService::new(api, credentials.clone());

    assert_eq!(service.state(), SessionState::Unauthenticated);
    service.login(&request()).await.unwrap();

    assert_eq!(credentials.token().as_deref(), Some("abc123"));
    assert!(service.is_authenticated());
}

#[tokio::test]
async fn rejected_login_keeps_existing_token() {
    let api = Arc::new(MockAttendanceApi::default());
    api.push_login(Err(PresensiError::Auth("bad credentials".into())));
    let credentials = Arc::new(MemoryCredentials::with_token("old"));
    let service = SessionService::new(api, credentials.clone());

    let err = service.login(&request()).await.unwrap_err();

    assert!(matches!(err, PresensiError::Auth(_)));
    assert_eq!(credentials.token().as_deref(), Some("old"));
}

#[tokio::test]
async fn blank_token_in_reply_is_an_auth_failure() {
    let api = Arc::new(MockAttendanceApi::default());
    api.push_login(Ok(accepted("  ")));
    let credentials = Arc::new(MemoryCredentials::default());
    let service = SessionService::new(api, credentials.clone());

    let err = service.login(&request()).await.unwrap_err();

    assert!(matches!(err, PresensiError::Auth(_)));
    assert_eq!(service.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn logout_clears_once() {
    let api = Arc::new(MockAttendanceApi::default());
    let credentials = Arc::new(MemoryCredentials::with_token("abc123"));
    let service = SessionService::new(api, credentials.clone());

    assert!(service.logout());
    assert!(!service.logout());
    assert_eq!(credentials.token(), None);
}
