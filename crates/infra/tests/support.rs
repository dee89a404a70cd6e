//! Shared fixtures for infra integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use presensi_domain::{ApiConfig, FieldDutyDraft, SessionEvent};
use presensi_infra::api::{
    ApiError, ApiGateway, HttpTransportFactory, Transport, TransportFactory,
};
use presensi_infra::database::{DbManager, SqliteFieldDutyDraftRepository};
use presensi_infra::{BroadcastSessionEvents, SessionTokenStore};
use tempfile::TempDir;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "k-test";

/// Temporary database that keeps its directory alive for the test.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let manager = Self::open(&dir);
        Self { manager, dir }
    }

    /// Open another manager on the same file.
    pub fn reopen(&self) -> Arc<DbManager> {
        Self::open(&self.dir)
    }

    pub fn repository(&self) -> SqliteFieldDutyDraftRepository {
        SqliteFieldDutyDraftRepository::new(Arc::clone(&self.manager))
    }

    fn open(dir: &TempDir) -> Arc<DbManager> {
        let manager = DbManager::new(dir.path().join("drafts.db"), 2).unwrap();
        manager.run_migrations().unwrap();
        Arc::new(manager)
    }
}

/// Counts transport constructions; delegates to the real HTTP factory.
#[derive(Default)]
pub struct CountingFactory {
    pub builds: AtomicUsize,
}

impl TransportFactory for CountingFactory {
    fn build(&self, config: &ApiConfig) -> Result<Arc<dyn Transport>, ApiError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        HttpTransportFactory.build(config)
    }
}

/// Factory that always fails.
pub struct FailingFactory;

impl TransportFactory for FailingFactory {
    fn build(&self, _config: &ApiConfig) -> Result<Arc<dyn Transport>, ApiError> {
        Err(ApiError::Config("transport unavailable".into()))
    }
}

/// Gateway wired to a wiremock server.
pub struct TestGateway {
    pub server: MockServer,
    pub gateway: Arc<ApiGateway>,
    pub credentials: Arc<SessionTokenStore>,
    pub events: Arc<BroadcastSessionEvents>,
    pub factory: Arc<CountingFactory>,
}

impl TestGateway {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let credentials = Arc::new(SessionTokenStore::new());
        let events = Arc::new(BroadcastSessionEvents::new());
        let factory = Arc::new(CountingFactory::default());

        let config = ApiConfig {
            base_url: server.uri(),
            api_key: TEST_API_KEY.into(),
            ..ApiConfig::default()
        };
        let gateway = ApiGateway::builder()
            .config(config)
            .credentials(credentials.clone())
            .events(events.clone())
            .transport_factory(factory.clone())
            .build()
            .unwrap();

        Self { server, gateway: Arc::new(gateway), credentials, events, factory }
    }

    pub fn login_as(&self, token: &str) {
        use presensi_core::CredentialStore;
        self.credentials.store(token.to_string());
    }
}

/// Drain every event currently buffered in `receiver`.
pub fn drain(receiver: &mut Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Empty | TryRecvError::Closed) => return events,
            Err(TryRecvError::Lagged(_)) => {}
        }
    }
}

pub fn draft(destination: &str, description: &str, address: &str, image: &str) -> FieldDutyDraft {
    FieldDutyDraft {
        destination: destination.into(),
        description: description.into(),
        address: address.into(),
        latitude: "-1.1".into(),
        longitude: "140.2".into(),
        image_path: image.into(),
    }
}
