//! Field-duty sync scheduler
//!
//! Runs [`FieldDutySyncService::sync_pending`] on a fixed interval with
//! start/stop lifecycle management. Passes triggered manually and by the
//! timer are serialized inside the service.

use std::sync::Arc;
use std::time::Duration;

use presensi_core::{FieldDutySyncService, SyncReport};
use presensi_domain::{Result as DomainResult, SyncConfig};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Type alias for task handle to avoid complexity warnings
type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Scheduler lifecycle errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Scheduler already running")]
    AlreadyRunning,
    #[error("Scheduler not running")]
    NotRunning,
    #[error("Scheduler task panicked: {0}")]
    TaskPanicked(String),
    #[error("Scheduler task did not stop within {0:?}")]
    StopTimeout(Duration),
}

/// Configuration for the sync scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time between passes
    pub interval: Duration,
    /// Grace period for the running pass when stopping
    pub stop_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from(&SyncConfig::default())
    }
}

impl From<&SyncConfig> for SchedulerConfig {
    fn from(config: &SyncConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_seconds.max(1)),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

/// Periodic field-duty sync
pub struct FieldDutySyncScheduler {
    service: Arc<FieldDutySyncService>,
    config: SchedulerConfig,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
}

impl FieldDutySyncScheduler {
    pub fn new(service: Arc<FieldDutySyncService>, config: SchedulerConfig) -> Self {
        Self {
            service,
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the periodic loop. The first pass runs after one interval.
    ///
    /// # Errors
    ///
    /// `SchedulerError::AlreadyRunning` if a loop is active.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), SchedulerError> {
        let mut handle = self.task_handle.lock().await;
        if handle.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }

        // Fresh token so the scheduler can restart after stop.
        self.cancellation_token = CancellationToken::new();

        let service = Arc::clone(&self.service);
        let interval = self.config.interval;
        let cancel = self.cancellation_token.clone();

        *handle = Some(tokio::spawn(async move {
            Self::sync_loop(service, interval, cancel).await;
        }));

        info!(interval_secs = interval.as_secs(), "field-duty sync scheduler started");
        Ok(())
    }

    /// Stop the loop and wait for an in-flight pass to finish.
    ///
    /// # Errors
    ///
    /// `NotRunning`, or the task's panic / stop timeout.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> Result<(), SchedulerError> {
        let Some(handle) = self.task_handle.lock().await.take() else {
            return Err(SchedulerError::NotRunning);
        };

        self.cancellation_token.cancel();

        match tokio::time::timeout(self.config.stop_timeout, handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!("Scheduler task panicked: {}", e);
                return Err(SchedulerError::TaskPanicked(e.to_string()));
            }
            Err(_) => {
                warn!("Scheduler task did not complete within timeout");
                return Err(SchedulerError::StopTimeout(self.config.stop_timeout));
            }
        }

        info!("field-duty sync scheduler stopped");
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.task_handle.lock().await.is_some()
    }

    /// Run one pass now, independent of the timer.
    ///
    /// # Errors
    ///
    /// Draft-store failures from the pass.
    pub async fn trigger_now(&self) -> DomainResult<SyncReport> {
        self.service.sync_pending().await
    }

    async fn sync_loop(
        service: Arc<FieldDutySyncService>,
        interval: Duration,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!("Sync loop cancelled");
                    break;
                }
                () = tokio::time::sleep(interval) => {
                    match service.sync_pending().await {
                        Ok(report) if report.aborted => {
                            warn!(remaining = report.remaining, "sync pass aborted: session expired");
                        }
                        Ok(report) => {
                            debug!(submitted = report.submitted, remaining = report.remaining, "periodic sync pass done");
                        }
                        Err(err) => warn!(error = %err, "periodic sync pass failed"),
                    }
                }
            }
        }
    }
}

impl Drop for FieldDutySyncScheduler {
    fn drop(&mut self) {
        if !self.cancellation_token.is_cancelled() {
            self.cancellation_token.cancel();
        }
    }
}
