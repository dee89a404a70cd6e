//! Process-wide session event broadcast.

use presensi_core::SessionEventSink;
use presensi_domain::constants::SESSION_EVENT_CAPACITY;
use presensi_domain::SessionEvent;
use tokio::sync::broadcast;
use tracing::debug;

/// Broadcast channel for [`SessionEvent`]s.
///
/// `publish` never waits for listeners; a listener that falls more than the
/// channel capacity behind sees `RecvError::Lagged` instead of blocking the
/// publisher.
#[derive(Debug, Clone)]
pub struct BroadcastSessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl BroadcastSessionEvents {
    pub fn new() -> Self {
        Self::with_capacity(SESSION_EVENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// New listener. It receives events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastSessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionEventSink for BroadcastSessionEvents {
    fn publish(&self, event: SessionEvent) {
        match self.sender.send(event) {
            Ok(listeners) => debug!(?event, listeners, "session event published"),
            Err(_) => debug!(?event, "session event dropped: no listeners"),
        }
    }
}
