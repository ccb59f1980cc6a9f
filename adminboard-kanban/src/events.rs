//! Board events broadcast to host views
//!
//! Views re-render on `RecordsChanged` and refresh the change-log tab on
//! `AuditLogAppended`. Nobody listening is not an error.

use crate::types::{AuditEntryId, RecordId, Status};
use tokio::sync::broadcast;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    DragStarted {
        record_id: RecordId,
    },
    DragEnded {
        record_id: RecordId,
        target: Option<Status>,
    },
    /// A record's status changed locally (optimistic apply or rollback)
    RecordsChanged {
        record_id: RecordId,
        status: Status,
    },
    AuditLogAppended {
        entry_id: AuditEntryId,
        record_id: RecordId,
    },
}

/// Cloneable publisher handle
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BoardEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: BoardEvent) {
        if self.sender.send(event).is_err() {
            trace!("board event dropped, no subscribers");
        }
    }
}
