//! OptimisticCommitController - apply, persist, then audit or roll back
//!
//! Order within one commit is fixed: capture the old status, apply the new
//! one locally, call the backend, then either audit and toast success or
//! restore the old status and toast the failure. Nothing is retried.

use crate::audit::{AuditDisposition, AuditTrail};
use crate::board::{lock, RecordBoard};
use crate::error::KanbanError;
use crate::events::{BoardEvent, EventBus};
use crate::ports::{NotificationPort, NotificationSeverity, PersistencePort};
use crate::types::{AuditLogEntry, Record, RecordId, RecordPatch, Status};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Toast shown when the backend refuses or fails a status change
pub const ROLLBACK_MESSAGE: &str = "상태 변경에 실패했습니다. 다시 시도해 주세요.";

/// Result of one commit attempt
#[derive(Debug)]
pub enum CommitOutcome {
    /// Persisted; `audit` tells whether the change-log row was written
    Committed {
        record_id: RecordId,
        from: Status,
        to: Status,
        audit: AuditDisposition,
    },
    /// Backend refused or failed; `restored` is false when the record had
    /// already been removed from the board
    RolledBack {
        record_id: RecordId,
        restored: bool,
        error: KanbanError,
    },
    /// Record already had the target status
    NoOp { record_id: RecordId },
    /// Record was no longer on the board
    Stale { record_id: RecordId },
    /// A commit for this record is still in flight
    Busy { record_id: RecordId },
}

impl CommitOutcome {
    pub fn record_id(&self) -> &RecordId {
        match self {
            Self::Committed { record_id, .. }
            | Self::RolledBack { record_id, .. }
            | Self::NoOp { record_id }
            | Self::Stale { record_id }
            | Self::Busy { record_id } => record_id,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Self::RolledBack { .. })
    }
}

/// Success toast for a committed transition
pub fn success_message(from: Status, to: Status) -> String {
    format!("상태가 '{}'에서 '{}'(으)로 변경되었습니다", from, to)
}

pub struct OptimisticCommitController {
    board: Arc<RecordBoard>,
    persistence: Arc<dyn PersistencePort>,
    notifier: Arc<dyn NotificationPort>,
    audit: Arc<AuditTrail>,
    events: EventBus,
    in_flight: Mutex<HashSet<RecordId>>,
}

impl OptimisticCommitController {
    pub fn new(
        board: Arc<RecordBoard>,
        persistence: Arc<dyn PersistencePort>,
        notifier: Arc<dyn NotificationPort>,
        audit: Arc<AuditTrail>,
        events: EventBus,
    ) -> Self {
        Self {
            board,
            persistence,
            notifier,
            audit,
            events,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Whether a commit for `record_id` is awaiting the backend
    pub fn is_in_flight(&self, record_id: &RecordId) -> bool {
        lock(&self.in_flight).contains(record_id)
    }

    /// Move `record_id` to `new_status`
    pub async fn commit(
        &self,
        record_id: &RecordId,
        new_status: Status,
        actor_name: &str,
    ) -> CommitOutcome {
        let Some(_in_flight) = InFlightGuard::acquire(&self.in_flight, record_id) else {
            debug!(%record_id, "commit already in flight, gesture refused");
            return CommitOutcome::Busy {
                record_id: record_id.clone(),
            };
        };

        // Capture and apply under one write lock
        let Some(before) = self.board.swap_status(record_id, new_status) else {
            KanbanError::StaleRecord {
                id: record_id.to_string(),
            }
            .log("record vanished before commit");
            return CommitOutcome::Stale {
                record_id: record_id.clone(),
            };
        };

        if before.status == new_status {
            debug!(%record_id, status = %new_status, "status unchanged, nothing to commit");
            return CommitOutcome::NoOp {
                record_id: record_id.clone(),
            };
        }

        self.events.publish(BoardEvent::RecordsChanged {
            record_id: record_id.clone(),
            status: new_status,
        });
        debug!(%record_id, from = %before.status, to = %new_status, "status applied optimistically");

        let patch = RecordPatch::status(new_status);
        match self.persistence.update_record(record_id, &patch).await {
            Ok(true) => self.committed(before, new_status, actor_name).await,
            Ok(false) => self.roll_back(
                before,
                KanbanError::PersistenceRejected {
                    id: record_id.to_string(),
                },
            ),
            Err(e) => self.roll_back(before, KanbanError::persistence(record_id.as_str(), e.message)),
        }
    }

    async fn committed(&self, before: Record, to: Status, actor_name: &str) -> CommitOutcome {
        let from = before.status;
        info!(record_id = %before.id, code = %before.code, %from, %to, "status change committed");

        let audit = self
            .audit
            .submit(AuditLogEntry::status_change(&before, to, actor_name))
            .await;
        self.notifier
            .notify(&success_message(from, to), NotificationSeverity::Success);

        CommitOutcome::Committed {
            record_id: before.id,
            from,
            to,
            audit,
        }
    }

    fn roll_back(&self, before: Record, error: KanbanError) -> CommitOutcome {
        let restored = self.board.swap_status(&before.id, before.status).is_some();
        if restored {
            self.events.publish(BoardEvent::RecordsChanged {
                record_id: before.id.clone(),
                status: before.status,
            });
        }

        warn!(
            record_id = %before.id,
            status = %before.status,
            restored,
            error = %error,
            "status change rolled back"
        );
        self.notifier
            .notify(ROLLBACK_MESSAGE, NotificationSeverity::Error);

        CommitOutcome::RolledBack {
            record_id: before.id,
            restored,
            error,
        }
    }
}

impl std::fmt::Debug for OptimisticCommitController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimisticCommitController")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

/// Marks a record as committing until dropped
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<RecordId>>,
    record_id: RecordId,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(set: &'a Mutex<HashSet<RecordId>>, record_id: &RecordId) -> Option<Self> {
        if !lock(set).insert(record_id.clone()) {
            return None;
        }
        Some(Self {
            set,
            record_id: record_id.clone(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.set).remove(&self.record_id);
    }
}
