//! AuditTrail - the single path every change-log row takes
//!
//! Entries pass the deduplicator, then go to the host's audit port. A
//! failed write is logged and never undoes the change it describes.

use crate::dedup::{AuditDeduplicator, DedupKey};
use crate::error::KanbanError;
use crate::events::{BoardEvent, EventBus};
use crate::ports::AuditPort;
use crate::tracker::DerivedFieldTracker;
use crate::types::{AuditEntryId, AuditLogEntry, Record, RecordId};
use adminboard_common::Pretty;
use std::sync::Arc;
use tracing::{debug, trace};

/// What happened to a submitted entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditDisposition {
    /// Appended to the log store
    Written(AuditEntryId),
    /// Identical entry already written inside the dedup window
    Suppressed,
    /// The audit port failed; the message is the port's
    Failed(String),
}

impl AuditDisposition {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

pub struct AuditTrail {
    port: Arc<dyn AuditPort>,
    dedup: AuditDeduplicator,
    tracker: DerivedFieldTracker,
    events: EventBus,
}

impl AuditTrail {
    pub fn new(port: Arc<dyn AuditPort>, dedup: AuditDeduplicator, events: EventBus) -> Self {
        Self {
            port,
            dedup,
            tracker: DerivedFieldTracker::new(),
            events,
        }
    }

    pub fn deduplicator(&self) -> &AuditDeduplicator {
        &self.dedup
    }

    pub fn tracker(&self) -> &DerivedFieldTracker {
        &self.tracker
    }

    /// Deduplicate and append one entry
    pub async fn submit(&self, entry: AuditLogEntry) -> AuditDisposition {
        let key = DedupKey::of(&entry);
        if !self.dedup.should_emit(&key) {
            debug!(
                record_id = %entry.record_id,
                before = %entry.before_value,
                after = %entry.after_value,
                "duplicate audit entry suppressed"
            );
            return AuditDisposition::Suppressed;
        }

        match self.port.append_audit_log(&entry).await {
            Ok(()) => {
                trace!(entry = %Pretty(&entry), "audit entry appended");
                self.events.publish(BoardEvent::AuditLogAppended {
                    entry_id: entry.id,
                    record_id: entry.record_id.clone(),
                });
                AuditDisposition::Written(entry.id)
            }
            Err(e) => {
                self.dedup.release(&key);
                KanbanError::audit_write(entry.record_id.as_str(), e.message.as_str())
                    .log("audit log write failed");
                AuditDisposition::Failed(e.message)
            }
        }
    }

    /// Feed a watched derived field; real changes are audited as edits.
    ///
    /// Returns `None` when the observation was hydration or unchanged.
    /// Every (record, field) pair stays tracked until the host calls
    /// [`forget`](Self::forget) on deselect or
    /// [`record_deleted`](Self::record_deleted).
    pub async fn observe_derived(
        &self,
        record: &Record,
        field: &str,
        value: Option<&str>,
        actor_name: &str,
    ) -> Option<AuditDisposition> {
        let change = self.tracker.observe(&record.id, field, value)?;
        let entry =
            AuditLogEntry::field_change(record, field, &change.before, &change.after, actor_name);
        Some(self.submit(entry).await)
    }

    /// Audit a record the host module just created
    pub async fn record_created(&self, record: &Record, actor_name: &str) -> AuditDisposition {
        self.submit(AuditLogEntry::created(record, actor_name)).await
    }

    /// Audit a record the host module just deleted and stop tracking it
    pub async fn record_deleted(&self, record: &Record, actor_name: &str) -> AuditDisposition {
        self.tracker.forget(&record.id);
        self.submit(AuditLogEntry::deleted(record, actor_name)).await
    }

    /// The host deselected a record; its next load is hydration again
    pub fn forget(&self, record_id: &RecordId) {
        self.tracker.forget(record_id);
    }
}

impl std::fmt::Debug for AuditTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditTrail")
            .field("dedup", &self.dedup)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryAuditLog;
    use crate::types::{AuditAction, RecordKind, Status};
    use std::num::NonZeroUsize;
    use std::time::Duration;

    fn trail(log: Arc<MemoryAuditLog>) -> AuditTrail {
        AuditTrail::new(
            log,
            AuditDeduplicator::new(NonZeroUsize::new(16).unwrap(), Duration::from_millis(2000)),
            EventBus::new(16),
        )
    }

    fn document() -> Record {
        Record::new(5u64, RecordKind::RegulationDocument, "SEC-005", "개인정보 처리방침")
            .with_team("보안팀")
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_submission_written_once() {
        let log = Arc::new(MemoryAuditLog::new());
        let trail = trail(log.clone());
        let entry = AuditLogEntry::status_change(&document(), Status::Done, "admin");

        assert!(trail.submit(entry.clone()).await.is_written());
        assert_eq!(trail.submit(entry).await, AuditDisposition::Suppressed);
        assert_eq!(log.entries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_releases_key() {
        let log = Arc::new(MemoryAuditLog::new());
        let trail = trail(log.clone());
        let entry = AuditLogEntry::status_change(&document(), Status::Done, "admin");

        log.set_failing(true);
        assert!(matches!(
            trail.submit(entry.clone()).await,
            AuditDisposition::Failed(_)
        ));

        log.set_failing(false);
        assert!(trail.submit(entry).await.is_written());
        assert_eq!(log.entries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_written_entry_publishes_refresh() {
        let log = Arc::new(MemoryAuditLog::new());
        let trail = trail(log);
        let mut rx = trail.events.subscribe();

        let disposition = trail.record_created(&document(), "admin").await;
        let AuditDisposition::Written(entry_id) = disposition else {
            panic!("expected a written entry, got {:?}", disposition);
        };

        assert_eq!(
            rx.recv().await.unwrap(),
            BoardEvent::AuditLogAppended {
                entry_id,
                record_id: 5u64.into(),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_derived_hydration_not_audited() {
        let log = Arc::new(MemoryAuditLog::new());
        let trail = trail(log.clone());
        let doc = document();

        assert!(trail
            .observe_derived(&doc, "최신 개정일", None, "admin")
            .await
            .is_none());
        assert!(trail
            .observe_derived(&doc, "최신 개정일", Some("2024-01-10"), "admin")
            .await
            .is_none());
        assert!(log.entries().is_empty());

        let written = trail
            .observe_derived(&doc, "최신 개정일", Some("2024-04-01"), "admin")
            .await;
        assert!(written.unwrap().is_written());

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Update);
        assert_eq!(entries[0].before_value, "2024-01-10");
        assert_eq!(entries[0].after_value, "2024-04-01");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deleted_forgets_tracked_fields() {
        let log = Arc::new(MemoryAuditLog::new());
        let trail = trail(log.clone());
        let doc = document();

        trail
            .observe_derived(&doc, "최신 개정", Some("v1"), "admin")
            .await;
        assert_eq!(trail.tracker().len(), 1);

        let disposition = trail.record_deleted(&doc, "admin").await;
        assert!(disposition.is_written());
        assert!(trail.tracker().is_empty());
        assert_eq!(log.entries()[0].action, AuditAction::Delete);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracked_fields_held_until_forget() {
        let log = Arc::new(MemoryAuditLog::new());
        let trail = trail(log.clone());
        let doc = document();

        trail.observe_derived(&doc, "최신 개정", Some("v1"), "admin").await;
        trail.observe_derived(&doc, "최신 개정일", Some("2024-01-10"), "admin").await;
        assert_eq!(trail.tracker().len(), 2);

        trail.forget(&doc.id);
        assert!(trail.tracker().is_empty());
        assert!(log.entries().is_empty());
    }
}
