//! Audit deduplication
//!
//! Two effects watching derived state (say "latest revision" and "latest
//! revision date") can both report the same change from one upload. The
//! deduplicator collapses identical audit keys accepted within a window.
//! This is a heuristic for same-process double firing, not a transactional
//! guarantee.

use crate::board::lock;
use crate::error::{KanbanError, Result};
use crate::types::{AuditAction, AuditLogEntry, RecordId};
use adminboard_config::AuditConfig;
use adminboard_config::ConfigError;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Identity of an audit entry for deduplication purposes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub record_id: RecordId,
    pub action: AuditAction,
    pub before: String,
    pub after: String,
}

impl DedupKey {
    pub fn of(entry: &AuditLogEntry) -> Self {
        Self {
            record_id: entry.record_id.clone(),
            action: entry.action,
            before: entry.before_value.clone(),
            after: entry.after_value.clone(),
        }
    }
}

/// Time-expiring memory of recently accepted audit keys.
///
/// `capacity` is a soft cap. Once reached, expired keys are reclaimed
/// before a new one is stored; a key still inside its window is never
/// evicted, so the cache grows past the cap under a burst.
#[derive(Debug)]
pub struct AuditDeduplicator {
    accepted: Mutex<LruCache<DedupKey, Instant>>,
    capacity: NonZeroUsize,
    window: Duration,
}

impl AuditDeduplicator {
    pub fn new(capacity: NonZeroUsize, window: Duration) -> Self {
        Self {
            accepted: Mutex::new(LruCache::unbounded()),
            capacity,
            window,
        }
    }

    /// Build from configuration; zero capacity is rejected
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        let capacity = NonZeroUsize::new(config.dedup_capacity).ok_or_else(|| {
            KanbanError::from(ConfigError::invalid_value(
                "audit.dedup_capacity",
                "must be at least 1",
            ))
        })?;
        Ok(Self::new(capacity, config.dedup_window()))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Decide whether `key` should be written now
    pub fn should_emit(&self, key: &DedupKey) -> bool {
        self.should_emit_at(key, Instant::now())
    }

    /// Decide whether `key` should be written at `now`.
    ///
    /// Suppressed when the same key was accepted less than `window` ago.
    /// Otherwise the key is remembered with `now` and `true` is returned.
    pub fn should_emit_at(&self, key: &DedupKey, now: Instant) -> bool {
        let mut accepted = lock(&self.accepted);
        if let Some(at) = accepted.peek(key) {
            if now.saturating_duration_since(*at) < self.window {
                return false;
            }
        }
        if accepted.len() >= self.capacity.get() {
            self.reclaim_expired(&mut accepted, now);
        }
        accepted.put(key.clone(), now);
        true
    }

    fn reclaim_expired(&self, accepted: &mut LruCache<DedupKey, Instant>, now: Instant) {
        let expired: Vec<DedupKey> = accepted
            .iter()
            .filter(|(_, at)| now.saturating_duration_since(**at) >= self.window)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            accepted.pop(key);
        }
        if accepted.len() >= self.capacity.get() {
            debug!(
                live = accepted.len(),
                capacity = self.capacity.get(),
                "audit dedup cache above capacity, all entries still inside window"
            );
        }
    }

    /// Forget an accepted key so an immediate retry is not suppressed
    pub fn release(&self, key: &DedupKey) {
        lock(&self.accepted).pop(key);
    }

    pub fn len(&self) -> usize {
        lock(&self.accepted).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(record: u64, before: &str, after: &str) -> DedupKey {
        DedupKey {
            record_id: record.into(),
            action: AuditAction::Update,
            before: before.into(),
            after: after.into(),
        }
    }

    fn dedup(capacity: usize) -> AuditDeduplicator {
        AuditDeduplicator::new(
            NonZeroUsize::new(capacity).unwrap(),
            Duration::from_millis(2000),
        )
    }

    #[test]
    fn test_duplicate_inside_window_is_suppressed() {
        let dedup = dedup(16);
        let start = Instant::now();

        assert!(dedup.should_emit_at(&key(7, "대기", "진행"), start));
        assert!(!dedup.should_emit_at(&key(7, "대기", "진행"), start + Duration::from_millis(1999)));
    }

    #[test]
    fn test_duplicate_after_window_is_emitted() {
        let dedup = dedup(16);
        let start = Instant::now();

        assert!(dedup.should_emit_at(&key(7, "대기", "진행"), start));
        assert!(dedup.should_emit_at(&key(7, "대기", "진행"), start + Duration::from_millis(2100)));
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let dedup = dedup(16);
        let start = Instant::now();

        assert!(dedup.should_emit_at(&key(1, "a", "b"), start));
        assert!(dedup.should_emit_at(&key(1, "a", "b"), start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_suppression_does_not_extend_window() {
        let dedup = dedup(16);
        let start = Instant::now();

        assert!(dedup.should_emit_at(&key(1, "a", "b"), start));
        assert!(!dedup.should_emit_at(&key(1, "a", "b"), start + Duration::from_millis(1500)));
        assert!(dedup.should_emit_at(&key(1, "a", "b"), start + Duration::from_millis(2050)));
    }

    #[test]
    fn test_different_values_are_independent() {
        let dedup = dedup(16);
        let now = Instant::now();

        assert!(dedup.should_emit_at(&key(1, "a", "b"), now));
        assert!(dedup.should_emit_at(&key(1, "b", "a"), now));
        assert!(dedup.should_emit_at(&key(2, "a", "b"), now));
        assert_eq!(dedup.len(), 3);
    }

    #[test]
    fn test_live_keys_survive_past_capacity() {
        let dedup = dedup(16);
        let now = Instant::now();

        assert!(dedup.should_emit_at(&key(0, "대기", "진행"), now));
        for record in 1..=16 {
            assert!(dedup.should_emit_at(&key(record, "대기", "진행"), now));
        }
        assert_eq!(dedup.len(), 17);
        assert!(!dedup.should_emit_at(&key(0, "대기", "진행"), now));
    }

    #[test]
    fn test_single_slot_keeps_live_key_on_interleave() {
        let dedup = dedup(1);
        let now = Instant::now();

        assert!(dedup.should_emit_at(&key(1, "a", "b"), now));
        assert!(dedup.should_emit_at(&key(2, "a", "b"), now));
        assert!(!dedup.should_emit_at(&key(1, "a", "b"), now));
    }

    #[test]
    fn test_expired_keys_reclaimed_at_capacity() {
        let dedup = dedup(2);
        let start = Instant::now();

        assert!(dedup.should_emit_at(&key(1, "a", "b"), start));
        assert!(dedup.should_emit_at(&key(2, "a", "b"), start));
        let later = start + Duration::from_millis(2500);
        assert!(dedup.should_emit_at(&key(3, "a", "b"), later));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_release_allows_retry() {
        let dedup = dedup(4);
        let now = Instant::now();

        assert!(dedup.should_emit_at(&key(1, "a", "b"), now));
        dedup.release(&key(1, "a", "b"));
        assert!(dedup.should_emit_at(&key(1, "a", "b"), now));
    }

    #[test]
    fn test_from_config_rejects_zero_capacity() {
        let config = AuditConfig {
            dedup_window_ms: 2000,
            dedup_capacity: 0,
        };
        assert!(matches!(
            AuditDeduplicator::from_config(&config),
            Err(KanbanError::Config(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_should_emit_uses_runtime_clock() {
        let dedup = AuditDeduplicator::from_config(&AuditConfig::default()).unwrap();

        assert!(dedup.should_emit(&key(7, "대기", "진행")));
        tokio::time::advance(Duration::from_millis(1000)).await;
        assert!(!dedup.should_emit(&key(7, "대기", "진행")));
        tokio::time::advance(Duration::from_millis(1100)).await;
        assert!(dedup.should_emit(&key(7, "대기", "진행")));
    }
}
