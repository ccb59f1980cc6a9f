//! In-memory ports for tests
//!
//! Enabled for this crate's unit tests and, through the `test-support`
//! feature, for integration tests and host modules' own tests.

use crate::board::lock;
use crate::ports::{AuditPort, NotificationPort, NotificationSeverity, PersistencePort, PortError};
use crate::types::{AuditLogEntry, RecordId, RecordPatch};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Scripted backend answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedResponse {
    Accept,
    Reject,
    Fail(String),
}

/// Persistence port answering from a queue; accepts once the queue is empty.
///
/// With a gate, each call waits for one permit before answering so tests
/// can observe the optimistic state mid-commit.
#[derive(Debug, Default)]
pub struct ScriptedPersistence {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    calls: Mutex<Vec<(RecordId, RecordPatch)>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls block until a permit is added to `gate`
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push(&self, response: ScriptedResponse) {
        lock(&self.responses).push_back(response);
    }

    pub fn push_accept(&self) {
        self.push(ScriptedResponse::Accept);
    }

    pub fn push_reject(&self) {
        self.push(ScriptedResponse::Reject);
    }

    pub fn push_fail(&self, message: impl Into<String>) {
        self.push(ScriptedResponse::Fail(message.into()));
    }

    /// Every call received, in order
    pub fn calls(&self) -> Vec<(RecordId, RecordPatch)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl PersistencePort for ScriptedPersistence {
    async fn update_record(&self, id: &RecordId, patch: &RecordPatch) -> Result<bool, PortError> {
        lock(&self.calls).push((id.clone(), patch.clone()));

        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let response = lock(&self.responses).pop_front();
        match response.unwrap_or(ScriptedResponse::Accept) {
            ScriptedResponse::Accept => Ok(true),
            ScriptedResponse::Reject => Ok(false),
            ScriptedResponse::Fail(message) => Err(PortError::new(message)),
        }
    }
}

/// Audit port keeping entries in memory
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<AuditLogEntry>>,
    failing: AtomicBool,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every append fails
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<AuditLogEntry> {
        lock(&self.entries).clone()
    }
}

#[async_trait]
impl AuditPort for MemoryAuditLog {
    async fn append_audit_log(&self, entry: &AuditLogEntry) -> Result<(), PortError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PortError::new("audit store unavailable"));
        }
        lock(&self.entries).push(entry.clone());
        Ok(())
    }
}

/// Notification port recording every toast
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, NotificationSeverity)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, NotificationSeverity)> {
        lock(&self.messages).clone()
    }

    /// Number of toasts of one severity
    pub fn count(&self, severity: NotificationSeverity) -> usize {
        lock(&self.messages)
            .iter()
            .filter(|(_, s)| *s == severity)
            .count()
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify(&self, message: &str, severity: NotificationSeverity) {
        lock(&self.messages).push((message.to_string(), severity));
    }
}
