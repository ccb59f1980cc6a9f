//! Ports the host module implements
//!
//! The engine never talks to a backend or UI toolkit directly. Each host
//! (KPI, regulation documents, sales) supplies these three capabilities.

use crate::types::{AuditLogEntry, RecordId, RecordPatch};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a host port
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct PortError {
    pub message: String,
}

impl PortError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Writes record changes to the backend.
///
/// Must be idempotent from the caller's side: sending the same status twice
/// is safe.
#[async_trait]
pub trait PersistencePort: Send + Sync {
    /// `Ok(true)` when stored, `Ok(false)` when the backend refused it
    async fn update_record(
        &self,
        id: &RecordId,
        patch: &RecordPatch,
    ) -> std::result::Result<bool, PortError>;
}

/// Appends rows to the change log store
#[async_trait]
pub trait AuditPort: Send + Sync {
    async fn append_audit_log(&self, entry: &AuditLogEntry) -> std::result::Result<(), PortError>;
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSeverity {
    Success,
    Error,
    Warning,
    Info,
}

/// Shows a toast to the user; synchronous
pub trait NotificationPort: Send + Sync {
    fn notify(&self, message: &str, severity: NotificationSeverity);
}

/// The three host capabilities bundled for construction
#[derive(Clone)]
pub struct Ports {
    pub persistence: Arc<dyn PersistencePort>,
    pub audit: Arc<dyn AuditPort>,
    pub notifications: Arc<dyn NotificationPort>,
}

impl Ports {
    pub fn new(
        persistence: Arc<dyn PersistencePort>,
        audit: Arc<dyn AuditPort>,
        notifications: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            persistence,
            audit,
            notifications,
        }
    }
}

impl std::fmt::Debug for Ports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ports").finish_non_exhaustive()
    }
}
