//! Error types for the kanban transition engine

use adminboard_common::{ErrorSeverity, Severity};
use adminboard_config::ConfigError;
use thiserror::Error;
use tracing::{error, warn};

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in the transition engine
#[derive(Debug, Error)]
pub enum KanbanError {
    /// A drop target or status value outside the fixed enumeration
    #[error("invalid status value: {value}")]
    InvalidStatus { value: String },

    /// Record not present in the board collection
    #[error("record not found: {id}")]
    RecordNotFound { id: String },

    /// Record disappeared between drop and commit
    #[error("record {id} vanished before commit")]
    StaleRecord { id: String },

    /// The backend answered but refused the change
    #[error("backend rejected the change to record {id}")]
    PersistenceRejected { id: String },

    /// The backend call itself failed
    #[error("persistence failed for record {id}: {message}")]
    Persistence { id: String, message: String },

    /// The audit row could not be written; the status change stands
    #[error("audit log write failed for record {id}: {message}")]
    AuditWrite { id: String, message: String },

    /// Engine configuration could not be used
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl KanbanError {
    /// Create an invalid status error
    pub fn invalid_status(value: impl Into<String>) -> Self {
        Self::InvalidStatus {
            value: value.into(),
        }
    }

    /// Create a persistence failure error
    pub fn persistence(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create an audit write failure error
    pub fn audit_write(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AuditWrite {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Whether dragging the card again may succeed
    ///
    /// Nothing is retried automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::PersistenceRejected { .. } | Self::Persistence { .. }
        )
    }

    /// Write this error to the operational console at its severity's level
    pub fn log(&self, context: &str) {
        if self.severity().log_level() == tracing::Level::ERROR {
            error!(error = %self, "{}", context);
        } else {
            warn!(error = %self, "{}", context);
        }
    }
}

impl Severity for KanbanError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidStatus { .. }
            | Self::RecordNotFound { .. }
            | Self::StaleRecord { .. }
            | Self::AuditWrite { .. } => ErrorSeverity::Warning,
            Self::PersistenceRejected { .. } | Self::Persistence { .. } => ErrorSeverity::Error,
            Self::Config(_) => ErrorSeverity::Critical,
        }
    }
}
