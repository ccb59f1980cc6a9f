//! Core types for the transition engine

mod ids;
mod log;
mod record;
mod status;

// Re-export all types
pub use ids::{AuditEntryId, RecordId};
pub use log::{AuditAction, AuditLogEntry, STATUS_FIELD};
pub use record::{Record, RecordKind, RecordPatch};
pub use status::Status;
