//! Audit log entry types for the change-log view

use super::ids::{AuditEntryId, RecordId};
use super::record::Record;
use super::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field name recorded for status transitions
pub const STATUS_FIELD: &str = "status";

/// Kind of change an audit entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "추가")]
    Create,
    #[serde(rename = "수정")]
    Update,
    #[serde(rename = "삭제")]
    Delete,
}

impl AuditAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "추가",
            Self::Update => "수정",
            Self::Delete => "삭제",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One immutable row of the change log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique ID for this entry
    pub id: AuditEntryId,

    /// The record the change applies to
    pub record_id: RecordId,

    /// Human-readable code of the record
    pub target_code: String,

    pub action: AuditAction,

    /// Sentence shown in the change-log tab
    pub description: String,

    pub before_value: String,

    pub after_value: String,

    pub changed_field: String,

    pub team: String,

    /// Who made the change
    pub actor_name: String,

    /// When the change was committed
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Create an entry for `record`, stamped now
    pub fn new(
        record: &Record,
        action: AuditAction,
        changed_field: impl Into<String>,
        before_value: impl Into<String>,
        after_value: impl Into<String>,
        description: impl Into<String>,
        actor_name: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            record_id: record.id.clone(),
            target_code: record.code.clone(),
            action,
            description: description.into(),
            before_value: before_value.into(),
            after_value: after_value.into(),
            changed_field: changed_field.into(),
            team: record.team.clone(),
            actor_name: actor_name.into(),
            timestamp: Utc::now(),
        }
    }

    /// Entry for a committed status transition of `record` (pre-transition snapshot)
    pub fn status_change(record: &Record, to: Status, actor_name: impl Into<String>) -> Self {
        let description = format!(
            "{} '{}'({}) 상태 변경: {} → {}",
            record.kind.noun(),
            record.display_title,
            record.code,
            record.status,
            to
        );
        Self::new(
            record,
            AuditAction::Update,
            STATUS_FIELD,
            record.status.label(),
            to.label(),
            description,
            actor_name,
        )
    }

    /// Entry for a change of a derived field such as "latest revision"
    pub fn field_change(
        record: &Record,
        field: &str,
        before: &str,
        after: &str,
        actor_name: impl Into<String>,
    ) -> Self {
        let description = format!(
            "{} '{}'({}) {} 변경: {} → {}",
            record.kind.noun(),
            record.display_title,
            record.code,
            field,
            display_or_dash(before),
            display_or_dash(after)
        );
        Self::new(
            record,
            AuditAction::Update,
            field,
            before,
            after,
            description,
            actor_name,
        )
    }

    /// Entry for a record the host module just created
    pub fn created(record: &Record, actor_name: impl Into<String>) -> Self {
        let description = format!(
            "{} '{}'({}) 추가",
            record.kind.noun(),
            record.display_title,
            record.code
        );
        Self::new(
            record,
            AuditAction::Create,
            "-",
            "",
            record.display_title.as_str(),
            description,
            actor_name,
        )
    }

    /// Entry for a record the host module just deleted
    pub fn deleted(record: &Record, actor_name: impl Into<String>) -> Self {
        let description = format!(
            "{} '{}'({}) 삭제",
            record.kind.noun(),
            record.display_title,
            record.code
        );
        Self::new(
            record,
            AuditAction::Delete,
            "-",
            record.display_title.as_str(),
            "",
            description,
            actor_name,
        )
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
