//! Record types: the cards shown on a board

use super::ids::RecordId;
use super::status::Status;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which host module a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// KPI tracking task
    KpiTask,
    /// Security-regulation document
    RegulationDocument,
    /// Sales opportunity
    Sale,
}

impl RecordKind {
    /// Domain noun used in audit descriptions
    pub fn noun(&self) -> &'static str {
        match self {
            Self::KpiTask => "업무",
            Self::RegulationDocument => "문서",
            Self::Sale => "영업",
        }
    }
}

/// A card on the board.
///
/// The host module owns the record; the transition engine only writes
/// `status` and reads the rest for filtering and audit text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub kind: RecordKind,
    pub status: Status,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub assignee: String,
    pub display_title: String,
    /// Human-readable identifier, e.g. "KPI-2024-007"
    pub code: String,
    /// Calendar date used by the year filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Record {
    /// Create a record in the Waiting column
    pub fn new(
        id: impl Into<RecordId>,
        kind: RecordKind,
        code: impl Into<String>,
        display_title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            status: Status::Waiting,
            team: String::new(),
            assignee: String::new(),
            display_title: display_title.into(),
            code: code.into(),
            date: None,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Partial update sent to the persistence port
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl RecordPatch {
    /// Patch that only changes the status
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
        }
    }
}
