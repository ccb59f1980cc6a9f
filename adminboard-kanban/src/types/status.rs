//! The fixed status enumeration shared by every host module

use crate::error::KanbanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a record.
///
/// Serialized with the Korean labels the backend stores ("대기", "진행",
/// "완료", "보류").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "대기")]
    Waiting,
    #[serde(rename = "진행")]
    InProgress,
    #[serde(rename = "완료")]
    Done,
    #[serde(rename = "보류")]
    OnHold,
}

impl Status {
    /// Board order: Waiting, InProgress, Done, OnHold
    pub const ALL: [Status; 4] = [
        Status::Waiting,
        Status::InProgress,
        Status::Done,
        Status::OnHold,
    ];

    /// Display label, also the stored value
    pub fn label(&self) -> &'static str {
        match self {
            Self::Waiting => "대기",
            Self::InProgress => "진행",
            Self::Done => "완료",
            Self::OnHold => "보류",
        }
    }

    /// ASCII key accepted wherever a label is
    pub fn key(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::OnHold => "on_hold",
        }
    }

    /// Zero-based column index
    pub fn position(&self) -> usize {
        match self {
            Self::Waiting => 0,
            Self::InProgress => 1,
            Self::Done => 2,
            Self::OnHold => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Status::ALL
            .into_iter()
            .find(|status| {
                status.label() == trimmed || status.key().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| KanbanError::invalid_status(s))
    }
}
