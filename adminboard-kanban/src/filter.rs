//! Visible-set filter criteria (year / team / status / assignee)

use crate::types::{Record, Status};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Filter criteria; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFilter {
    pub year: Option<i32>,
    pub team: Option<String>,
    pub status: Option<Status>,
    pub assignee: Option<String>,
}

impl BoardFilter {
    /// Filter that matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Whether `record` passes every set criterion.
    ///
    /// Undated records never match a year filter.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(year) = self.year {
            if record.date.map(|d| d.year()) != Some(year) {
                return false;
            }
        }
        if let Some(team) = &self.team {
            if &record.team != team {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if &record.assignee != assignee {
                return false;
            }
        }
        true
    }
}
