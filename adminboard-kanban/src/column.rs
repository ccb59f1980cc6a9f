//! Status columns: fixed order, two-tone styling and membership

use crate::types::{Record, Status};
use serde::Serialize;

/// Foreground/background hex colors of a column header and its chips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPair {
    pub foreground: &'static str,
    pub background: &'static str,
}

/// One column of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusColumn {
    pub status: Status,
    pub label: &'static str,
    pub colors: ColorPair,
}

const COLUMNS: [StatusColumn; 4] = [
    StatusColumn {
        status: Status::Waiting,
        label: "대기",
        colors: ColorPair {
            foreground: "#8d6e00",
            background: "#fff8e1",
        },
    },
    StatusColumn {
        status: Status::InProgress,
        label: "진행",
        colors: ColorPair {
            foreground: "#1565c0",
            background: "#e3f2fd",
        },
    },
    StatusColumn {
        status: Status::Done,
        label: "완료",
        colors: ColorPair {
            foreground: "#2e7d32",
            background: "#e8f5e9",
        },
    },
    StatusColumn {
        status: Status::OnHold,
        label: "보류",
        colors: ColorPair {
            foreground: "#616161",
            background: "#f5f5f5",
        },
    },
];

impl StatusColumn {
    /// All columns in board order, regardless of item counts
    pub fn all() -> &'static [StatusColumn] {
        &COLUMNS
    }

    /// The column for a status
    pub fn for_status(status: Status) -> &'static StatusColumn {
        &COLUMNS[status.position()]
    }

    /// Drop-target key; parses back into the status
    pub fn key(&self) -> &'static str {
        self.label
    }

    /// Whether `record` belongs in this column
    pub fn contains(&self, record: &Record) -> bool {
        record.status == self.status
    }
}
