//! Kanban status-transition engine for the AdminBoard console
//!
//! Every host module (KPI tasks, regulation documents, sales) shows its
//! records on the same four-column board. This crate owns what happens when
//! a card is dragged to another column: the status is applied locally at
//! once, persisted through the host's backend port, and either audited or
//! rolled back.
//!
//! ## Overview
//!
//! - **Optimistic** - the card moves before the backend answers
//! - **Rollback** - a refused or failed write snaps the card back, with one error toast
//! - **Deduplicated audit** - identical change-log rows inside a short window are written once
//! - **Ports** - persistence, audit log and toasts are host-supplied traits
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use adminboard_kanban::{
//!     KanbanOrchestrator, Point, Ports, Record, RecordBoard, RecordKind, Viewer,
//! };
//! use adminboard_config::KanbanConfig;
//! use std::sync::Arc;
//!
//! # async fn example(ports: Ports) -> Result<(), Box<dyn std::error::Error>> {
//! let board = Arc::new(RecordBoard::with_records([
//!     Record::new(7u64, RecordKind::KpiTask, "KPI-007", "분기 실적 집계").with_assignee("김담당"),
//! ]));
//! let kanban = KanbanOrchestrator::new(&KanbanConfig::default(), board, ports, Viewer::new("김담당"))?;
//!
//! kanban.pointer_down(&7u64.into(), Point::new(0.0, 0.0));
//! kanban.pointer_move(Point::new(40.0, 0.0), None);
//! let outcome = kanban.pointer_up(Some("진행")).await;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## Status flow
//!
//! ```text
//! pointer_down ─► Pressed ──(≥ activation distance)──► Dragging
//!                   │                                    │
//!                   └─ pointer_up ─► click               ├─ no target ─► cancelled
//!                                                        └─ column key ─► validator
//!                                                                          │
//!            apply locally ◄──────────── effective ◄──────────────────────┘
//!                 │
//!           update_record ─┬─ Ok(true)  ─► audit (deduplicated) + success toast
//!                          └─ otherwise ─► restore old status + error toast
//! ```

pub mod audit;
mod board;
pub mod column;
pub mod commit;
pub mod dedup;
pub mod drag;
mod error;
pub mod events;
pub mod filter;
pub mod orchestrator;
pub mod ports;
pub mod tracker;
pub mod types;
pub mod validator;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use audit::{AuditDisposition, AuditTrail};
pub use board::RecordBoard;
pub use column::{ColorPair, StatusColumn};
pub use commit::{CommitOutcome, OptimisticCommitController};
pub use dedup::{AuditDeduplicator, DedupKey};
pub use drag::{
    DragSession, DraggableRecord, DroppableColumn, GesturePhase, Point, PointerSensor,
    RecordPhase, Translate, Viewer,
};
pub use error::{KanbanError, Result};
pub use events::{BoardEvent, EventBus};
pub use filter::BoardFilter;
pub use orchestrator::{ColumnView, GestureOutcome, KanbanOrchestrator};
pub use ports::{
    AuditPort, NotificationPort, NotificationSeverity, PersistencePort, PortError, Ports,
};
pub use tracker::{DerivedFieldTracker, FieldChange};
pub use types::{
    AuditAction, AuditEntryId, AuditLogEntry, Record, RecordId, RecordKind, RecordPatch, Status,
    STATUS_FIELD,
};
pub use validator::Transition;

// Re-export so host modules can implement the async ports without a direct dependency
pub use async_trait::async_trait;
