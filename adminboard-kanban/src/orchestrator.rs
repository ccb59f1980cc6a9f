//! KanbanOrchestrator - one board instance for one host module
//!
//! Owns the pointer sensor, the gesture state machine, the active filter and
//! the commit controller. The host feeds pointer input (or the toolkit's
//! drag callbacks) and renders `columns()`.

use crate::audit::AuditTrail;
use crate::board::{lock, RecordBoard};
use crate::column::StatusColumn;
use crate::commit::{CommitOutcome, OptimisticCommitController};
use crate::dedup::AuditDeduplicator;
use crate::drag::{
    DragSession, DraggableRecord, DroppableColumn, GesturePhase, Point, PointerSensor,
    RecordPhase, Viewer,
};
use crate::error::{KanbanError, Result};
use crate::events::{BoardEvent, EventBus};
use crate::filter::BoardFilter;
use crate::ports::Ports;
use crate::types::{Record, RecordId, Status};
use crate::validator::{classify_target, Transition};
use adminboard_config::KanbanConfig;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::debug;

/// How a pointer gesture ended
#[derive(Debug)]
pub enum GestureOutcome {
    /// No press or session was active
    Ignored,
    /// Released before the activation distance; open the detail view
    Clicked(RecordId),
    /// Released outside every column
    Cancelled { record_id: RecordId },
    /// Dropped on a key that is not a status column
    Invalid { record_id: RecordId, value: String },
    /// Dropped on a column; the commit result
    Transition(CommitOutcome),
}

impl GestureOutcome {
    pub fn commit(&self) -> Option<&CommitOutcome> {
        match self {
            Self::Transition(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// One rendered column: header, drop target and cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub column: StatusColumn,
    pub droppable: DroppableColumn,
    pub cards: Vec<DraggableRecord>,
}

impl ColumnView {
    /// Card count shown in the column header
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

pub struct KanbanOrchestrator {
    board: Arc<RecordBoard>,
    viewer: Viewer,
    sensor: PointerSensor,
    dragging_opacity: f32,
    filter: Mutex<BoardFilter>,
    gesture: Mutex<GesturePhase>,
    audit: Arc<AuditTrail>,
    commits: OptimisticCommitController,
    events: EventBus,
}

impl KanbanOrchestrator {
    /// Wire a board for `viewer` from validated configuration
    pub fn new(
        config: &KanbanConfig,
        board: Arc<RecordBoard>,
        ports: Ports,
        viewer: Viewer,
    ) -> Result<Self> {
        config.validate()?;

        let events = EventBus::new(config.events.channel_capacity);
        let dedup = AuditDeduplicator::from_config(&config.audit)?;
        let audit = Arc::new(AuditTrail::new(ports.audit, dedup, events.clone()));
        let commits = OptimisticCommitController::new(
            board.clone(),
            ports.persistence,
            ports.notifications,
            audit.clone(),
            events.clone(),
        );

        Ok(Self {
            board,
            viewer,
            sensor: PointerSensor::from_config(&config.drag),
            dragging_opacity: config.drag.dragging_opacity,
            filter: Mutex::new(BoardFilter::all()),
            gesture: Mutex::new(GesturePhase::Idle),
            audit,
            commits,
            events,
        })
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Arm a press on a card. Returns false when the record is unknown or a
    /// drag is already in progress.
    pub fn pointer_down(&self, record_id: &RecordId, point: Point) -> bool {
        let Some(record) = self.board.get(record_id) else {
            debug!(%record_id, "press on unknown record ignored");
            return false;
        };
        let draggable = self.viewer.can_drag(&record);

        let mut gesture = lock(&self.gesture);
        if matches!(*gesture, GesturePhase::Dragging(_)) {
            return false;
        }
        *gesture = GesturePhase::Pressed {
            record_id: record_id.clone(),
            origin: point,
            draggable,
        };
        true
    }

    /// Track the pointer and the column under it. Returns whether a drag
    /// session is active after the move.
    pub fn pointer_move(&self, point: Point, over: Option<Status>) -> bool {
        let phase = lock(&self.gesture).clone();
        match phase {
            GesturePhase::Idle => false,
            GesturePhase::Pressed {
                record_id,
                origin,
                draggable,
            } => {
                if !draggable || !self.sensor.is_activated(origin, point) {
                    return false;
                }
                if !self.begin_drag(&record_id, origin) {
                    return false;
                }
                self.update_session(point, over);
                true
            }
            GesturePhase::Dragging(_) => {
                self.update_session(point, over);
                true
            }
        }
    }

    /// Release the pointer over `drop_target` (a column key), or outside
    /// every column
    pub async fn pointer_up(&self, drop_target: Option<&str>) -> GestureOutcome {
        let phase = std::mem::take(&mut *lock(&self.gesture));
        match phase {
            GesturePhase::Idle => GestureOutcome::Ignored,
            GesturePhase::Pressed { record_id, .. } => {
                debug!(%record_id, "press released before activation, treated as click");
                GestureOutcome::Clicked(record_id)
            }
            GesturePhase::Dragging(session) => self.finish_drag(session, drop_target).await,
        }
    }

    /// Abandon any press or drag without committing
    pub fn pointer_cancel(&self) {
        let phase = std::mem::take(&mut *lock(&self.gesture));
        if let GesturePhase::Dragging(session) = phase {
            debug!(record_id = %session.active_record_id, "drag cancelled");
            self.events.publish(BoardEvent::DragEnded {
                record_id: session.active_record_id,
                target: None,
            });
        }
    }

    // =========================================================================
    // Drag lifecycle callbacks
    // =========================================================================

    /// Open a drag session for `record_id` anchored at the pointer
    /// position `origin`. Only local state changes.
    pub fn on_drag_start(&self, record_id: &RecordId, origin: Point) -> bool {
        self.begin_drag(record_id, origin)
    }

    /// Close the session; a column key commits, `None` just cancels
    pub async fn on_drag_end(&self, drop_target: Option<&str>) -> GestureOutcome {
        let phase = std::mem::take(&mut *lock(&self.gesture));
        match phase {
            GesturePhase::Dragging(session) => self.finish_drag(session, drop_target).await,
            _ => GestureOutcome::Ignored,
        }
    }

    /// Move a record to the column identified by `target_key` without a
    /// gesture. The drag permission gate does not apply.
    pub async fn transition(&self, record_id: &RecordId, target_key: &str) -> Result<CommitOutcome> {
        let Some(record) = self.board.get(record_id) else {
            let to = target_key.parse::<Status>()?;
            return Ok(self.commits.commit(record_id, to, &self.viewer.name).await);
        };

        match classify_target(record.status, target_key)? {
            Transition::NoOp => {
                debug!(%record_id, status = %record.status, "dropped on own column");
                Ok(CommitOutcome::NoOp {
                    record_id: record_id.clone(),
                })
            }
            Transition::Effective { to, .. } => {
                Ok(self.commits.commit(record_id, to, &self.viewer.name).await)
            }
        }
    }

    fn begin_drag(&self, record_id: &RecordId, origin: Point) -> bool {
        let Some(record) = self.board.get(record_id) else {
            debug!(%record_id, "drag start on unknown record ignored");
            return false;
        };
        if !self.viewer.can_drag(&record) {
            debug!(%record_id, viewer = %self.viewer.name, "drag not permitted");
            return false;
        }

        {
            let mut gesture = lock(&self.gesture);
            if matches!(*gesture, GesturePhase::Dragging(_)) {
                return false;
            }
            *gesture = GesturePhase::Dragging(DragSession::new(record_id.clone(), origin));
        }

        debug!(%record_id, "drag started");
        self.events.publish(BoardEvent::DragStarted {
            record_id: record_id.clone(),
        });
        true
    }

    fn update_session(&self, point: Point, over: Option<Status>) {
        if let GesturePhase::Dragging(session) = &mut *lock(&self.gesture) {
            session.current = point;
            session.over = over;
        }
    }

    async fn finish_drag(&self, session: DragSession, drop_target: Option<&str>) -> GestureOutcome {
        let record_id = session.active_record_id;
        self.events.publish(BoardEvent::DragEnded {
            record_id: record_id.clone(),
            target: drop_target.and_then(|key| key.parse().ok()),
        });

        let Some(key) = drop_target else {
            debug!(%record_id, "dropped outside any column");
            return GestureOutcome::Cancelled { record_id };
        };

        match self.transition(&record_id, key).await {
            Ok(outcome) => GestureOutcome::Transition(outcome),
            Err(e) => {
                e.log("drop target rejected");
                GestureOutcome::Invalid {
                    record_id,
                    value: key.to_string(),
                }
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The four columns in board order with their visible cards
    pub fn columns(&self) -> Vec<ColumnView> {
        let visible = self.visible_records();
        let session = self.session();

        StatusColumn::all()
            .iter()
            .map(|column| ColumnView {
                column: *column,
                droppable: DroppableColumn::new(column.status, session.as_ref()),
                cards: visible
                    .iter()
                    .filter(|record| column.contains(record))
                    .map(|record| {
                        DraggableRecord::new(
                            record.clone(),
                            &self.viewer,
                            session.as_ref(),
                            self.dragging_opacity,
                        )
                    })
                    .collect(),
            })
            .collect()
    }

    /// Records passing the active filter, in board order
    pub fn visible_records(&self) -> Vec<Record> {
        let filter = self.filter();
        self.board
            .snapshot()
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    pub fn set_filter(&self, filter: BoardFilter) {
        *lock(&self.filter) = filter;
    }

    pub fn filter(&self) -> BoardFilter {
        lock(&self.filter).clone()
    }

    pub fn record(&self, record_id: &RecordId) -> Result<Record> {
        self.board
            .get(record_id)
            .ok_or_else(|| KanbanError::RecordNotFound {
                id: record_id.to_string(),
            })
    }

    pub fn phase_of(&self, record_id: &RecordId) -> RecordPhase {
        if self.commits.is_in_flight(record_id) {
            return RecordPhase::Committing;
        }
        match self.session() {
            Some(session) if &session.active_record_id == record_id => RecordPhase::Dragging,
            _ => RecordPhase::Idle,
        }
    }

    pub fn gesture(&self) -> GesturePhase {
        lock(&self.gesture).clone()
    }

    pub fn session(&self) -> Option<DragSession> {
        lock(&self.gesture).session().cloned()
    }

    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    pub fn active_record_id(&self) -> Option<RecordId> {
        self.session().map(|session| session.active_record_id)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    pub fn board(&self) -> &Arc<RecordBoard> {
        &self.board
    }

    /// Audit path for the host's create/delete and derived-field changes
    pub fn audit(&self) -> &Arc<AuditTrail> {
        &self.audit
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }
}

impl std::fmt::Debug for KanbanOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanbanOrchestrator")
            .field("viewer", &self.viewer)
            .field("sensor", &self.sensor)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}
