//! Drag-and-drop primitives: pointer sensor, gesture state and the
//! draggable/droppable wrappers handed to the view layer

use crate::types::{Record, RecordId, Status};
use adminboard_config::DragConfig;
use serde::Serialize;

/// Pointer position in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Pointer-relative translation applied to a dragged card
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Translate {
    pub dx: f64,
    pub dy: f64,
}

/// Separates clicks from drags by travel distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSensor {
    activation_distance: f64,
}

impl PointerSensor {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            activation_distance,
        }
    }

    pub fn from_config(config: &DragConfig) -> Self {
        Self::new(config.activation_distance)
    }

    pub fn activation_distance(&self) -> f64 {
        self.activation_distance
    }

    /// Whether the pointer has travelled far enough to start a drag
    pub fn is_activated(&self, origin: Point, current: Point) -> bool {
        origin.distance_to(current) >= self.activation_distance
    }
}

/// The user looking at the board, for the drag permission gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Viewer {
    pub name: String,
    /// Broad edit rights (administrators)
    pub can_edit_all: bool,
}

impl Viewer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            can_edit_all: false,
        }
    }

    /// A viewer allowed to move every card
    pub fn editor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            can_edit_all: true,
        }
    }

    /// Assignees may drag their own cards; editors may drag any card
    pub fn can_drag(&self, record: &Record) -> bool {
        self.can_edit_all || (!record.assignee.is_empty() && record.assignee == self.name)
    }
}

/// An active drag, from activation to drop or cancel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragSession {
    pub active_record_id: RecordId,
    pub origin: Point,
    pub current: Point,
    /// Column under the pointer, if any
    pub over: Option<Status>,
}

impl DragSession {
    pub fn new(active_record_id: RecordId, origin: Point) -> Self {
        Self {
            active_record_id,
            origin,
            current: origin,
            over: None,
        }
    }

    pub fn offset(&self) -> Translate {
        Translate {
            dx: self.current.x - self.origin.x,
            dy: self.current.y - self.origin.y,
        }
    }
}

/// Per-gesture state: Idle → Pressed → Dragging → Idle
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pointer is down but has not moved past the activation distance
    Pressed {
        record_id: RecordId,
        origin: Point,
        draggable: bool,
    },
    Dragging(DragSession),
}

impl GesturePhase {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Dragging(session) => Some(session),
            _ => None,
        }
    }
}

/// Per-record state as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordPhase {
    Idle,
    Dragging,
    /// Optimistically applied, waiting on the backend
    Committing,
}

/// A card as the view layer draws it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraggableRecord {
    pub record: Record,
    /// Pointer input falls through to the click handler
    pub disabled: bool,
    pub is_dragging: bool,
    pub transform: Option<Translate>,
    pub opacity: f32,
}

impl DraggableRecord {
    pub fn new(
        record: Record,
        viewer: &Viewer,
        session: Option<&DragSession>,
        dragging_opacity: f32,
    ) -> Self {
        let disabled = !viewer.can_drag(&record);
        let active = session.filter(|s| s.active_record_id == record.id);
        Self {
            disabled,
            is_dragging: active.is_some(),
            transform: active.map(DragSession::offset),
            opacity: if active.is_some() {
                dragging_opacity
            } else {
                1.0
            },
            record,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }
}

/// A column as a drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DroppableColumn {
    pub status: Status,
    pub is_over: bool,
}

impl DroppableColumn {
    pub fn new(status: Status, session: Option<&DragSession>) -> Self {
        Self {
            status,
            is_over: session.is_some_and(|s| s.over == Some(status)),
        }
    }

    /// Key reported on drop
    pub fn key(&self) -> &'static str {
        self.status.label()
    }

    pub fn is_highlighted(&self) -> bool {
        self.is_over
    }
}
