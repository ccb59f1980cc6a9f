//! Strongly typed configuration for the kanban transition engine

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pointer travel, in logical pixels, before a press becomes a drag
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 8.0;

/// Card opacity while it is being dragged
pub const DEFAULT_DRAGGING_OPACITY: f32 = 0.5;

/// Window during which identical audit entries are collapsed
pub const DEFAULT_DEDUP_WINDOW_MS: u64 = 2000;

/// Number of distinct audit keys remembered by the deduplicator
pub const DEFAULT_DEDUP_CAPACITY: usize = 16;

/// Buffered board events per subscriber before lagging
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 64;

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanConfig {
    pub drag: DragConfig,
    pub audit: AuditConfig,
    pub events: EventConfig,
}

/// Drag sensor and visual feedback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Minimum pointer travel separating a click from a drag
    pub activation_distance: f64,
    /// Opacity applied to a card while it is dragged
    pub dragging_opacity: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            dragging_opacity: DEFAULT_DRAGGING_OPACITY,
        }
    }
}

/// Audit deduplication settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub dedup_window_ms: u64,
    pub dedup_capacity: usize,
}

impl AuditConfig {
    pub fn dedup_window(&self) -> Duration {
        Duration::from_millis(self.dedup_window_ms)
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            dedup_window_ms: DEFAULT_DEDUP_WINDOW_MS,
            dedup_capacity: DEFAULT_DEDUP_CAPACITY,
        }
    }
}

/// Board event channel settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub channel_capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl KanbanConfig {
    /// Reject values the engine cannot operate with
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.drag.activation_distance.is_finite() || self.drag.activation_distance <= 0.0 {
            return Err(ConfigError::invalid_value(
                "drag.activation_distance",
                format!("must be a positive number, got {}", self.drag.activation_distance),
            ));
        }
        if !(self.drag.dragging_opacity > 0.0 && self.drag.dragging_opacity <= 1.0) {
            return Err(ConfigError::invalid_value(
                "drag.dragging_opacity",
                format!("must be in (0, 1], got {}", self.drag.dragging_opacity),
            ));
        }
        if self.audit.dedup_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "audit.dedup_capacity",
                "must be at least 1",
            ));
        }
        if self.events.channel_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "events.channel_capacity",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
