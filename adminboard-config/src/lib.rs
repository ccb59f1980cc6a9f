//! AdminBoard configuration management using Figment
//!
//! Loads [`KanbanConfig`] with clear precedence:
//! defaults → `~/.adminboard/kanban.*` → `./.adminboard/kanban.*` → env.
//!
//! ```no_run
//! use adminboard_config::load_configuration;
//!
//! let config = load_configuration()?;
//! println!("drag threshold: {}px", config.drag.activation_distance);
//! # Ok::<(), adminboard_config::ConfigError>(())
//! ```
//!
//! # Environment Variables
//!
//! ```bash
//! export ADMINBOARD_AUDIT__DEDUP_WINDOW_MS=2000   # → audit.dedup_window_ms
//! export ADMINBOARD_DRAG__ACTIVATION_DISTANCE=8   # → drag.activation_distance
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{
    AuditConfig, DragConfig, EventConfig, KanbanConfig, DEFAULT_ACTIVATION_DISTANCE,
    DEFAULT_DEDUP_CAPACITY, DEFAULT_DEDUP_WINDOW_MS, DEFAULT_DRAGGING_OPACITY,
    DEFAULT_EVENT_CHANNEL_CAPACITY,
};

/// Load the engine configuration from all standard sources
pub fn load_configuration() -> ConfigResult<KanbanConfig> {
    ConfigProvider::new().load()
}
