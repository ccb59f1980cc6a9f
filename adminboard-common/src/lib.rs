//! # AdminBoard Common
//!
//! Foundational pieces shared by the AdminBoard crates:
//!
//! - [`error`] - severity classification for crate-specific error enums
//! - [`logging`] - the `Pretty` log formatter and tracing initialisation

pub mod error;
pub mod logging;

pub use error::{ErrorSeverity, Severity};
pub use logging::{init_tracing, Pretty, DEFAULT_LOG_FILTER};
