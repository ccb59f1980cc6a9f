//! Error severity classification shared by every AdminBoard crate
//!
//! Each crate defines its own `thiserror` enum and implements [`Severity`] for
//! it. Hosts use the severity to pick a log level and to decide whether an
//! error is worth surfacing to the end user at all.

/// Severity levels for error classification
///
/// - **Warning**: Potential issue but the operation can proceed, or the
///   failure is benign (a record vanished, an audit row was not written).
/// - **Error**: The operation failed and the user should be told, but the
///   system remains stable.
/// - **Critical**: The system cannot continue without attention.
///
/// # Examples
///
/// ```rust
/// use adminboard_common::ErrorSeverity;
///
/// // A dropped audit row does not undo the status change it describes
/// let audit_write = ErrorSeverity::Warning;
///
/// // The backend rejected the change and the card snapped back
/// let persistence = ErrorSeverity::Error;
///
/// assert!(persistence > audit_write);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,

    /// Operation failed but system can continue
    Error,

    /// System cannot continue, requires immediate attention
    Critical,
}

impl ErrorSeverity {
    /// The tracing level errors of this severity are logged at
    pub fn log_level(&self) -> tracing::Level {
        match self {
            Self::Warning => tracing::Level::WARN,
            Self::Error | Self::Critical => tracing::Level::ERROR,
        }
    }

    /// Whether errors of this severity are shown to the end user
    ///
    /// Warnings stay on the operational console.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Warning)
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use adminboard_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     StoreCorrupted,
///     Rejected,
///     Skipped,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::StoreCorrupted => ErrorSeverity::Critical,
///             MyError::Rejected => ErrorSeverity::Error,
///             MyError::Skipped => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(MyError::Rejected.severity(), ErrorSeverity::Error);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}
