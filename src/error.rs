//! Crate error type.
//!
//! Errors only come out of parsing and validation helpers. The widget runtime
//! itself never fails: it logs the rejected value and degrades.

/// Errors from configuration parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToastError {
    /// A corner name that is not one of the four supported corners.
    #[error("unknown corner '{0}': expected top-left, top-right, bottom-left or bottom-right")]
    UnknownCorner(String),

    /// A notification duration that is not strictly positive.
    #[error("notification duration must be positive, got {0}ms")]
    InvalidDuration(u32),

    /// A locale tag that is not two ASCII letters.
    #[error("invalid locale tag '{0}'")]
    InvalidLocale(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ToastError>;
