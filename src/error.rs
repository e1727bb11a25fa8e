//! Error types for the Meridian graphics layer
//!
//! This module defines the error types used throughout the crate,
//! plus the `engine_err!` / `engine_bail!` macros used at validation
//! sites so rejected arguments are logged before the error is returned.

use std::fmt;

/// Result type for Meridian operations
pub type Result<T> = std::result::Result<T, Error>;

/// Meridian errors
#[derive(Debug, Clone)]
pub enum Error {
    /// An argument failed validation before reaching the native device
    InvalidArgument(String),

    /// The operation is not supported by the active device capabilities
    UnsupportedOperation(String),

    /// A resource reference is stale or unknown (texture, mesh, buffer)
    InvalidResource(String),

    /// Initialization failed (engine, device, subsystems)
    InitializationFailed(String),

    /// Backend-specific error reported by a device implementation
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== VALIDATION MACROS =====

/// Build an `Error::InvalidArgument`, logging it as an ERROR first
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("meridian::GraphicsBuffer", "stride {} is not valid", stride);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::meridian::Error::InvalidArgument(message)
    }};
}

/// Return early with an `Error::InvalidArgument`, logging it first
///
/// # Example
///
/// ```ignore
/// if desc.count == 0 {
///     engine_bail!("meridian::GraphicsBuffer", "count must be at least 1");
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
