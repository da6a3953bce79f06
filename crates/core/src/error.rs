//! Error types for the data service and session store.
//!
//! Absence of a record is deliberately *not* an error: `get` and `update`
//! return `Option`, `delete` returns `bool`, and callers check rather than
//! catch. The variants here cover the faults that genuinely are failures.

/// Errors raised by the data service and session store.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Login credentials were rejected.
    ///
    /// Unreachable through the current mock login, which accepts any
    /// credentials; kept representable so a real credential check can slot in
    /// without changing caller contracts.
    #[error("authentication failed for user '{username}'")]
    AuthenticationFailed {
        /// The username that failed to authenticate.
        username: String,
    },

    /// The durable session token could not be read or written.
    #[error("session token storage failed: {0}")]
    TokenStorage(#[from] std::io::Error),
}

/// Result type for data-service and session operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
