//! Opaque record identifiers for HMS entity collections.
//!
//! Every entity in the system is keyed by an opaque string identifier
//! assigned once at creation and never changed. To keep identifier handling
//! consistent across the codebase, HMS uses a *canonical* representation:
//! **32 lowercase hexadecimal characters** (no hyphens).
//!
//! This module provides a small wrapper type ([`RecordId`]) that guarantees
//! the canonical format once constructed.
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! Notes:
//! - This is the same value you would get from `Uuid::new_v4().simple().to_string()`.
//! - Canonical form is *required* for externally supplied identifiers (CLI or
//!   API inputs). Use [`RecordId::parse`] to validate an input string.
//! - Non-canonical values (uppercase, hyphenated, wrong length, non-hex) are
//!   rejected.
//!
//! Callers must treat the identifier as opaque: nothing outside this crate may
//! rely on how the value was derived.

mod record_id;

pub use record_id::RecordId;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
