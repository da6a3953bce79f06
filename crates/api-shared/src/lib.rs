//! # API Shared
//!
//! Shared utilities and definitions for the HMS HTTP surface.
//!
//! Contains:
//! - `HealthService` and its response shape
//! - Authentication request/response DTOs
//! - The `ApiError` type mapping core outcomes onto HTTP responses
//!
//! Used by the `hms-run` REST binary; keeping these here means any future
//! second surface (another binary, an RPC layer) reuses the same contracts.

pub mod auth;
pub mod error;
pub mod health;

pub use auth::{LoginRequest, LoginResponse};
pub use error::ApiError;
pub use health::{HealthService, HealthStatus};
