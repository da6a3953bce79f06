//! # HMS Core
//!
//! Core business logic for the hospital management system: the in-memory
//! data service and the session store.
//!
//! - [`HospitalService`] is the sole authority over the five entity
//!   collections (patients, doctors, appointments, medical records, bills).
//!   It owns its storage privately; there are no module-level globals. Every
//!   operation is asynchronous and may sleep for a configured duration to
//!   reproduce the simulated-network behaviour of a remote backend.
//! - [`SessionStore`] tracks at most one authenticated [`User`] per process
//!   and gates access for the routing layer above.
//!
//! **No API concerns**: HTTP servers, serialisation endpoints and CLI
//! plumbing belong in `api-shared`, the `hms-run` binary and `hms-cli`.

pub mod config;
pub mod error;
pub mod service;
pub mod session;
pub mod token;

mod demo;
mod stats;
mod store;

pub use config::{CoreConfig, LatencyProfile};
pub use error::{ServiceError, ServiceResult};
pub use hms_domain::User;
pub use service::{HospitalService, LoginOutcome};
pub use session::{AuthState, SessionStore};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
