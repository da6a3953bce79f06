//! The session store.
//!
//! Tracks at most one authenticated [`User`] for the lifetime of the process
//! (or until explicit logout). The routing layer above consults
//! [`SessionStore::current_user`] to gate access; the store itself delegates
//! credential handling to the data service's login operation.
//!
//! ## Startup token stub
//!
//! On construction the store reads the durable token slot once. If a token is
//! present, the session is eagerly treated as authenticated as the fixed
//! administrative user; the token's value is *never* validated against
//! anything. This is a documented placeholder, not a security design: a real
//! implementation must validate the token with a backend before trusting it.
//!
//! ## State machine
//!
//! ```text
//! Unauthenticated --login()--> Authenticating --success--> Authenticated
//!        ^                          |                          |
//!        |-----------failure--------'                          |
//!        '----------------------logout()----------------------'
//! ```
//!
//! The initial state is resolved synchronously by the startup token check,
//! before any route renders.

use crate::error::{ServiceError, ServiceResult};
use crate::service::{administrative_user, HospitalService};
use crate::token::TokenStore;
use hms_domain::User;
use std::sync::{Arc, RwLock};

/// Authentication state of the process.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthState {
    /// No identity; routes behind the gate must not render.
    Unauthenticated,
    /// A login call is in flight.
    Authenticating,
    /// The given user is signed in.
    Authenticated(User),
}

/// Tracks the current authenticated identity.
///
/// Cheap to clone; clones share one state cell and one token slot.
#[derive(Clone)]
pub struct SessionStore {
    service: HospitalService,
    tokens: Arc<dyn TokenStore>,
    state: Arc<RwLock<AuthState>>,
}

impl SessionStore {
    /// Creates the store and resolves the initial state from durable storage.
    ///
    /// A present token resolves to `Authenticated` as the fixed
    /// administrative user without any backend call (see the module docs for
    /// why this is a stub). An unreadable token slot logs a warning and
    /// resolves to `Unauthenticated`.
    pub fn new(service: HospitalService, tokens: Arc<dyn TokenStore>) -> Self {
        let initial = match tokens.load() {
            Ok(Some(_)) => AuthState::Authenticated(administrative_user()),
            Ok(None) => AuthState::Unauthenticated,
            Err(e) => {
                tracing::warn!("failed to read stored session token: {e}");
                AuthState::Unauthenticated
            }
        };

        Self {
            service,
            tokens,
            state: Arc::new(RwLock::new(initial)),
        }
    }

    fn set_state(&self, next: AuthState) {
        let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
    }

    /// The current state, including the transient `Authenticating` phase.
    pub fn state(&self) -> AuthState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Synchronous read of the current identity.
    pub fn current_user(&self) -> Option<User> {
        match self.state() {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Signs in via the data service and persists the issued token.
    ///
    /// With the mock login this always succeeds; the error paths stay live
    /// for the day a real credential check replaces it. On any failure the
    /// store falls back to `Unauthenticated`.
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<User> {
        self.set_state(AuthState::Authenticating);

        let outcome = match self.service.login(username, password).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.set_state(AuthState::Unauthenticated);
                return Err(e);
            }
        };

        if let Err(e) = self.tokens.save(&outcome.token) {
            self.set_state(AuthState::Unauthenticated);
            return Err(ServiceError::TokenStorage(e));
        }

        self.set_state(AuthState::Authenticated(outcome.user.clone()));
        Ok(outcome.user)
    }

    /// Signs out. Never fails: a token-slot fault is swallowed and logged,
    /// and the in-process identity is cleared regardless. Intentional,
    /// documented behaviour; a hardened implementation should surface it.
    pub async fn logout(&self) {
        self.service.logout().await;

        if let Err(e) = self.tokens.clear() {
            tracing::warn!("failed to clear stored session token: {e}");
        }

        self.set_state(AuthState::Unauthenticated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::token::{FileTokenStore, MemoryTokenStore};

    fn service() -> HospitalService {
        HospitalService::new(CoreConfig::instant())
    }

    #[test]
    fn starts_unauthenticated_without_a_stored_token() {
        let store = SessionStore::new(service(), Arc::new(MemoryTokenStore::new()));
        assert_eq!(store.state(), AuthState::Unauthenticated);
        assert!(store.current_user().is_none());
    }

    #[test]
    fn stored_token_resolves_to_the_administrative_user_at_startup() {
        // Any token value counts; it is never validated.
        let tokens = Arc::new(MemoryTokenStore::preloaded("left-over-token"));
        let store = SessionStore::new(service(), tokens);

        let user = store.current_user().expect("authenticated at startup");
        assert_eq!(user.username, "admin");
        assert!(matches!(store.state(), AuthState::Authenticated(_)));
    }

    #[tokio::test]
    async fn login_then_current_user_round_trip() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(service(), tokens.clone());

        let user = store.login("admin", "password").await.expect("mock login");
        assert_eq!(store.current_user(), Some(user));
        assert!(tokens
            .load()
            .expect("readable slot")
            .is_some(), "login must persist the issued token");
    }

    #[tokio::test]
    async fn logout_clears_identity_and_token() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(service(), tokens.clone());

        store.login("admin", "password").await.expect("mock login");
        store.logout().await;

        assert!(store.current_user().is_none());
        assert_eq!(store.state(), AuthState::Unauthenticated);
        assert_eq!(tokens.load().expect("readable slot"), None);
    }

    #[tokio::test]
    async fn session_survives_a_simulated_restart() {
        let dir = tempfile::tempdir().expect("create temp dir");

        {
            let tokens = Arc::new(FileTokenStore::new(dir.path()));
            let store = SessionStore::new(service(), tokens);
            store.login("admin", "password").await.expect("mock login");
        }

        // New process: a fresh store over the same directory.
        let tokens = Arc::new(FileTokenStore::new(dir.path()));
        let store = SessionStore::new(service(), tokens);
        assert!(store.current_user().is_some());
    }

    #[tokio::test]
    async fn clones_observe_the_same_session() {
        let store = SessionStore::new(service(), Arc::new(MemoryTokenStore::new()));
        let clone = store.clone();

        store.login("admin", "password").await.expect("mock login");
        assert!(clone.current_user().is_some());

        clone.logout().await;
        assert!(store.current_user().is_none());
    }
}
