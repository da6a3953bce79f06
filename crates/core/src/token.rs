//! Durable session-token storage.
//!
//! The session store persists a single opaque string token under a fixed key:
//! written on successful login, deleted on logout, read once at startup. The
//! token's *presence* is what matters to the session store; its value is
//! never inspected. [`FileTokenStore`] is the durable implementation standing
//! in for client-local storage; [`MemoryTokenStore`] backs tests.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed storage key for the session token.
pub const TOKEN_FILE_NAME: &str = "auth_token";

/// Storage for the single opaque session token.
///
/// Implementations must treat the token as opaque and must not validate it;
/// validation (or the current lack of it) is the session store's concern.
pub trait TokenStore: Send + Sync {
    /// Reads the stored token, if any.
    fn load(&self) -> io::Result<Option<String>>;

    /// Stores the token, replacing any previous value.
    fn save(&self, token: &str) -> io::Result<()>;

    /// Deletes the stored token. Deleting an absent token is not an error.
    fn clear(&self) -> io::Result<()>;
}

/// Token storage backed by a single file under a directory.
///
/// The file lives at `<dir>/auth_token`, the fixed-key slot in the client's
/// durable storage. Reads of a missing file map to `None`.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_FILE_NAME),
        }
    }

    /// The full path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim().to_owned();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory token storage for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// An empty store: no session survives "restart".
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a token, as if a previous session had
    /// logged in and the process restarted.
    pub fn preloaded(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        let guard = self.token.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        let mut guard = self.token.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        let mut guard = self.token.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_a_token() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FileTokenStore::new(dir.path());

        assert_eq!(store.load().expect("load"), None);

        store.save("mock-jwt-token").expect("save");
        assert_eq!(
            store.load().expect("load"),
            Some("mock-jwt-token".to_owned())
        );

        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn file_store_clear_of_missing_token_is_ok() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FileTokenStore::new(dir.path());
        store.clear().expect("clearing nothing succeeds");
    }

    #[test]
    fn file_store_treats_blank_file_as_absent() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FileTokenStore::new(dir.path());
        std::fs::write(store.path(), "  \n").expect("write blank file");
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn memory_store_preloaded_reports_its_token() {
        let store = MemoryTokenStore::preloaded("tok");
        assert_eq!(store.load().expect("load"), Some("tok".to_owned()));
        store.clear().expect("clear");
        assert_eq!(store.load().expect("load"), None);
    }
}
