use crate::config::SessionStoreKind;
use crate::error::{ApiError, Result};
use crate::models::User;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";

/// Synchronous string key/value storage for session state.
///
/// Implementations never fail loudly: a read that cannot be served returns
/// `None`, a write that cannot be persisted is logged.
pub trait KeyValueStore: Debug + Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

fn lock(map: &Mutex<HashMap<String, String>>) -> MutexGuard<'_, HashMap<String, String>> {
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        lock(&self.entries).insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        lock(&self.entries).remove(key);
    }
}

/// Storage for contexts with no user session at all (batch jobs,
/// server-side rendering): reads are always empty, writes are dropped
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, key: &str, _value: &str) {
        debug!(key, "Session storage disabled, dropping write");
    }

    fn remove(&self, _key: &str) {}
}

/// JSON file on disk, rewritten on every change
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open `path`, starting empty if it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Session file is corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(ApiError::Storage(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(entries)?;
            std::fs::write(&self.path, json)
        })();
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "Failed to persist session file");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

/// Typed access to the stored tokens and user record
#[derive(Debug, Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(NullStore))
    }

    /// Pick the backend named in configuration
    pub fn from_kind(kind: &SessionStoreKind) -> Result<Self> {
        Ok(match kind {
            SessionStoreKind::File(path) => {
                let store = FileStore::open(path)?;
                debug!(path = %store.path().display(), "Session stored on disk");
                Self::new(Arc::new(store))
            }
            SessionStoreKind::Memory => Self::in_memory(),
            SessionStoreKind::Disabled => Self::disabled(),
        })
    }

    pub fn get_access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    pub fn get_refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY)
    }

    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) {
        self.store.set(ACCESS_TOKEN_KEY, access_token);
        self.store.set(REFRESH_TOKEN_KEY, refresh_token);
    }

    pub fn set_access_token(&self, access_token: &str) {
        self.store.set(ACCESS_TOKEN_KEY, access_token);
    }

    /// Remove both tokens and the user record
    pub fn clear_tokens(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(REFRESH_TOKEN_KEY);
        self.store.remove(USER_KEY);
    }

    pub fn set_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(USER_KEY, &json),
            Err(e) => warn!(error = %e, "Failed to serialize user record"),
        }
    }

    pub fn get_stored_user(&self) -> Option<User> {
        let json = self.store.get(USER_KEY)?;
        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user record is unreadable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::fixtures;

    #[test]
    fn clear_removes_everything() {
        let session = SessionStore::in_memory();
        session.set_tokens("access", "refresh");
        session.set_user(&fixtures::user_profile());
        assert_eq!(session.get_access_token().as_deref(), Some("access"));

        session.clear_tokens();

        assert!(session.get_access_token().is_none());
        assert!(session.get_refresh_token().is_none());
        assert!(session.get_stored_user().is_none());
    }

    #[test]
    fn disabled_store_reads_nothing() {
        let session = SessionStore::disabled();
        session.set_tokens("access", "refresh");
        session.set_user(&fixtures::user_profile());
        assert!(session.get_access_token().is_none());
        assert!(session.get_stored_user().is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let session = SessionStore::from_kind(&SessionStoreKind::File(path.clone())).unwrap();
        session.set_tokens("access", "refresh");
        session.set_user(&fixtures::user_profile());

        let reopened = SessionStore::from_kind(&SessionStoreKind::File(path)).unwrap();
        assert_eq!(reopened.get_refresh_token().as_deref(), Some("refresh"));
        assert_eq!(reopened.get_stored_user(), Some(fixtures::user_profile()));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert!(store.get(ACCESS_TOKEN_KEY).is_none());
    }

    #[test]
    fn garbage_user_record_reads_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(USER_KEY, "nope");
        let session = SessionStore::new(store);
        assert!(session.get_stored_user().is_none());
    }
}
