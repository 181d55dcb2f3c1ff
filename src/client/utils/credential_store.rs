use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use keyring::Entry;
use log::{debug, warn};
use thiserror::Error;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "jwt";

const KEYRING_SERVICE: &str = "eventlink_app";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("keyring unavailable: {0}")]
    Keyring(String),
    #[error("storage file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Platform credential storage. Implementations are picked once at startup.
pub trait CredentialStore: Send + Sync {
    /// `Ok(None)` when the key is unset or holds only whitespace.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

// ---------------------------------------------------------------------------
// Native secure store
// ---------------------------------------------------------------------------

/// OS keyring (Keychain, Credential Manager, Secret Service).
///
/// When `fallback_dir` is set, values that cannot be written to the keyring
/// are persisted as plain files there instead. Only enable that explicitly.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
    fallback_dir: Option<PathBuf>,
}

impl KeyringStore {
    pub fn new(fallback_dir: Option<PathBuf>) -> Self {
        KeyringStore { service: KEYRING_SERVICE.to_string(), fallback_dir }
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        Entry::new(&self.service, key).map_err(|e| StoreError::Keyring(e.to_string()))
    }

    fn fallback_path(&self, key: &str) -> Option<PathBuf> {
        self.fallback_dir.as_ref().map(|dir| dir.join(format!("{}.token", key)))
    }

    fn read_fallback(&self, key: &str) -> Option<String> {
        let path = self.fallback_path(key)?;
        std::fs::read_to_string(path).ok().and_then(non_empty)
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(non_empty(value)),
            Err(keyring::Error::NoEntry) => Ok(self.read_fallback(key)),
            Err(e) => match self.read_fallback(key) {
                Some(value) => Ok(Some(value)),
                None if self.fallback_dir.is_some() => Ok(None),
                None => Err(StoreError::Keyring(e.to_string())),
            },
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let err = match self.entry(key).and_then(|entry| {
            entry.set_password(value).map_err(|e| StoreError::Keyring(e.to_string()))
        }) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        match self.fallback_path(key) {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, value)?;
                // never log the value itself
                warn!("[STORE] Keyring unavailable ({}), persisted '{}' to fallback file", err, key);
                Ok(())
            }
            None => Err(err),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let keyring_result = self.entry(key)?.delete_credential();
        if let Some(path) = self.fallback_path(key) {
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }
        keyring_deleted(key, keyring_result)
    }
}

/// A missing entry counts as deleted; any other failure means the value may
/// still be in the keyring.
fn keyring_deleted(key: &str, result: keyring::Result<()>) -> Result<(), StoreError> {
    match result {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => {
            warn!("[STORE] Keyring delete for '{}' failed: {}", key, e);
            Err(StoreError::Keyring(e.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// Browser-storage analogue
// ---------------------------------------------------------------------------

/// Page-local persistent key/value storage backed by one JSON object on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writers start over from an empty map when the file cannot be parsed,
    /// so a damaged file never blocks sign-in or sign-out.
    fn read_for_update(&self) -> Result<(BTreeMap<String, String>, bool), StoreError> {
        match self.read_all() {
            Ok(values) => Ok((values, false)),
            Err(StoreError::Corrupt(e)) => {
                warn!("[STORE] {} is corrupt ({}), overwriting", self.path.display(), e);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    /// Write to a sibling temp file and rename it over the target.
    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, serde_json::to_string_pretty(values)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_all()?.remove(key).and_then(non_empty))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let (mut values, _) = self.read_for_update()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let (mut values, corrupt) = self.read_for_update()?;
        if values.remove(key).is_some() || corrupt {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(TOKEN_KEY.to_string(), token.to_string());
        }
        store
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned().and_then(non_empty))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Token accessor
// ---------------------------------------------------------------------------

/// Reads and writes the bearer token under [`TOKEN_KEY`].
#[derive(Clone)]
pub struct TokenAccessor {
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for TokenAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAccessor").finish_non_exhaustive()
    }
}

impl TokenAccessor {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        TokenAccessor { store }
    }

    /// Absent both when unset and when the store cannot be read.
    pub fn get_token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!("[STORE] Error reading token: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token)?;
        debug!("[STORE] Token saved (redacted)");
        Ok(())
    }

    pub fn clear_token(&self) -> Result<(), StoreError> {
        self.store.delete(TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("web_storage.json");

        let first = FileStore::new(&path);
        assert_eq!(first.get(TOKEN_KEY).unwrap(), None);
        first.set(TOKEN_KEY, "abc").unwrap();
        first.set("theme", "dark").unwrap();

        let second = FileStore::new(&path);
        assert_eq!(second.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        second.delete(TOKEN_KEY).unwrap();
        second.delete(TOKEN_KEY).unwrap();
        assert_eq!(first.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(first.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("web_storage.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get(TOKEN_KEY), Err(StoreError::Corrupt(_))));

        // the accessor swallows read failures into absence
        let tokens = TokenAccessor::new(Arc::new(FileStore::new(&path)));
        assert_eq!(tokens.get_token(), None);
    }

    #[test]
    fn corrupt_file_is_overwritten_by_writers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("web_storage.json");
        std::fs::write(&path, r#"{"jwt": "abc""#).unwrap();

        let tokens = TokenAccessor::new(Arc::new(FileStore::new(&path)));
        assert_eq!(tokens.get_token(), None);
        tokens.set_token("fresh").unwrap();
        assert_eq!(tokens.get_token().as_deref(), Some("fresh"));
        assert!(!dir.path().join("web_storage.json.tmp").exists());

        std::fs::write(&path, "{").unwrap();
        tokens.clear_token().unwrap();
        let store = FileStore::new(&path);
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    }

    #[test]
    fn keyring_delete_failure_is_reported() {
        assert!(keyring_deleted(TOKEN_KEY, Ok(())).is_ok());
        assert!(keyring_deleted(TOKEN_KEY, Err(keyring::Error::NoEntry)).is_ok());

        let failure = keyring::Error::PlatformFailure(Box::new(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "locked",
        )));
        assert!(matches!(keyring_deleted(TOKEN_KEY, Err(failure)), Err(StoreError::Keyring(_))));
    }

    #[test]
    fn blank_values_read_as_absent() {
        let store = MemoryStore::with_token("   ");
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn accessor_round_trip() {
        let tokens = TokenAccessor::new(Arc::new(MemoryStore::new()));
        assert_eq!(tokens.get_token(), None);
        tokens.set_token("fake-jwt").unwrap();
        assert_eq!(tokens.get_token().as_deref(), Some("fake-jwt"));
        assert_eq!(tokens.get_token().as_deref(), Some("fake-jwt"));
        tokens.clear_token().unwrap();
        assert_eq!(tokens.get_token(), None);
    }
}
