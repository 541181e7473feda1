use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {}", e),
            StorageError::Serialization(e) => write!(f, "storage serialization error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e)
    }
}

/// File-per-key JSON store, the local equivalent of browser local storage.
///
/// Each key maps to `<dir>/<key>.json` holding a pretty-printed JSON value.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Reads the value stored under `key`. A missing key is `Ok(None)`;
    /// unreadable or unparsable content is an error.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }
}

/// A value bound to a storage key with publish-on-mutate subscriptions.
///
/// Mirrors the reactive `useLocalStorage` collaborator the store was designed
/// against: the value is loaded once at open (falling back to the supplied
/// default), every `update` persists the new state and notifies subscribers,
/// and persistence failures are logged rather than surfaced.
pub struct PersistedValue<T> {
    storage: LocalStorage,
    key: String,
    value: T,
    subscribers: Vec<Box<dyn Fn(&T)>>,
}

impl<T: Serialize + DeserializeOwned + Clone + PartialEq> PersistedValue<T> {
    pub fn open(storage: LocalStorage, key: &str, default: T) -> Self {
        let value = match storage.get(key) {
            Ok(Some(stored)) => stored,
            Ok(None) => default,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value unreadable, starting from default");
                default
            }
        };
        Self {
            storage,
            key: key.to_string(),
            value,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Applies `f` to the value; if the value actually changed, persists the
    /// result and notifies every subscriber. The write-back is
    /// fire-and-forget: a failure is logged and the in-memory value stays
    /// authoritative.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let before = self.value.clone();
        let result = f(&mut self.value);
        if self.value != before {
            if let Err(e) = self.storage.set(&self.key, &self.value) {
                tracing::warn!(key = %self.key, error = %e, "failed to persist value");
            }
            for subscriber in &self.subscribers {
                subscriber(&self.value);
            }
        }
        result
    }

    pub fn subscribe(&mut self, f: impl Fn(&T) + 'static) {
        self.subscribers.push(Box::new(f));
    }
}
