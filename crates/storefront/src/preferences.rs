//! User preferences and their durable snapshot.
//!
//! Preferences are loaded once at startup and overwritten wholesale when the
//! registration flow completes. The snapshot is a single key in a
//! [`SnapshotStore`] holding the JSON-encoded [`UserPreferences`].
//!
//! A missing or malformed snapshot is never fatal: [`PreferenceStore::load`]
//! logs the problem and falls back to empty preferences.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use marmita_core::TagSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Errors from the snapshot backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Declared allergies and dietary goals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Lower-cased, insertion-ordered.
    #[serde(default)]
    pub allergies: TagSet,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl UserPreferences {
    /// Build preferences; goals are trimmed and de-duplicated, allergies
    /// are normalized.
    #[must_use]
    pub fn new<A, G>(allergies: A, goals: G) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let mut unique_goals: Vec<String> = Vec::new();
        for goal in goals {
            let goal = goal.as_ref().trim();
            if !goal.is_empty() && !unique_goals.iter().any(|g| g == goal) {
                unique_goals.push(goal.to_string());
            }
        }

        Self {
            allergies: allergies.into_iter().collect(),
            goals: unique_goals,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allergies.is_empty() && self.goals.is_empty()
    }
}

/// A named key-value entry holding text snapshots.
pub trait SnapshotStore {
    /// Read the snapshot for `key`, or `None` if it has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the backend fails.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the snapshot for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the backend fails.
    fn write(&mut self, key: &str, snapshot: &str) -> Result<(), StoreError>;
}

/// Snapshots as `<dir>/<key>.json` files.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, snapshot: &str) -> Result<(), StoreError> {
        let to_write_error = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(to_write_error)?;

        // Replace via rename; readers never see a partial snapshot.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, snapshot).map_err(to_write_error)?;
        std::fs::rename(&tmp, &path).map_err(to_write_error)?;
        Ok(())
    }
}

/// Snapshots held in memory, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: HashMap<String, String>,
}

impl MemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a raw snapshot.
    #[must_use]
    pub fn with_entry(mut self, key: &str, snapshot: &str) -> Self {
        self.entries.insert(key.to_string(), snapshot.to_string());
        self
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, snapshot: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), snapshot.to_string());
        Ok(())
    }
}

/// Loads and saves [`UserPreferences`] under one snapshot key.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    backend: S,
    key: String,
}

impl<S: SnapshotStore> PreferenceStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Restore the snapshot, degrading to defaults when absent or unreadable.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> UserPreferences {
        let snapshot = match self.backend.read(&self.key) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!("No preference snapshot, using defaults");
                return UserPreferences::default();
            }
            Err(e) => {
                warn!(error = %e, "Preference snapshot unreadable, using defaults");
                return UserPreferences::default();
            }
        };

        match serde_json::from_str::<UserPreferences>(&snapshot) {
            Ok(prefs) => {
                debug!(
                    allergies = prefs.allergies.len(),
                    goals = prefs.goals.len(),
                    "Preferences restored"
                );
                prefs
            }
            Err(e) => {
                warn!(error = %e, "Malformed preference snapshot, using defaults");
                UserPreferences::default()
            }
        }
    }

    /// Overwrite the snapshot with the full preferences value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or the backend write fails.
    #[instrument(skip(self, prefs), fields(key = %self.key))]
    pub fn save(&mut self, prefs: &UserPreferences) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string(prefs)?;
        self.backend.write(&self.key, &snapshot)?;
        info!(
            allergies = prefs.allergies.len(),
            goals = prefs.goals.len(),
            "Preferences saved"
        );
        Ok(())
    }
}
