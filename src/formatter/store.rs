//! Persistence of excerpt settings per field display.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{ExcerptError, ExcerptResult};
use crate::formatter::settings::ExcerptSettings;

/// Identifies a field within a display, e.g. `node.article.teaser` / `body`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DisplayKey {
    /// Display identifier.
    pub display: String,
    /// Field machine name.
    pub field: String,
}

impl DisplayKey {
    /// Create a key.
    #[must_use]
    pub fn new(display: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for DisplayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.display, self.field)
    }
}

/// Storage for excerpt settings.
///
/// Settings are validated on save and on load; a store never hands out
/// settings with a zero trim length.
pub trait SettingsStore: Send + Sync {
    /// Load settings for a field display, if any were saved.
    ///
    /// # Errors
    /// Returns an error if the backend fails or the stored settings are invalid.
    fn load(&self, key: &DisplayKey) -> ExcerptResult<Option<ExcerptSettings>>;

    /// Save settings for a field display.
    ///
    /// # Errors
    /// Returns an error if the settings are invalid or the backend fails.
    fn save(&self, key: &DisplayKey, settings: ExcerptSettings) -> ExcerptResult<()>;

    /// Load settings, using defaults when none were saved.
    ///
    /// # Errors
    /// Same as [`SettingsStore::load`].
    fn load_or_default(&self, key: &DisplayKey) -> ExcerptResult<ExcerptSettings> {
        Ok(self.load(key)?.unwrap_or_default())
    }
}

fn lock_poisoned() -> ExcerptError {
    ExcerptError::Io(std::io::Error::other("settings lock poisoned"))
}

/// Settings kept in process memory.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    entries: RwLock<BTreeMap<DisplayKey, ExcerptSettings>>,
}

impl InMemorySettingsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn load(&self, key: &DisplayKey) -> ExcerptResult<Option<ExcerptSettings>> {
        let entries = self.entries.read().map_err(|_| lock_poisoned())?;
        Ok(entries.get(key).copied())
    }

    fn save(&self, key: &DisplayKey, settings: ExcerptSettings) -> ExcerptResult<()> {
        settings.validate()?;
        let mut entries = self.entries.write().map_err(|_| lock_poisoned())?;
        entries.insert(key.clone(), settings);
        Ok(())
    }
}

/// Settings kept in a JSON file nested as `{display: {field: settings}}`.
///
/// The whole file is rewritten on every save, through a temporary file that
/// replaces the old one.
#[derive(Debug)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
    guard: RwLock<()>,
}

impl JsonFileSettingsStore {
    /// Open a store backed by `path`; the file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: RwLock::new(()),
        }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> ExcerptResult<StoredDisplays> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, all: &StoredDisplays) -> ExcerptResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(all)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

type StoredDisplays = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self, key: &DisplayKey) -> ExcerptResult<Option<ExcerptSettings>> {
        let _guard = self.guard.read().map_err(|_| lock_poisoned())?;
        let all = self.read_all()?;
        all.get(&key.display)
            .and_then(|fields| fields.get(&key.field))
            .map(ExcerptSettings::from_value)
            .transpose()
    }

    fn save(&self, key: &DisplayKey, settings: ExcerptSettings) -> ExcerptResult<()> {
        settings.validate()?;
        let _guard = self.guard.write().map_err(|_| lock_poisoned())?;
        let mut all = self.read_all()?;
        all.entry(key.display.clone())
            .or_default()
            .insert(key.field.clone(), serde_json::to_value(settings)?);
        self.write_all(&all)?;
        tracing::debug!("Saved excerpt settings for {key} to {}", self.path.display());
        Ok(())
    }
}
