//! Durable key-value preference storage.
//!
//! Modeled after browser local storage: reads and writes never fail from the
//! caller's point of view. [`FilePreferences`] logs IO problems and carries on.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key holding the last chosen language code.
pub const LANGUAGE_PREFERENCE_KEY: &str = "kalenex-lang";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);
}

/// Preferences kept in memory; counts writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Preferences persisted as a flat JSON object on disk.
///
/// The file is read once on open and rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Open `path`, starting empty when it does not exist or cannot be parsed.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match load(&path) {
            Ok(values) => values,
            Err(e) => {
                warn!("Ignoring unreadable preferences file: {:#}", e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create preferences directory {}", parent.display())
                })?;
            }
        }
        let json = serde_json::to_string_pretty(&self.values)
            .context("Failed to serialize preferences")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))
    }
}

fn load(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        debug!("No preferences file at {}", path.display());
        return Ok(BTreeMap::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save() {
            warn!("Preference '{}' kept in memory only: {:#}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_preferences_count_writes() {
        let mut prefs = MemoryPreferences::new().with_value(LANGUAGE_PREFERENCE_KEY, "es");
        assert_eq!(prefs.writes(), 0);
        assert_eq!(prefs.get(LANGUAGE_PREFERENCE_KEY).as_deref(), Some("es"));

        prefs.set(LANGUAGE_PREFERENCE_KEY, "en");
        assert_eq!(prefs.writes(), 1);
        assert_eq!(prefs.get(LANGUAGE_PREFERENCE_KEY).as_deref(), Some("en"));
    }

    #[test]
    fn test_file_preferences_persist_across_opens() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("prefs.json");

        let mut prefs = FilePreferences::open(&path);
        assert_eq!(prefs.get(LANGUAGE_PREFERENCE_KEY), None);
        prefs.set(LANGUAGE_PREFERENCE_KEY, "es");

        let reopened = FilePreferences::open(&path);
        assert_eq!(reopened.get(LANGUAGE_PREFERENCE_KEY).as_deref(), Some("es"));
    }

    #[test]
    fn test_file_preferences_ignore_corrupt_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, "{ definitely not json").unwrap();

        let mut prefs = FilePreferences::open(&path);
        assert_eq!(prefs.get(LANGUAGE_PREFERENCE_KEY), None);

        prefs.set(LANGUAGE_PREFERENCE_KEY, "en");
        let reopened = FilePreferences::open(&path);
        assert_eq!(reopened.get(LANGUAGE_PREFERENCE_KEY).as_deref(), Some("en"));
    }

    #[test]
    fn test_file_preferences_write_failure_keeps_value_in_memory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        // A directory where the file should be makes every write fail
        let path = temp_dir.path().join("prefs.json");
        std::fs::create_dir(&path).unwrap();

        let mut prefs = FilePreferences::open(&path);
        prefs.set(LANGUAGE_PREFERENCE_KEY, "es");

        assert_eq!(prefs.get(LANGUAGE_PREFERENCE_KEY).as_deref(), Some("es"));
    }
}
