// Dashboard UI preferences.
// The only persisted UI state is whether the sidebar is expanded. It is read
// once when the store is opened and written back on every toggle.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    pub sidebar_expanded: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            sidebar_expanded: true,
        }
    }
}

/// JSON file backed preference store.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    preferences: UiPreferences,
}

impl PreferenceStore {
    /// Opens the store at `path`.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let preferences = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Preferences(format!("Failed to read {}: {}", path.display(), e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                Error::Preferences(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            UiPreferences::default()
        };

        Ok(Self { path, preferences })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferences(&self) -> UiPreferences {
        self.preferences
    }

    /// Flips the sidebar flag and persists it. Returns the new value.
    pub fn toggle_sidebar(&mut self) -> Result<bool> {
        self.preferences.sidebar_expanded = !self.preferences.sidebar_expanded;
        self.save()?;
        Ok(self.preferences.sidebar_expanded)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Preferences(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.preferences)?;
        fs::write(&self.path, json).map_err(|e| {
            Error::Preferences(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        tracing::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::open(dir.path().join("prefs.json")).unwrap();
        assert!(store.preferences().sidebar_expanded);
    }

    #[test]
    fn test_toggle_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = PreferenceStore::open(&path).unwrap();
        assert!(!store.toggle_sidebar().unwrap());

        let reopened = PreferenceStore::open(&path).unwrap();
        assert!(!reopened.preferences().sidebar_expanded);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();

        let err = PreferenceStore::open(&path).unwrap_err();
        assert!(matches!(err, Error::Preferences(_)));
    }
}
