//! Persisted location storage
//!
//! The last chosen coordinates (and display name) are stored as a JSON file
//! in an XDG-compliant config directory so the dashboard can come up without
//! a search on the next launch. Nothing else persists between runs.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// File name of the stored location inside the config directory
const LOCATION_FILE: &str = "location.json";

/// The coordinates the dashboard is currently pinned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLocation {
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
    /// Display name of the place, when one was chosen via search
    pub name: Option<String>,
}

/// Reads and writes the stored location on disk
///
/// Uses `~/.config/skycast/location.json` on Linux, or the equivalent XDG
/// path on other platforms. A missing or unparseable file simply means no
/// stored location.
#[derive(Debug, Clone)]
pub struct LocationStore {
    config_dir: PathBuf,
}

impl LocationStore {
    /// Creates a store rooted at the XDG-compliant config directory
    ///
    /// Returns `None` if the config directory cannot be determined (e.g. no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "skycast")?;
        let config_dir = project_dirs.config_dir().to_path_buf();
        Some(Self { config_dir })
    }

    /// Creates a store rooted at a custom directory
    ///
    /// Useful for testing or when a specific location is needed.
    #[allow(dead_code)]
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    fn location_path(&self) -> PathBuf {
        self.config_dir.join(LOCATION_FILE)
    }

    /// Loads the stored location, if one exists and parses
    pub fn load(&self) -> Option<StoredLocation> {
        let content = fs::read_to_string(self.location_path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persists the location, creating the config directory if needed
    pub fn save(&self, location: &StoredLocation) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;

        let json = serde_json::to_string_pretty(location)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.location_path(), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (LocationStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = LocationStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn lisbon() -> StoredLocation {
        StoredLocation {
            latitude: 38.7077507,
            longitude: -9.1365919,
            name: Some("Lisbon".to_string()),
        }
    }

    #[test]
    fn test_load_returns_none_when_missing() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let (store, _temp_dir) = create_test_store();
        let location = lisbon();

        store.save(&location).expect("Save should succeed");
        let loaded = store.load().expect("Should load saved location");

        assert_eq!(loaded, location);
    }

    #[test]
    fn test_save_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("config");
        let store = LocationStore::with_dir(nested.clone());

        store.save(&lisbon()).expect("Save should succeed");

        assert!(nested.join(LOCATION_FILE).exists());
    }

    #[test]
    fn test_save_overwrites_previous_location() {
        let (store, _temp_dir) = create_test_store();
        let first = lisbon();
        let second = StoredLocation {
            latitude: 51.5073219,
            longitude: -0.1276474,
            name: Some("London".to_string()),
        };

        store.save(&first).expect("First save should succeed");
        store.save(&second).expect("Second save should succeed");

        assert_eq!(store.load(), Some(second));
    }

    #[test]
    fn test_load_returns_none_for_corrupt_file() {
        let (store, temp_dir) = create_test_store();
        fs::create_dir_all(temp_dir.path()).expect("dir exists");
        fs::write(temp_dir.path().join(LOCATION_FILE), "not json").expect("write");

        assert!(store.load().is_none());
    }

    #[test]
    fn test_location_without_name_roundtrips() {
        let (store, _temp_dir) = create_test_store();
        let location = StoredLocation {
            latitude: 0.0,
            longitude: 0.0,
            name: None,
        };

        store.save(&location).expect("Save should succeed");
        assert_eq!(store.load(), Some(location));
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(store) = LocationStore::new() {
            let path_str = store.config_dir.to_string_lossy().to_string();
            assert!(
                path_str.contains("skycast"),
                "Config path should contain project name"
            );
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }
}
