// Persisted configuration: a single flat JSON record holding everything
// the uploader needs between runs. Read and written wholesale; callers
// mutate a loaded copy in memory and write the full record back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The six answers collected on the first run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub token: String,
    pub username: String,
    pub repo_name: String,
    pub folder_path: String,
    pub is_public: bool,
    pub commit_msg: String,
}

/// Result of trying to read the config file. A missing file and an
/// unparseable one both restart the first-run wizard, but they are
/// distinct outcomes so the session can tell the user about the latter.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Config),
    Absent,
    Corrupt,
}

/// Load/save wrapper around the config file. Constructed with an explicit
/// path so tests can point it at a temp directory.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    /// Default location: `.gitup_config.json` in the user's home directory.
    pub fn default_location() -> Self {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        ConfigStore {
            path: dir.join(".gitup_config.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> LoadOutcome {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(_) => return LoadOutcome::Absent,
        };
        match serde_json::from_str(&data) {
            Ok(config) => LoadOutcome::Loaded(config),
            Err(_) => LoadOutcome::Corrupt,
        }
    }

    /// Serializes the full record, overwriting any prior file. No partial
    /// merge and no locking; concurrent invocations are unsupported.
    pub fn save(&self, config: &Config) -> Result<()> {
        let data = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, data)
            .with_context(|| format!("Failed to write config to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            token: "ghp_abc123".into(),
            username: "alice".into(),
            repo_name: "proj".into(),
            folder_path: "/tmp/proj".into(),
            is_public: true,
            commit_msg: "init".into(),
        }
    }

    #[test]
    fn round_trips_saved_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        let config = sample();
        store.save(&config).unwrap();
        match store.load() {
            LoadOutcome::Loaded(loaded) => assert_eq!(loaded, config),
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nope.json"));
        assert!(matches!(store.load(), LoadOutcome::Absent));
    }

    #[test]
    fn unparseable_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json at all").unwrap();
        let store = ConfigStore::new(path);
        assert!(matches!(store.load(), LoadOutcome::Corrupt));
    }

    #[test]
    fn save_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        let mut config = sample();
        store.save(&config).unwrap();
        config.repo_name = "other".into();
        config.is_public = false;
        store.save(&config).unwrap();
        match store.load() {
            LoadOutcome::Loaded(loaded) => {
                assert_eq!(loaded.repo_name, "other");
                assert!(!loaded.is_public);
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
    }
}
