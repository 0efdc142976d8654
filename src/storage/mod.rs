//! Local state file.
//!
//! The whole session is kept as one JSON document under the data directory. Loading
//! always repairs the state (see [`Session::restore`]).

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::session::Session;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join("state.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Reads and writes the session state file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.state_path())
    }

    /// Load the session. A missing file is an empty session.
    pub fn load(&self) -> Result<Session, StorageError> {
        if !self.path.exists() {
            debug!("No state file at {:?}, starting empty", self.path);
            return Ok(Session::new());
        }

        let file = File::open(&self.path)?;
        let mut session: Session = serde_json::from_reader(BufReader::new(file))?;
        session.restore();

        debug!(
            "Loaded {} tournaments from {:?}",
            session.tournaments().len(),
            self.path
        );
        Ok(session)
    }

    /// Write the session, replacing the file.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Sibling temp file, then rename over the old state.
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, session)?;
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        info!(
            "Saved {} tournaments to {:?}",
            session.tournaments().len(),
            self.path
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> StateStore {
        StateStore::from_config(&StorageConfig::new(temp_dir.path().join("data")))
    }

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        assert_eq!(config.state_path(), PathBuf::from("/data/state.json"));
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        assert!(!temp_dir.path().join("data/state.json").exists());
        let session = store.load().unwrap();
        assert!(session.tournaments().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let mut session = Session::new();
        session.create_tournament("Cup", &["A", "B"]).unwrap();
        session.generate_series(2).unwrap();
        session.record_result(1, 9, 1).unwrap();

        store.save(&session).unwrap();
        assert!(temp_dir.path().join("data/state.json").exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let mut session = Session::new();
        session.create_tournament("First", &["A"]).unwrap();
        store.save(&session).unwrap();

        session.delete_active_tournament().unwrap();
        store.save(&session).unwrap();

        assert!(store.load().unwrap().tournaments().is_empty());
    }

    #[test]
    fn test_load_repairs_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(
            &path,
            r#"{
                "tournaments": [{
                    "id": "x",
                    "name": "Loaded",
                    "created_at": "2025-10-17T12:00:00Z",
                    "teams": [
                        {"id": "a", "name": "A", "slot": 1},
                        {"id": "b", "name": "B", "slot": 2}
                    ],
                    "matches": [
                        {"name": "Match 1", "played_at": "2025-10-17T12:00:00Z", "results": [{"kills": -2}]}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let session = StateStore::new(path).load().unwrap();
        assert_eq!(session.active_index(), Some(0));
        assert_eq!(session.current_match_index(), Some(0));
        assert_eq!(session.current().unwrap().results().len(), 2);
        assert_eq!(session.current().unwrap().result_for(0).kills, 0);
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let err = StateStore::new(path).load().unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }
}
