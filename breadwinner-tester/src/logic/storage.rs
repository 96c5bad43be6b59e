//! File-backed implementation of the core's session storage seam.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use breadwinner_game::{GameSession, SessionStorage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not a valid session: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Saves sessions as pretty-printed JSON files under one directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create the backing directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn new(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl SessionStorage for FileStorage {
    type Error = StorageError;

    fn save_session(&self, name: &str, session: &GameSession) -> Result<(), Self::Error> {
        let json = serde_json::to_string_pretty(session)?;
        fs::write(self.path_for(name), json)?;
        Ok(())
    }

    fn load_session(&self, name: &str) -> Result<Option<GameSession>, Self::Error> {
        let json = match fs::read_to_string(self.path_for(name)) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn delete_session(&self, name: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
