use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::Snapshot;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Sink the store flushes its whole state to after every mutation.
pub trait Persist {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError>;
}

impl<F> Persist for F
where
    F: FnMut(&Snapshot) -> Result<(), PersistError>,
{
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        self(snapshot)
    }
}

/// Writes the snapshot as pretty JSON, replacing the file atomically.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Persist for JsonFile {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), "store flushed");
        Ok(())
    }
}

/// Keeps nothing. For throwaway stores.
pub struct Discard;

impl Persist for Discard {
    fn save(&mut self, _snapshot: &Snapshot) -> Result<(), PersistError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::data::load_snapshot;
    use crate::models::QuizAttempt;

    use super::*;

    #[test]
    fn test_json_file_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut snapshot = Snapshot::default();
        snapshot.attempts.push(QuizAttempt {
            quiz_code: "ABC234".to_string(),
            answers: Vec::new(),
            completed_at: 5,
        });

        let mut file = JsonFile::new(&path);
        file.save(&snapshot).unwrap();

        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_unwritable_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be replaced by a file.
        let mut file = JsonFile::new(dir.path());

        assert!(matches!(
            file.save(&Snapshot::default()),
            Err(PersistError::Io { .. })
        ));
    }
}
