use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Snapshot;

/// Name of the blob the quizzes and attempts live in.
pub const DEFAULT_STORE_PATH: &str = "youandi-storage.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Restore the persisted state. A missing file is a fresh, empty store.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, LoadError> {
    let path = path.as_ref();

    let json_content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no saved quizzes yet, starting empty");
            return Ok(Snapshot::default());
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let snapshot: Snapshot =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        quizzes = snapshot.quizzes.len(),
        attempts = snapshot.attempts.len(),
        "restored saved quizzes"
    );

    Ok(snapshot)
}
