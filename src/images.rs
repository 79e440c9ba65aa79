//! Image uploads for question choices.
//!
//! Only the returned URI is kept on the question; the bytes live in the
//! bucket.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Bucket every choice image is uploaded to.
pub const BUCKET: &str = "quiz-images";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not store {file_name}: {source}")]
    Store {
        file_name: String,
        #[source]
        source: io::Error,
    },
    #[error("no file URI for {}", path.display())]
    Uri { path: PathBuf },
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under `file_name` and return a URI that resolves to them.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, UploadError>;
}

/// A bucket kept in a local directory.
pub struct LocalBucket {
    dir: PathBuf,
}

impl LocalBucket {
    /// Files go to `<root>/quiz-images/`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(BUCKET),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ImageStore for LocalBucket {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, UploadError> {
        let store_err = |source| UploadError::Store {
            file_name: file_name.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(store_err)?;

        let target = self.dir.join(file_name);
        tokio::fs::write(&target, &bytes).await.map_err(store_err)?;

        let target = tokio::fs::canonicalize(&target).await.map_err(store_err)?;
        tracing::info!(file = %target.display(), size = bytes.len(), "image uploaded");

        Url::from_file_path(&target)
            .map(String::from)
            .map_err(|()| UploadError::Uri { path: target })
    }
}

/// `<uuid>.<ext>` keeping the extension of the source file, if any.
pub fn unique_file_name(source: &Path) -> String {
    let id = Uuid::new_v4();
    match source.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{id}.{}", ext.to_lowercase()),
        _ => id.to_string(),
    }
}

/// Read a local file and push it to `store` under a unique name.
pub async fn upload_file(store: &dyn ImageStore, source: &Path) -> Result<String, UploadError> {
    let bytes = tokio::fs::read(source)
        .await
        .map_err(|source_err| UploadError::Read {
            path: source.to_path_buf(),
            source: source_err,
        })?;

    store.upload(&unique_file_name(source), bytes).await
}
