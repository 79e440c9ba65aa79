use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::Error;

/// Where log lines go; the terminal itself belongs to the UI.
pub const DEFAULT_LOG_PATH: &str = "you-and-i.log";

/// Used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "you_and_i=info";

/// Send `tracing` output to `path`, appending to what is already there.
pub fn init(path: &Path) -> Result<(), Error> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}
