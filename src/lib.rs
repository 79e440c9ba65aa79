//! # you-and-i
//!
//! A "Would You Rather" quiz for two, played in the terminal.
//!
//! One person writes a handful of either/or questions, answers them
//! and shares the six character code. The other takes the quiz with
//! that code and sees how many answers matched.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use clap::Parser;
//! use you_and_i::{run, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), you_and_i::Error> {
//!     run(Config::parse()).await
//! }
//! ```

mod app;
pub mod code;
mod config;
pub mod data;
pub mod images;
mod logging;
pub mod models;
mod runner;
pub mod scoring;
mod state;
pub mod store;
pub mod terminal;
mod ui;
pub mod validation;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

pub use app::App;
pub use config::{Config, StartRoute};
pub use data::{load_snapshot, LoadError, Snapshot};
pub use images::{ImageStore, LocalBucket};
pub use models::{Answer, Choice, Question, Quiz, QuizAttempt, QuizDraft};
pub use scoring::Score;
pub use store::QuizStore;

/// Errors that stop the program.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load the quiz store: {0}")]
    Load(#[from] LoadError),

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },

    #[error("logging is already set up: {0}")]
    Logging(String),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Load the store, open the starting screen and run until the user quits.
pub async fn run(config: Config) -> Result<(), Error> {
    logging::init(&config.log_file)?;
    tracing::info!(store = %config.store.display(), images = %config.images.display(), "starting");

    let snapshot = load_snapshot(&config.store)?;
    let store = QuizStore::new(snapshot, data::JsonFile::new(&config.store));
    let images = Arc::new(LocalBucket::new(&config.images));
    let (uploads_tx, uploads_rx) = mpsc::unbounded_channel();

    let mut app = App::new(store, images, uploads_tx);
    match config.start_route() {
        StartRoute::Landing => {}
        StartRoute::Take(code) => app.open_take(Some(&code)),
        StartRoute::Results(code) => app.open_results(&code),
    }

    runner::run(&mut app, uploads_rx).await?;
    Ok(())
}
