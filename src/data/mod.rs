//! The persisted blob: every quiz by code plus the retained attempts.

mod loader;
mod persist;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Quiz, QuizAttempt};

pub use loader::{load_snapshot, LoadError, DEFAULT_STORE_PATH};
pub use persist::{Discard, JsonFile, Persist, PersistError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub quizzes: BTreeMap<String, Quiz>,
    #[serde(default)]
    pub attempts: Vec<QuizAttempt>,
}
