//! The quiz/attempt store.
//!
//! Holds every quiz by code and at most one attempt per quiz. Each mutation
//! is flushed to the injected [`Persist`] sink. A failed flush keeps the
//! in-memory change and is reported through [`QuizStore::last_persist_error`].

use std::collections::HashSet;

use thiserror::Error;

use crate::code::{self, CodeError};
use crate::data::{Persist, Snapshot};
use crate::models::{Quiz, QuizAttempt, QuizDraft};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Code(#[from] CodeError),
}

pub struct QuizStore {
    state: Snapshot,
    persist: Box<dyn Persist>,
    last_persist_error: Option<String>,
}

impl QuizStore {
    /// Start from previously persisted state.
    pub fn new(state: Snapshot, persist: impl Persist + 'static) -> Self {
        Self {
            state,
            persist: Box::new(persist),
            last_persist_error: None,
        }
    }

    /// A fresh code not used by any stored quiz. Nothing is stored.
    pub fn generate_code(&self) -> Result<String, CodeError> {
        let existing: HashSet<&str> = self.state.quizzes.keys().map(String::as_str).collect();
        code::generate_code(&existing, &mut rand::thread_rng())
    }

    /// Store a new quiz under a freshly generated code and return the code.
    ///
    /// The draft is stored as given; checking its content is up to the caller.
    pub fn create_quiz(&mut self, draft: QuizDraft) -> Result<String, StoreError> {
        let code = self.generate_code()?;
        let quiz = Quiz::from_draft(draft, code.clone(), chrono::Utc::now().timestamp_millis());

        tracing::info!(code = %code, questions = quiz.questions.len(), "quiz created");
        self.state.quizzes.insert(code.clone(), quiz);
        self.flush();

        Ok(code)
    }

    /// Case-insensitive lookup.
    pub fn get_quiz(&self, code: &str) -> Option<&Quiz> {
        let quiz = self.state.quizzes.get(&code::normalize_code(code));
        if quiz.is_none() {
            tracing::debug!(code, "quiz not found");
        }
        quiz
    }

    /// Replace any attempt for the same quiz with this one.
    pub fn save_attempt(&mut self, mut attempt: QuizAttempt) {
        attempt.quiz_code = code::normalize_code(&attempt.quiz_code);

        self.state
            .attempts
            .retain(|a| a.quiz_code != attempt.quiz_code);

        tracing::info!(
            code = %attempt.quiz_code,
            answers = attempt.answers.len(),
            "attempt saved"
        );
        self.state.attempts.push(attempt);
        self.flush();
    }

    pub fn get_attempt(&self, code: &str) -> Option<&QuizAttempt> {
        let code = code::normalize_code(code);
        self.state.attempts.iter().rev().find(|a| a.quiz_code == code)
    }

    /// Remove a quiz together with its attempt.
    pub fn delete_quiz(&mut self, code: &str) -> Option<Quiz> {
        let code = code::normalize_code(code);
        let removed = self.state.quizzes.remove(&code)?;

        self.state.attempts.retain(|a| a.quiz_code != code);

        tracing::info!(code = %code, "quiz deleted");
        self.flush();

        Some(removed)
    }

    /// All quizzes, ordered by code.
    pub fn quizzes(&self) -> impl Iterator<Item = &Quiz> {
        self.state.quizzes.values()
    }

    pub fn attempts(&self) -> &[QuizAttempt] {
        &self.state.attempts
    }

    /// The error from the latest flush, if it failed.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    fn flush(&mut self) {
        match self.persist.save(&self.state) {
            Ok(()) => self.last_persist_error = None,
            Err(err) => {
                tracing::warn!(error = %err, "store not persisted; changes will be lost on restart");
                self.last_persist_error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use crate::data::{Discard, PersistError};
    use crate::models::{Answer, Choice, Question};

    use super::*;

    fn question(id: &str, expected: Choice) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("prompt {id}"),
            choice_a: "left".to_string(),
            choice_b: "right".to_string(),
            image_a: None,
            image_b: None,
            hint: None,
            expected_choice: Some(expected),
        }
    }

    fn draft() -> QuizDraft {
        QuizDraft {
            title: "Our Quiz".to_string(),
            description: None,
            questions: vec![
                question("1", Choice::A),
                question("2", Choice::B),
                question("3", Choice::A),
            ],
            secret_message: Some("see you tonight".to_string()),
        }
    }

    fn attempt(code: &str, choice: Choice) -> QuizAttempt {
        QuizAttempt {
            quiz_code: code.to_string(),
            answers: vec![Answer::new("1", choice)],
            completed_at: 1,
        }
    }

    #[test]
    fn test_create_and_get_quiz() {
        let mut store = QuizStore::new(Snapshot::default(), Discard);
        let code = store.create_quiz(draft()).unwrap();

        let quiz = store.get_quiz(&code).unwrap();
        assert_eq!(quiz.code, code);
        assert_eq!(quiz.title, "Our Quiz");
        assert_eq!(quiz.questions.len(), 3);
        assert!(quiz.created_at > 0);
    }

    #[test]
    fn test_get_quiz_ignores_case() {
        let mut store = QuizStore::new(Snapshot::default(), Discard);
        let code = store.create_quiz(draft()).unwrap();

        let upper = store.get_quiz(&code).unwrap();
        let lower = store.get_quiz(&code.to_lowercase()).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_get_quiz_miss_is_none() {
        let store = QuizStore::new(Snapshot::default(), Discard);
        assert!(store.get_quiz("ZZZZZZ").is_none());
    }

    #[test]
    fn test_created_codes_are_unique() {
        let mut store = QuizStore::new(Snapshot::default(), Discard);
        let codes: HashSet<String> = (0..200).map(|_| store.create_quiz(draft()).unwrap()).collect();
        assert_eq!(codes.len(), 200);
        assert_eq!(store.quizzes().count(), 200);
    }

    #[test]
    fn test_generate_code_stores_nothing() {
        let store = QuizStore::new(Snapshot::default(), Discard);
        let code = store.generate_code().unwrap();
        assert!(crate::code::is_valid_code(&code));
        assert!(store.get_quiz(&code).is_none());
    }

    #[test]
    fn test_second_attempt_replaces_first() {
        let mut store = QuizStore::new(Snapshot::default(), Discard);
        let code = store.create_quiz(draft()).unwrap();

        store.save_attempt(attempt(&code, Choice::A));
        let second = attempt(&code, Choice::B);
        store.save_attempt(second.clone());

        assert_eq!(store.get_attempt(&code), Some(&second));
        assert_eq!(
            store.attempts().iter().filter(|a| a.quiz_code == code).count(),
            1
        );
    }

    #[test]
    fn test_attempts_for_other_quizzes_survive() {
        let mut store = QuizStore::new(Snapshot::default(), Discard);
        store.save_attempt(attempt("AAAAAA", Choice::A));
        store.save_attempt(attempt("BBBBBB", Choice::A));
        store.save_attempt(attempt("aaaaaa", Choice::B));

        assert_eq!(store.attempts().len(), 2);
        assert_eq!(store.get_attempt("bbbbbb").unwrap().quiz_code, "BBBBBB");
        assert_eq!(store.get_attempt("AAAAAA").unwrap().answers[0].choice, Choice::B);
        assert!(store.get_attempt("CCCCCC").is_none());
    }

    #[test]
    fn test_delete_quiz_removes_quiz_and_attempt() {
        let mut store = QuizStore::new(Snapshot::default(), Discard);
        let code = store.create_quiz(draft()).unwrap();
        store.save_attempt(attempt(&code, Choice::A));

        let removed = store.delete_quiz(&code.to_lowercase()).unwrap();
        assert_eq!(removed.code, code);
        assert!(store.get_quiz(&code).is_none());
        assert!(store.get_attempt(&code).is_none());
        assert!(store.delete_quiz(&code).is_none());
    }

    #[test]
    fn test_every_mutation_is_flushed() {
        let saved: Rc<RefCell<Vec<Snapshot>>> = Rc::default();
        let sink = Rc::clone(&saved);
        let mut store = QuizStore::new(Snapshot::default(), move |s: &Snapshot| -> Result<(), PersistError> {
            sink.borrow_mut().push(s.clone());
            Ok(())
        });

        let code = store.create_quiz(draft()).unwrap();
        store.save_attempt(attempt(&code, Choice::A));
        store.delete_quiz(&code);

        let saved = saved.borrow();
        assert_eq!(saved.len(), 3);
        assert!(saved[0].quizzes.contains_key(&code));
        assert_eq!(saved[1].attempts.len(), 1);
        assert!(saved[2].quizzes.is_empty());
    }

    #[test]
    fn test_failed_flush_keeps_change_and_reports() {
        let mut store = QuizStore::new(Snapshot::default(), |_: &Snapshot| -> Result<(), PersistError> {
            Err(PersistError::Io {
                path: "full.json".into(),
                source: io::Error::other("quota exceeded"),
            })
        });

        let code = store.create_quiz(draft()).unwrap();
        assert!(store.get_quiz(&code).is_some());
        assert!(store.last_persist_error().unwrap().contains("quota exceeded"));
    }

    #[test]
    fn test_successful_flush_clears_persist_error() {
        let mut calls = 0;
        let mut store = QuizStore::new(
            Snapshot::default(),
            move |_: &Snapshot| -> Result<(), PersistError> {
                calls += 1;
                if calls == 1 {
                    Err(PersistError::Io {
                        path: "flaky.json".into(),
                        source: io::Error::other("disk busy"),
                    })
                } else {
                    Ok(())
                }
            },
        );

        let code = store.create_quiz(draft()).unwrap();
        assert!(store.last_persist_error().unwrap().contains("disk busy"));

        store.save_attempt(attempt(&code, Choice::B));
        assert_eq!(store.last_persist_error(), None);
    }

    #[test]
    fn test_restores_persisted_state() {
        let mut first = QuizStore::new(Snapshot::default(), Discard);
        let code = first.create_quiz(draft()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut file = crate::data::JsonFile::new(&path);
        file.save(&first.state).unwrap();

        let restored = QuizStore::new(crate::data::load_snapshot(&path).unwrap(), Discard);
        assert_eq!(restored.get_quiz(&code), first.get_quiz(&code));
    }
}
