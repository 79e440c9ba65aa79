use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::code;
use crate::images::{self, ImageStore, UploadError};
use crate::models::{Answer, Choice, QuizAttempt};
use crate::state::{CreateState, CreateStep, Screen, SecretState, TakeState};
use crate::store::QuizStore;
use crate::validation;

/// How long a notice stays on screen.
const NOTICE_LIFETIME: Duration = Duration::from_secs(4);
const MAX_NOTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient message in the corner of the screen.
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub kind: NoticeKind,
    shown_at: Instant,
}

/// Result of an image upload, delivered back to the editor.
#[derive(Debug)]
pub struct UploadEvent {
    pub question_id: String,
    pub side: Choice,
    pub result: Result<String, UploadError>,
}

pub struct App {
    pub screen: Screen,
    store: QuizStore,
    images: Arc<dyn ImageStore>,
    uploads: mpsc::UnboundedSender<UploadEvent>,
    notices: Vec<Notice>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        store: QuizStore,
        images: Arc<dyn ImageStore>,
        uploads: mpsc::UnboundedSender<UploadEvent>,
    ) -> Self {
        Self {
            screen: Screen::Landing,
            store,
            images,
            uploads,
            notices: Vec::new(),
            should_quit: false,
        }
    }

    pub fn store(&self) -> &QuizStore {
        &self.store
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn notify(&mut self, kind: NoticeKind, title: &str, description: impl Into<String>) {
        self.notices.push(Notice {
            title: title.to_string(),
            description: description.into(),
            kind,
            shown_at: Instant::now(),
        });
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
    }

    /// Advance time-driven state: notice expiry and the secret typewriter.
    pub fn tick(&mut self, now: Instant) {
        self.notices
            .retain(|n| now.duration_since(n.shown_at) < NOTICE_LIFETIME);

        if let Screen::Secret(secret) = &mut self.screen {
            secret.tick(now);
        }
    }

    pub fn go_landing(&mut self) {
        self.screen = Screen::Landing;
    }

    pub fn open_create(&mut self) {
        self.screen = Screen::Create(CreateState::new());
    }

    pub fn open_secret(&mut self) {
        self.screen = Screen::Secret(SecretState::new(Instant::now()));
    }

    /// Open the code entry screen, submitting right away when a full code is given.
    pub fn open_take(&mut self, code: Option<&str>) {
        let code = code.unwrap_or_default();
        self.screen = Screen::Take(TakeState::enter_code(code));
        if !code.is_empty() {
            self.submit_code();
        }
    }

    /// Show results for `code`, or go back to landing if there are none.
    pub fn open_results(&mut self, code: &str) {
        let code = code::normalize_code(code);
        if self.store.get_quiz(&code).is_none() || self.store.get_attempt(&code).is_none() {
            self.notify(
                NoticeKind::Error,
                "No results yet",
                format!("Nobody has finished quiz {code}"),
            );
            self.go_landing();
            return;
        }
        self.screen = Screen::Results { code, scroll: 0 };
    }

    // Create flow.

    fn create_mut(&mut self) -> Option<&mut CreateState> {
        match &mut self.screen {
            Screen::Create(create) => Some(create),
            _ => None,
        }
    }

    /// Check the written questions and move on to marking answers.
    pub fn continue_to_answers(&mut self) {
        let Some(create) = self.create_mut() else {
            return;
        };

        match validation::validate_questions(&create.to_questions()) {
            Ok(()) => {
                create.step = CreateStep::Answers;
                create.selected = 0;
            }
            Err(err) => {
                if let Some(index) = err.question() {
                    create.select(index);
                }
                self.notify(NoticeKind::Error, err.title(), err.to_string());
            }
        }
    }

    pub fn back_to_questions(&mut self) {
        if let Some(create) = self.create_mut() {
            create.step = CreateStep::Questions;
        }
    }

    /// Mark the creator's answer and move to the next question.
    pub fn mark_answer(&mut self, choice: Choice) {
        if let Some(create) = self.create_mut() {
            if create.step == CreateStep::Answers {
                create.mark(choice);
                create.select_next();
            }
        }
    }

    /// Validate the whole draft and hand it to the store.
    pub fn finish_create(&mut self) {
        let Some(create) = self.create_mut() else {
            return;
        };

        if create.is_uploading() {
            self.notify(
                NoticeKind::Error,
                "Still uploading",
                "Wait for the images to finish uploading",
            );
            return;
        }

        let draft = create.to_draft();
        if let Err(err) = validation::validate_draft(&draft) {
            if let Some(index) = err.question() {
                create.select(index);
            }
            self.notify(NoticeKind::Error, err.title(), err.to_string());
            return;
        }

        match self.store.create_quiz(draft) {
            Ok(code) => {
                if let Some(create) = self.create_mut() {
                    create.step = CreateStep::Done { code: code.clone() };
                }
                self.notify(
                    NoticeKind::Info,
                    "Quiz created!",
                    format!("Your quiz code is {code}"),
                );
                self.check_persisted();
            }
            Err(err) => {
                tracing::warn!(error = %err, "quiz could not be created");
                self.notify(NoticeKind::Error, "Quiz not created", err.to_string());
            }
        }
    }

    /// Upload the image path typed into the focused image field.
    pub fn start_upload(&mut self) {
        let Some(create) = self.create_mut() else {
            return;
        };
        let Some(side) = create.field.image_side() else {
            return;
        };

        let question = &mut create.questions[create.selected];
        let question_id = question.id.clone();
        let slot = question.image_mut(side);
        if slot.uploading {
            return;
        }
        let path = slot.path.trim().to_string();
        if path.is_empty() {
            self.notify(
                NoticeKind::Error,
                "No image selected",
                "Type the path of an image file first",
            );
            return;
        }
        slot.uploading = true;

        let bucket = Arc::clone(&self.images);
        let uploads = self.uploads.clone();
        tokio::spawn(async move {
            let result = images::upload_file(bucket.as_ref(), &PathBuf::from(path)).await;
            let _ = uploads.send(UploadEvent {
                question_id,
                side,
                result,
            });
        });
    }

    /// Record a finished upload on the question it belongs to.
    pub fn apply_upload(&mut self, event: UploadEvent) {
        let slot = self
            .create_mut()
            .and_then(|create| create.find_question_mut(&event.question_id))
            .map(|question| question.image_mut(event.side));

        let Some(slot) = slot else {
            tracing::debug!(question = %event.question_id, "upload finished for a discarded question");
            return;
        };
        slot.uploading = false;

        match event.result {
            Ok(uri) => {
                slot.uri = Some(uri);
                self.notify(
                    NoticeKind::Info,
                    "Image uploaded",
                    format!("Choice {} now has an image", event.side),
                );
            }
            Err(err) => {
                slot.uri = None;
                tracing::warn!(error = %err, "image upload failed");
                self.notify(NoticeKind::Error, "Upload failed", err.to_string());
            }
        }
    }

    // Take flow.

    /// Look up the typed code and start answering.
    pub fn submit_code(&mut self) {
        let Screen::Take(take) = &self.screen else {
            return;
        };
        let Some(input) = take.code_input().filter(|input| code::is_valid_code(input)) else {
            return;
        };

        match self.store.get_quiz(input).cloned() {
            Some(quiz) if quiz.questions.is_empty() => {
                let code = quiz.code.clone();
                self.finish_attempt(&code, Vec::new());
            }
            Some(quiz) => self.screen = Screen::Take(TakeState::answering(quiz)),
            None => self.notify(
                NoticeKind::Error,
                "Quiz not found",
                "Please check the code and try again",
            ),
        }
    }

    pub fn highlight(&mut self, choice: Choice) {
        if let Screen::Take(TakeState::Answering { highlighted, .. }) = &mut self.screen {
            *highlighted = choice;
        }
    }

    pub fn choose_highlighted(&mut self) {
        if let Screen::Take(TakeState::Answering { highlighted, .. }) = &self.screen {
            let choice = *highlighted;
            self.choose(choice);
        }
    }

    /// Answer the current question; the last answer saves the attempt.
    pub fn choose(&mut self, choice: Choice) {
        let Screen::Take(TakeState::Answering {
            quiz,
            index,
            answers,
            highlighted,
        }) = &mut self.screen
        else {
            return;
        };

        let Some(question) = quiz.questions.get(*index) else {
            return;
        };
        answers.push(Answer::new(question.id.clone(), choice));
        *index += 1;
        *highlighted = Choice::A;

        if *index >= quiz.questions.len() {
            let code = quiz.code.clone();
            let answers = std::mem::take(answers);
            self.finish_attempt(&code, answers);
        }
    }

    fn finish_attempt(&mut self, code: &str, answers: Vec<Answer>) {
        self.store
            .save_attempt(QuizAttempt::completed_now(code, answers));
        self.check_persisted();
        self.open_results(code);
    }

    // Results.

    pub fn scroll_results_down(&mut self) {
        let max = match &self.screen {
            Screen::Results { code, .. } => self
                .store
                .get_quiz(code)
                .map_or(0, |q| q.questions.len().saturating_sub(1)),
            _ => return,
        };
        if let Screen::Results { scroll, .. } = &mut self.screen {
            *scroll = (*scroll + 1).min(max);
        }
    }

    pub fn scroll_results_up(&mut self) {
        if let Screen::Results { scroll, .. } = &mut self.screen {
            *scroll = scroll.saturating_sub(1);
        }
    }

    /// Retake the quiz whose results are showing.
    pub fn retake(&mut self) {
        if let Screen::Results { code, .. } = &self.screen {
            let code = code.clone();
            self.open_take(Some(&code));
        }
    }

    /// Remove the quiz whose results are showing.
    pub fn delete_current_quiz(&mut self) {
        let Screen::Results { code, .. } = &self.screen else {
            return;
        };
        let code = code.clone();

        if self.store.delete_quiz(&code).is_some() {
            self.notify(NoticeKind::Info, "Quiz deleted", format!("{code} is gone"));
            self.check_persisted();
        }
        self.go_landing();
    }

    // Secret.

    /// Show the whole message, or leave once it is all visible.
    pub fn advance_secret(&mut self) {
        if let Screen::Secret(secret) = &mut self.screen {
            if secret.is_complete() {
                self.go_landing();
            } else {
                secret.reveal_all();
            }
        }
    }

    fn check_persisted(&mut self) {
        if let Some(err) = self.store.last_persist_error() {
            let err = err.to_string();
            self.notify(
                NoticeKind::Error,
                "Not saved",
                format!("Changes will be lost on restart: {err}"),
            );
        }
    }
}
