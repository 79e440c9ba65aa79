//! Screen state for the terminal front end.
//!
//! Each screen owns whatever it is editing or showing; the store is only
//! touched through [`crate::app::App`].

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::code::CODE_LENGTH;
use crate::models::{Answer, Choice, Question, Quiz, QuizDraft};
use crate::validation::MAX_FIELD_LENGTH;

const TITLE_MAX_LENGTH: usize = 60;
const IMAGE_PATH_MAX_LENGTH: usize = 512;
const SECRET_MAX_LENGTH: usize = 280;

pub const DEFAULT_TITLE: &str = "Our Quiz";

/// Message typed out on the secret screen.
pub const SECRET_MESSAGE: &str =
    "In a world full of choices, you'll always be my favorite answer. \u{2764}\u{fe0f}";

/// Delay between two typed characters on the secret screen.
pub const TYPEWRITER_STEP: Duration = Duration::from_millis(50);

/// Which screen is showing.
#[derive(Debug, Clone, Default)]
pub enum Screen {
    #[default]
    Landing,
    Create(CreateState),
    Take(TakeState),
    Results { code: String, scroll: usize },
    Secret(SecretState),
}

impl Screen {
    /// True while keystrokes go into a text field.
    pub fn is_typing(&self) -> bool {
        match self {
            Screen::Create(create) => create.step == CreateStep::Questions,
            Screen::Take(TakeState::EnterCode { .. }) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateStep {
    /// Writing questions.
    Questions,
    /// The creator answers their own quiz.
    Answers,
    /// Stored; the code can be shared.
    Done { code: String },
}

/// Editable field of the question step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Prompt,
    ChoiceA,
    ChoiceB,
    Hint,
    ImageA,
    ImageB,
    Secret,
}

impl Field {
    const ORDER: [Field; 8] = [
        Field::Title,
        Field::Prompt,
        Field::ChoiceA,
        Field::ChoiceB,
        Field::Hint,
        Field::ImageA,
        Field::ImageB,
        Field::Secret,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Prompt => "Would you rather...",
            Field::ChoiceA => "Choice A",
            Field::ChoiceB => "Choice B",
            Field::Hint => "Hint",
            Field::ImageA => "Image A (path)",
            Field::ImageB => "Image B (path)",
            Field::Secret => "Secret message",
        }
    }

    fn max_length(self) -> usize {
        match self {
            Field::Title => TITLE_MAX_LENGTH,
            Field::Prompt | Field::ChoiceA | Field::ChoiceB | Field::Hint => MAX_FIELD_LENGTH,
            Field::ImageA | Field::ImageB => IMAGE_PATH_MAX_LENGTH,
            Field::Secret => SECRET_MAX_LENGTH,
        }
    }

    /// The image side this field edits, if it is an image field.
    pub fn image_side(self) -> Option<Choice> {
        match self {
            Field::ImageA => Some(Choice::A),
            Field::ImageB => Some(Choice::B),
            _ => None,
        }
    }
}

/// A choice image while the quiz is being written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlot {
    /// Local file the creator typed.
    pub path: String,
    /// Set once the upload succeeded.
    pub uri: Option<String>,
    pub uploading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: String,
    pub prompt: String,
    pub choice_a: String,
    pub choice_b: String,
    pub hint: String,
    pub image_a: ImageSlot,
    pub image_b: ImageSlot,
    pub expected: Option<Choice>,
}

impl QuestionDraft {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            prompt: String::new(),
            choice_a: String::new(),
            choice_b: String::new(),
            hint: String::new(),
            image_a: ImageSlot::default(),
            image_b: ImageSlot::default(),
            expected: None,
        }
    }

    pub fn image(&self, side: Choice) -> &ImageSlot {
        match side {
            Choice::A => &self.image_a,
            Choice::B => &self.image_b,
        }
    }

    pub fn image_mut(&mut self, side: Choice) -> &mut ImageSlot {
        match side {
            Choice::A => &mut self.image_a,
            Choice::B => &mut self.image_b,
        }
    }

    pub fn to_question(&self) -> Question {
        let hint = self.hint.trim();
        Question {
            id: self.id.clone(),
            prompt: self.prompt.clone(),
            choice_a: self.choice_a.clone(),
            choice_b: self.choice_b.clone(),
            image_a: self.image_a.uri.clone(),
            image_b: self.image_b.uri.clone(),
            hint: (!hint.is_empty()).then(|| hint.to_string()),
            expected_choice: self.expected,
        }
    }
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// The quiz editor.
#[derive(Debug, Clone)]
pub struct CreateState {
    pub step: CreateStep,
    pub title: String,
    pub secret_message: String,
    pub questions: Vec<QuestionDraft>,
    /// Question being edited or marked.
    pub selected: usize,
    pub field: Field,
}

impl Default for CreateState {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateState {
    pub fn new() -> Self {
        Self {
            step: CreateStep::Questions,
            title: DEFAULT_TITLE.to_string(),
            secret_message: String::new(),
            questions: vec![QuestionDraft::new()],
            selected: 0,
            field: Field::Prompt,
        }
    }

    pub fn current(&self) -> &QuestionDraft {
        &self.questions[self.selected]
    }

    fn current_mut(&mut self) -> &mut QuestionDraft {
        &mut self.questions[self.selected]
    }

    /// The text behind the focused field.
    pub fn field_value(&self, field: Field) -> &str {
        let q = self.current();
        match field {
            Field::Title => &self.title,
            Field::Prompt => &q.prompt,
            Field::ChoiceA => &q.choice_a,
            Field::ChoiceB => &q.choice_b,
            Field::Hint => &q.hint,
            Field::ImageA => &q.image_a.path,
            Field::ImageB => &q.image_b.path,
            Field::Secret => &self.secret_message,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Secret => &mut self.secret_message,
            Field::Prompt => &mut self.current_mut().prompt,
            Field::ChoiceA => &mut self.current_mut().choice_a,
            Field::ChoiceB => &mut self.current_mut().choice_b,
            Field::Hint => &mut self.current_mut().hint,
            Field::ImageA => &mut self.current_mut().image_a.path,
            Field::ImageB => &mut self.current_mut().image_b.path,
        }
    }

    pub fn push_char(&mut self, c: char) {
        let field = self.field;
        let value = self.field_mut(field);
        if value.chars().count() < field.max_length() {
            value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        let field = self.field;
        self.field_mut(field).pop();
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.previous();
    }

    pub fn add_question(&mut self) {
        self.questions.push(QuestionDraft::new());
        self.selected = self.questions.len() - 1;
        self.field = Field::Prompt;
    }

    /// Drop the selected question, always keeping at least one.
    pub fn remove_question(&mut self) -> bool {
        if self.questions.len() <= 1 {
            return false;
        }
        self.questions.remove(self.selected);
        self.selected = self.selected.min(self.questions.len() - 1);
        true
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.questions.len() - 1);
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.questions.len() - 1);
    }

    /// Record the creator's own answer for the selected question.
    pub fn mark(&mut self, choice: Choice) {
        self.current_mut().expected = Some(choice);
    }

    pub fn all_marked(&self) -> bool {
        self.questions.iter().all(|q| q.expected.is_some())
    }

    pub fn is_uploading(&self) -> bool {
        self.questions
            .iter()
            .any(|q| q.image_a.uploading || q.image_b.uploading)
    }

    pub fn find_question_mut(&mut self, id: &str) -> Option<&mut QuestionDraft> {
        self.questions.iter_mut().find(|q| q.id == id)
    }

    pub fn to_questions(&self) -> Vec<Question> {
        self.questions.iter().map(QuestionDraft::to_question).collect()
    }

    pub fn to_draft(&self) -> QuizDraft {
        let title = self.title.trim();
        let secret = self.secret_message.trim();
        QuizDraft {
            title: if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title.to_string()
            },
            description: None,
            questions: self.to_questions(),
            secret_message: (!secret.is_empty()).then(|| secret.to_string()),
        }
    }
}

/// Taking a quiz.
#[derive(Debug, Clone)]
pub enum TakeState {
    EnterCode {
        input: String,
    },
    Answering {
        quiz: Quiz,
        index: usize,
        answers: Vec<Answer>,
        highlighted: Choice,
    },
}

impl TakeState {
    pub fn enter_code(input: &str) -> Self {
        let mut state = Self::EnterCode {
            input: String::new(),
        };
        for c in input.chars() {
            state.push_code_char(c);
        }
        state
    }

    pub fn answering(quiz: Quiz) -> Self {
        Self::Answering {
            quiz,
            index: 0,
            answers: Vec::new(),
            highlighted: Choice::A,
        }
    }

    /// Code characters are upper-cased and capped at the code length.
    pub fn push_code_char(&mut self, c: char) {
        if let Self::EnterCode { input } = self {
            if c.is_ascii_alphanumeric() && input.len() < CODE_LENGTH {
                input.push(c.to_ascii_uppercase());
            }
        }
    }

    pub fn pop_code_char(&mut self) {
        if let Self::EnterCode { input } = self {
            input.pop();
        }
    }

    pub fn code_input(&self) -> Option<&str> {
        match self {
            Self::EnterCode { input } => Some(input),
            Self::Answering { .. } => None,
        }
    }

    /// Progress through the quiz as `(answered, total)`.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self {
            Self::Answering { quiz, index, .. } => Some((*index, quiz.questions.len())),
            Self::EnterCode { .. } => None,
        }
    }
}

/// Typewriter reveal of [`SECRET_MESSAGE`].
#[derive(Debug, Clone)]
pub struct SecretState {
    /// Characters shown so far.
    pub revealed: usize,
    last_step: Instant,
}

impl SecretState {
    pub fn new(now: Instant) -> Self {
        Self {
            revealed: 0,
            last_step: now,
        }
    }

    fn total() -> usize {
        SECRET_MESSAGE.chars().count()
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= Self::total()
    }

    /// Reveal one character per elapsed [`TYPEWRITER_STEP`].
    pub fn tick(&mut self, now: Instant) {
        while !self.is_complete() && now.duration_since(self.last_step) >= TYPEWRITER_STEP {
            self.revealed += 1;
            self.last_step += TYPEWRITER_STEP;
        }
    }

    pub fn reveal_all(&mut self) {
        self.revealed = Self::total();
    }

    pub fn visible_text(&self) -> String {
        SECRET_MESSAGE.chars().take(self.revealed).collect()
    }
}
