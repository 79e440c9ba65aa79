mod question;
mod quiz;

pub use question::{Answer, Choice, Question};
pub use quiz::{Quiz, QuizAttempt, QuizDraft};
