//! Checks a quiz draft must pass before it is handed to the store.

use thiserror::Error;

use crate::models::{Question, QuizDraft};

/// Fewest questions a quiz may have.
pub const MIN_QUESTIONS: usize = 3;

/// Longest prompt or choice label, in characters.
pub const MAX_FIELD_LENGTH: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Add at least {} questions to create your quiz", MIN_QUESTIONS)]
    TooFewQuestions,
    #[error("All questions need a prompt and both choices")]
    Incomplete { question: usize },
    #[error("Keep each field under {} characters", MAX_FIELD_LENGTH)]
    TooLong { question: usize },
    #[error("Pick your own answer for every question")]
    Unmarked { question: usize },
}

impl ValidationError {
    /// Short heading for the notice shown to the creator.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::TooFewQuestions => "Need more questions",
            ValidationError::Incomplete { .. } => "Incomplete question",
            ValidationError::TooLong { .. } => "Text too long",
            ValidationError::Unmarked { .. } => "Mark your answers",
        }
    }

    /// Index of the offending question, if the error is about one.
    pub fn question(&self) -> Option<usize> {
        match self {
            ValidationError::TooFewQuestions => None,
            ValidationError::Incomplete { question }
            | ValidationError::TooLong { question }
            | ValidationError::Unmarked { question } => Some(*question),
        }
    }
}

/// Count, completeness and length checks; run before marking answers.
pub fn validate_questions(questions: &[Question]) -> Result<(), ValidationError> {
    if questions.len() < MIN_QUESTIONS {
        return Err(ValidationError::TooFewQuestions);
    }

    for (index, q) in questions.iter().enumerate() {
        let fields = [&q.prompt, &q.choice_a, &q.choice_b];

        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ValidationError::Incomplete { question: index });
        }
        if fields.iter().any(|f| f.chars().count() > MAX_FIELD_LENGTH) {
            return Err(ValidationError::TooLong { question: index });
        }
    }

    Ok(())
}

/// Everything [`validate_questions`] checks, plus a marked answer everywhere.
pub fn validate_draft(draft: &QuizDraft) -> Result<(), ValidationError> {
    validate_questions(&draft.questions)?;

    match draft
        .questions
        .iter()
        .position(|q| q.expected_choice.is_none())
    {
        Some(question) => Err(ValidationError::Unmarked { question }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Choice;

    use super::*;

    fn question(prompt: &str, a: &str, b: &str) -> Question {
        Question {
            id: prompt.to_string(),
            prompt: prompt.to_string(),
            choice_a: a.to_string(),
            choice_b: b.to_string(),
            image_a: None,
            image_b: None,
            hint: None,
            expected_choice: Some(Choice::A),
        }
    }

    fn draft(questions: Vec<Question>) -> QuizDraft {
        QuizDraft {
            title: "Our Quiz".to_string(),
            questions,
            ..QuizDraft::default()
        }
    }

    fn complete() -> Vec<Question> {
        vec![
            question("tea or coffee?", "Tea", "Coffee"),
            question("beach or mountains?", "Beach", "Mountains"),
            question("cats or dogs?", "Cats", "Dogs"),
        ]
    }

    #[test]
    fn test_fewer_than_three_questions_rejected() {
        let mut questions = complete();
        questions.pop();
        assert_eq!(
            validate_draft(&draft(questions)),
            Err(ValidationError::TooFewQuestions)
        );
    }

    #[test]
    fn test_complete_draft_passes() {
        assert_eq!(validate_draft(&draft(complete())), Ok(()));
    }

    #[test]
    fn test_blank_choice_rejected() {
        let mut questions = complete();
        questions[1].choice_b = "   ".to_string();
        let err = validate_questions(&questions).unwrap_err();
        assert_eq!(err, ValidationError::Incomplete { question: 1 });
        assert_eq!(err.title(), "Incomplete question");
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let mut questions = complete();
        questions[0].prompt = "é".repeat(MAX_FIELD_LENGTH);
        assert_eq!(validate_questions(&questions), Ok(()));

        questions[2].choice_a = "x".repeat(MAX_FIELD_LENGTH + 1);
        assert_eq!(
            validate_questions(&questions),
            Err(ValidationError::TooLong { question: 2 })
        );
    }

    #[test]
    fn test_unmarked_answer_rejected_only_by_full_check() {
        let mut questions = complete();
        questions[2].expected_choice = None;
        assert_eq!(validate_questions(&questions), Ok(()));

        let err = validate_draft(&draft(questions)).unwrap_err();
        assert_eq!(err.question(), Some(2));
        assert_eq!(err.to_string(), "Pick your own answer for every question");
    }
}
