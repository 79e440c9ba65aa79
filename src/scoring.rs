//! Scores an attempt against the creator's own answers.

use crate::models::{Choice, Question, Quiz, QuizAttempt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    /// `correct / total` as a rounded percentage, 0 for an empty quiz.
    pub percent: u32,
}

/// One row of the results breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult<'a> {
    pub question: &'a Question,
    pub chosen: Option<Choice>,
    pub is_correct: bool,
}

/// Count the answers matching each question's expected choice.
pub fn score(quiz: &Quiz, attempt: &QuizAttempt) -> Score {
    let correct = attempt
        .answers
        .iter()
        .filter(|answer| {
            quiz.question(&answer.question_id)
                .is_some_and(|q| q.expected_choice == Some(answer.choice))
        })
        .count();

    let total = quiz.questions.len();
    Score {
        correct,
        total,
        percent: percentage(correct, total),
    }
}

fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * correct as f64 / total as f64).round() as u32
}

/// Per-question results in quiz order.
pub fn breakdown<'a>(quiz: &'a Quiz, attempt: &QuizAttempt) -> Vec<AnswerResult<'a>> {
    quiz.questions
        .iter()
        .map(|question| {
            let chosen = attempt.answer_for(&question.id).map(|a| a.choice);
            AnswerResult {
                question,
                chosen,
                is_correct: chosen.is_some() && chosen == question.expected_choice,
            }
        })
        .collect()
}
