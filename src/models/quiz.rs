use serde::{Deserialize, Serialize};

use super::question::{Answer, Question};

/// Everything the creator supplies; the store adds the code and timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub secret_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub code: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_message: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl Quiz {
    pub fn from_draft(draft: QuizDraft, code: String, created_at: i64) -> Self {
        Self {
            code,
            title: draft.title,
            description: draft.description,
            questions: draft.questions,
            secret_message: draft.secret_message,
            created_at,
        }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub quiz_code: String,
    pub answers: Vec<Answer>,
    /// Milliseconds since the Unix epoch.
    pub completed_at: i64,
}

impl QuizAttempt {
    /// Stamp a finished set of answers with the current time.
    pub fn completed_now(quiz_code: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            quiz_code: quiz_code.into(),
            answers,
            completed_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}
