use std::fmt;

use serde::{Deserialize, Serialize};

/// One side of a "would you rather" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::A => f.write_str("A"),
            Choice::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub choice_a: String,
    pub choice_b: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// The creator's own answer. Older records may not carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_choice: Option<Choice>,
}

impl Question {
    /// Label of the given side.
    pub fn label(&self, choice: Choice) -> &str {
        match choice {
            Choice::A => &self.choice_a,
            Choice::B => &self.choice_b,
        }
    }

    /// Image URI of the given side, if one was uploaded.
    pub fn image(&self, choice: Choice) -> Option<&str> {
        match choice {
            Choice::A => self.image_a.as_deref(),
            Choice::B => self.image_b.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub choice: Choice,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, choice: Choice) -> Self {
        Self {
            question_id: question_id.into(),
            choice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_wire_names() {
        let question = Question {
            id: "q1".to_string(),
            prompt: "explore the ocean depths or outer space?".to_string(),
            choice_a: "Ocean depths".to_string(),
            choice_b: "Outer space".to_string(),
            image_a: None,
            image_b: None,
            hint: Some("think deep".to_string()),
            expected_choice: Some(Choice::B),
        };

        let json = serde_json::to_string(&question).unwrap();
        assert!(json.contains("\"choiceA\":\"Ocean depths\""));
        assert!(json.contains("\"expectedChoice\":\"B\""));
        assert!(!json.contains("imageA"));
    }

    #[test]
    fn test_question_without_expected_choice_loads() {
        let json = r#"{"id":"1","prompt":"p","choiceA":"a","choiceB":"b","hint":""}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.expected_choice, None);
        assert_eq!(question.label(Choice::A), "a");
        assert_eq!(question.image(Choice::B), None);
    }

    #[test]
    fn test_choice_display() {
        assert_eq!(Choice::A.to_string(), "A");
        assert_eq!(Choice::B.to_string(), "B");
    }
}
