//! Survey data model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of answer a question accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free text, must be non-empty.
    Text,
    /// Free text that must contain "@".
    Email,
    /// One of the listed options.
    Choice { options: Vec<String> },
}

/// One survey question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub id: String,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// An authored survey: ordered questions plus optional follow-up call to
/// action shown after completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<SurveyQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
}

/// A completed run: question id → answer, stamped at completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub survey_id: String,
    pub submitted_at: DateTime<Utc>,
    pub answers: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_serde() {
        let text: QuestionKind = serde_json::from_str(r#"{"type":"text"}"#).unwrap();
        assert_eq!(text, QuestionKind::Text);

        let choice: QuestionKind =
            serde_json::from_str(r#"{"type":"choice","options":["A","B"]}"#).unwrap();
        assert_eq!(
            choice,
            QuestionKind::Choice {
                options: vec!["A".to_string(), "B".to_string()]
            }
        );
    }

    #[test]
    fn definition_serde_roundtrip() {
        let definition = SurveyDefinition {
            id: "launch-interest".to_string(),
            title: "Launch interest".to_string(),
            description: "Tell us where you are".to_string(),
            questions: vec![
                SurveyQuestion {
                    id: "q1".to_string(),
                    prompt: "What is your email?".to_string(),
                    kind: QuestionKind::Email,
                },
                SurveyQuestion {
                    id: "q2".to_string(),
                    prompt: "Company size?".to_string(),
                    kind: QuestionKind::Choice {
                        options: vec!["1-10".to_string(), "11-50".to_string()],
                    },
                },
            ],
            cta_label: Some("Book a call".to_string()),
            cta_link: None,
        };

        let json = serde_json::to_string(&definition).unwrap();
        let parsed: SurveyDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, "launch-interest");
        assert_eq!(parsed.questions.len(), 2);
        assert_eq!(parsed.questions[0].kind, QuestionKind::Email);
        assert_eq!(parsed.cta_label.as_deref(), Some("Book a call"));
    }
}
