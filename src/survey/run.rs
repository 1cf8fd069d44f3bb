//! Survey run state machine — one visitor answering one survey.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::SurveyError;
use crate::survey::model::{QuestionKind, SurveyDefinition, SurveyQuestion, SurveyResponse};

/// Result of advancing a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyProgress {
    /// Moved to the question at the returned index.
    Next(usize),
    /// The last question validated; the run is complete.
    Completed(SurveyResponse),
}

/// An in-progress survey run. Like a wizard session it is memory-only and
/// owned by a single visitor; a completed run hands its response record to
/// the caller and accepts nothing further.
#[derive(Debug)]
pub struct SurveyRun {
    definition: SurveyDefinition,
    current: usize,
    answers: BTreeMap<String, String>,
    error: Option<String>,
    complete: bool,
}

impl SurveyRun {
    /// Start a run. A survey with no questions cannot be run.
    pub fn new(definition: SurveyDefinition) -> Result<Self, SurveyError> {
        if definition.questions.is_empty() {
            return Err(SurveyError::EmptyDefinition {
                id: definition.id.clone(),
            });
        }
        Ok(Self {
            definition,
            current: 0,
            answers: BTreeMap::new(),
            error: None,
            complete: false,
        })
    }

    /// The question currently on screen.
    pub fn question(&self) -> &SurveyQuestion {
        &self.definition.questions[self.current]
    }

    /// (current, total) for the progress indicator.
    pub fn progress(&self) -> (usize, usize) {
        (self.current, self.definition.questions.len())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Record (or overwrite) the answer to the current question. Clears
    /// any inline error.
    pub fn record_answer(&mut self, answer: impl Into<String>) -> Result<(), SurveyError> {
        if self.complete {
            return Err(SurveyError::AlreadyComplete);
        }
        self.error = None;
        let id = self.question().id.clone();
        self.answers.insert(id, answer.into());
        Ok(())
    }

    /// Validate the current answer and move on. The last question completes
    /// the run and yields the response record.
    pub fn advance(&mut self) -> Result<SurveyProgress, SurveyError> {
        if self.complete {
            return Err(SurveyError::AlreadyComplete);
        }

        if let Err(e) = self.validate_current() {
            self.error = Some(e.to_string());
            return Err(e);
        }
        self.error = None;

        if self.current + 1 < self.definition.questions.len() {
            self.current += 1;
            Ok(SurveyProgress::Next(self.current))
        } else {
            self.complete = true;
            Ok(SurveyProgress::Completed(SurveyResponse {
                survey_id: self.definition.id.clone(),
                submitted_at: Utc::now(),
                answers: self.answers.clone(),
            }))
        }
    }

    fn validate_current(&self) -> Result<(), SurveyError> {
        let question = self.question();
        let answer = self
            .answers
            .get(&question.id)
            .map(String::as_str)
            .unwrap_or("");
        if answer.trim().is_empty() {
            return Err(SurveyError::MissingAnswer);
        }
        match &question.kind {
            QuestionKind::Text => Ok(()),
            QuestionKind::Email => {
                if answer.contains('@') {
                    Ok(())
                } else {
                    Err(SurveyError::InvalidEmail)
                }
            }
            QuestionKind::Choice { options } => {
                if options.iter().any(|o| o == answer) {
                    Ok(())
                } else {
                    Err(SurveyError::UnknownChoice)
                }
            }
        }
    }
}
