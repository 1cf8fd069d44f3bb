//! Definition-driven survey runner.
//!
//! Surveys are small sequential questionnaires authored in the admin
//! console: an ordered list of questions answered one at a time, with the
//! same advance-after-validation discipline as the wizard. A completed run
//! yields a timestamped response record; what the caller does with it
//! (store it, forward it) is not this module's concern.

pub mod model;
pub mod run;

pub use model::{QuestionKind, SurveyDefinition, SurveyQuestion, SurveyResponse};
pub use run::{SurveyProgress, SurveyRun};
