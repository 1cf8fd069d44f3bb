//! Qualification wizard — the multi-step lead-intake flow.
//!
//! A prospective client walks an ordered sequence of input steps; the plan
//! selected upstream decides the budget tiers and whether a one-shot
//! upgrade offer appears. Each step validates before advancing, and the
//! finished answer record is handed to a submission sink.

pub mod manager;
pub mod model;
pub mod pricing;
pub mod routes;
pub mod session;
pub mod step;
pub mod validate;

pub use manager::{RetreatResponse, WizardManager};
pub use model::{
    AnswersPatch, BudgetSelection, EntityType, Pillar, Plan, SubmissionPayload, WizardAnswers,
};
pub use routes::{WizardRouteState, wizard_routes};
pub use session::{
    Advanced, Retreated, SessionStatus, SubmitOutcome, SurfacedError, UpsellOutcome, WizardSession,
};
pub use step::WizardStep;
pub use validate::validate_step;
