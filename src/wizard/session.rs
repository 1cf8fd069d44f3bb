//! WizardSession — the ephemeral state of one prospective client's walk
//! through the qualification wizard.
//!
//! A session owns its answer record exclusively. All transitions are
//! synchronous except the submit attempt, whose only suspension point is
//! the call to the submission sink. Errors never propagate past the
//! session boundary: they become inline state the host page renders.

use serde::Serialize;

use crate::error::{SessionError, ValidationError};
use crate::sink::SubmissionSink;
use crate::wizard::model::{
    AnswersPatch, BudgetSelection, Plan, SubmissionPayload, WizardAnswers,
};
use crate::wizard::pricing;
use crate::wizard::step::WizardStep;
use crate::wizard::validate::validate_step;

/// Where the upsell offer stands for this session.
///
/// The offer is shown at most once per session: once resolved, advancing
/// from Budget again goes straight to Message even on the Blue plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsellOutcome {
    /// Not shown yet (Red sessions never leave this state).
    NotOffered,
    /// The offer is on screen, decision pending.
    Pending,
    Accepted,
    Declined,
}

/// Inline error surfaced to the host page. Validation and submission
/// failures are distinct kinds so the host can render them differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum SurfacedError {
    Validation(String),
    Submission(String),
}

/// Result of an advance attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    /// Moved to the returned step.
    Moved(WizardStep),
    /// Already on Message: advancing means attempting submission.
    NeedsSubmit,
    /// Already submitted; nothing to do.
    Terminal,
}

/// Result of a retreat attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreated {
    /// At the first step: the host should exit the wizard.
    Exit,
    /// Moved back to the returned step.
    Moved(WizardStep),
    /// Already submitted; nothing to do.
    Ignored,
}

/// Result of a submit attempt. Failures are recorded on the session, so
/// every variant here is a normal outcome rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Payload delivered; the session is now terminal.
    Delivered,
    /// Already submitted. Idempotent no-op, no sink call made.
    AlreadyDone,
    /// A submission is already in flight; this attempt was ignored.
    InFlight,
    /// Final validation failed; no sink call made.
    Invalid,
    /// The sink rejected or failed; the user may retry.
    Failed,
}

/// Snapshot of session state for the host page.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub step: WizardStep,
    pub step_title: String,
    pub step_index: usize,
    pub step_count: usize,
    pub plan: Plan,
    /// Budget-range labels offered under the current plan.
    pub budget_options: Vec<String>,
    pub error: Option<SurfacedError>,
    pub is_submitting: bool,
    pub is_success: bool,
}

/// One prospective client's wizard session. Created at mount, destroyed on
/// navigation away or after a successful submission; never persisted.
#[derive(Debug)]
pub struct WizardSession {
    step: WizardStep,
    plan: Plan,
    answers: WizardAnswers,
    upsell: UpsellOutcome,
    error: Option<SurfacedError>,
    is_submitting: bool,
    is_success: bool,
}

impl WizardSession {
    /// Create a session with the plan resolved from the inbound query
    /// parameter (`"red"` selects Red, anything else Blue).
    pub fn from_query_param(param: Option<&str>) -> Self {
        Self::new(Plan::from_query_param(param))
    }

    pub fn new(plan: Plan) -> Self {
        Self {
            step: WizardStep::Identity,
            plan,
            answers: WizardAnswers::default(),
            upsell: UpsellOutcome::NotOffered,
            error: None,
            is_submitting: false,
            is_success: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn answers(&self) -> &WizardAnswers {
        &self.answers
    }

    pub fn upsell(&self) -> UpsellOutcome {
        self.upsell
    }

    pub fn error(&self) -> Option<&SurfacedError> {
        self.error.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    /// Snapshot for the host page.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            step: self.step,
            step_title: self.step.title().to_string(),
            step_index: self.step.index_in(self.plan),
            step_count: WizardStep::count_for(self.plan),
            plan: self.plan,
            budget_options: pricing::budget_ranges(self.plan)
                .iter()
                .map(|s| s.to_string())
                .collect(),
            error: self.error.clone(),
            is_submitting: self.is_submitting,
            is_success: self.is_success,
        }
    }

    /// Apply a partial answer update. Any edit clears the transient error;
    /// no stale error survives an edit.
    pub fn apply(&mut self, patch: AnswersPatch) {
        self.error = None;
        patch.apply(&mut self.answers);
    }

    /// Select a budget-range label. The label must be one of the ranges
    /// offered under the current plan.
    pub fn select_budget(&mut self, label: &str) -> Result<(), ValidationError> {
        self.error = None;
        if !pricing::is_offered(self.plan, label) {
            let err = ValidationError::UnavailableBudget;
            self.error = Some(SurfacedError::Validation(err.to_string()));
            return Err(err);
        }
        self.answers.budget = BudgetSelection::Selected(label.to_string());
        Ok(())
    }

    /// Advance to the next step if the current step validates.
    ///
    /// Budget under the Blue plan routes to the upsell offer the first time
    /// through; Message reports that a submission attempt is needed instead
    /// of incrementing.
    pub fn advance(&mut self) -> Result<Advanced, SessionError> {
        match self.step {
            WizardStep::Submitted => return Ok(Advanced::Terminal),
            WizardStep::Message => return Ok(Advanced::NeedsSubmit),
            WizardStep::Upsell => {
                return Err(SessionError::InvalidAction {
                    action: "advance",
                    step: self.step,
                });
            }
            _ => {}
        }

        if let Err(e) = validate_step(self.step, &self.answers) {
            self.error = Some(SurfacedError::Validation(e.to_string()));
            return Err(SessionError::Validation(e));
        }
        self.error = None;

        let next = match self.step {
            WizardStep::Budget
                if self.plan == Plan::Blue
                    && matches!(
                        self.upsell,
                        UpsellOutcome::NotOffered | UpsellOutcome::Pending
                    ) =>
            {
                self.upsell = UpsellOutcome::Pending;
                WizardStep::Upsell
            }
            WizardStep::Budget => WizardStep::Message,
            step => {
                let seq = WizardStep::sequence(self.plan);
                seq[step.index_in(self.plan) + 1]
            }
        };
        self.step = next;
        Ok(Advanced::Moved(next))
    }

    /// Go back one step. At the first step this signals wizard exit rather
    /// than a transition. Retreating from Message skips back over a resolved
    /// upsell to Budget; the offer is never re-entered.
    pub fn retreat(&mut self) -> Retreated {
        match self.step {
            WizardStep::Submitted => Retreated::Ignored,
            WizardStep::Identity => Retreated::Exit,
            WizardStep::Message | WizardStep::Upsell => {
                self.error = None;
                self.step = WizardStep::Budget;
                Retreated::Moved(WizardStep::Budget)
            }
            step => {
                self.error = None;
                let seq = WizardStep::sequence(self.plan);
                let prev = seq[step.index_in(self.plan) - 1];
                self.step = prev;
                Retreated::Moved(prev)
            }
        }
    }

    /// Resolve the upsell offer. Accepting upgrades the plan to Red and
    /// clears the budget selection, since the Blue label is no longer among
    /// the offered ranges. Both outcomes land on Message.
    pub fn resolve_upsell(&mut self, accept: bool) -> Result<WizardStep, SessionError> {
        if self.step != WizardStep::Upsell {
            return Err(SessionError::InvalidAction {
                action: "resolve_upsell",
                step: self.step,
            });
        }
        if accept {
            self.plan = Plan::Red;
            self.answers.budget.clear();
            self.upsell = UpsellOutcome::Accepted;
        } else {
            self.upsell = UpsellOutcome::Declined;
        }
        self.error = None;
        self.step = WizardStep::Message;
        Ok(WizardStep::Message)
    }

    /// Attempt the final submission.
    ///
    /// Runs the Message validation, assembles the payload and hands it to
    /// the sink. At most one submission is in flight per session; a repeat
    /// attempt after success is a no-op with no sink call. A sink failure
    /// leaves the session in Message with a visible submission error, and
    /// a later attempt is a fresh one.
    pub async fn submit(&mut self, sink: &dyn SubmissionSink) -> Result<SubmitOutcome, SessionError> {
        match self.step {
            WizardStep::Submitted => return Ok(SubmitOutcome::AlreadyDone),
            WizardStep::Message => {}
            step => {
                return Err(SessionError::InvalidAction {
                    action: "submit",
                    step,
                });
            }
        }
        if self.is_submitting {
            return Ok(SubmitOutcome::InFlight);
        }

        if let Err(e) = validate_step(WizardStep::Message, &self.answers) {
            self.error = Some(SurfacedError::Validation(e.to_string()));
            return Ok(SubmitOutcome::Invalid);
        }
        self.error = None;
        self.is_submitting = true;

        let payload = SubmissionPayload::assemble(&self.answers, self.plan);
        let result = sink.deliver(&payload).await;
        self.is_submitting = false;

        match result {
            Ok(()) => {
                self.step = WizardStep::Submitted;
                self.is_success = true;
                tracing::info!(plan = %self.plan, "wizard submission delivered");
                Ok(SubmitOutcome::Delivered)
            }
            Err(e) => {
                tracing::warn!(plan = %self.plan, "wizard submission failed: {e}");
                self.error = Some(SurfacedError::Submission(e.to_string()));
                Ok(SubmitOutcome::Failed)
            }
        }
    }
}
