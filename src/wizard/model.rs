//! Data model for the qualification wizard: the answer record, the service
//! plan, and the payload handed to the submission sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two-tier service plan.
///
/// Blue is the diagnosis-only tier; Red adds implementation. The plan
/// decides which budget ranges are offered and whether the upsell offer
/// appears after the budget step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Blue,
    Red,
}

impl Plan {
    /// Resolve the plan from the inbound `plan` query parameter.
    /// `"red"` selects Red; anything else, including absent, selects Blue.
    pub fn from_query_param(param: Option<&str>) -> Self {
        match param {
            Some("red") => Self::Red,
            _ => Self::Blue,
        }
    }

    /// Commercial display name used in the submission payload.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Blue => "Blue Diamond Prime",
            Self::Red => "Red Diamond Prime",
        }
    }

    /// Fixed one-line description used in the submission payload.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Blue => "Comprehensive strategic diagnosis (no implementation)",
            Self::Red => "Diagnosis + implementation (diagnosis fee fully credited)",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blue => write!(f, "blue"),
            Self::Red => write!(f, "red"),
        }
    }
}

/// What kind of entity the prospective client represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Company,
    NewProject,
}

impl EntityType {
    /// Display label used in the submission payload.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Company => "Active company",
            Self::NewProject => "New project",
        }
    }
}

/// The four fixed business-function pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Administration,
    Marketing,
    Sales,
    Fulfillment,
}

impl Pillar {
    /// All pillars, in display order.
    pub const ALL: [Pillar; 4] = [
        Pillar::Administration,
        Pillar::Marketing,
        Pillar::Sales,
        Pillar::Fulfillment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Administration => "Administration",
            Self::Marketing => "Marketing",
            Self::Sales => "Sales",
            Self::Fulfillment => "Fulfillment",
        }
    }
}

/// Budget selection, modeled as a tagged union rather than a raw string so
/// a label selected under one plan cannot silently go stale when the plan
/// changes. Cleared on plan change; the payload renders `Unselected` as a
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetSelection {
    Unselected,
    Selected(String),
}

impl BudgetSelection {
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Unselected => None,
            Self::Selected(label) => Some(label),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Unselected;
    }
}

impl Default for BudgetSelection {
    fn default() -> Self {
        Self::Unselected
    }
}

/// The mutable answer record, owned exclusively by one wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardAnswers {
    pub full_name: String,
    pub email: String,
    /// Phone country dialing code, defaults to "+51".
    pub phone_code: String,
    pub phone_number: String,
    pub entity_type: Option<EntityType>,
    pub business_name: String,
    pub industry: String,
    /// Free-text URLs/handles; blanks are filtered out at submission.
    pub socials: Vec<String>,
    pub pillar: Option<Pillar>,
    pub budget: BudgetSelection,
    pub message: String,
    pub consent: bool,
}

impl Default for WizardAnswers {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone_code: "+51".to_string(),
            phone_number: String::new(),
            entity_type: None,
            business_name: String::new(),
            industry: String::new(),
            socials: Vec::new(),
            pillar: None,
            budget: BudgetSelection::Unselected,
            message: String::new(),
            consent: false,
        }
    }
}

/// Partial answer update from the host page. Only the present fields are
/// applied; the budget field goes through plan-aware validation on the
/// session, so it is not part of this patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswersPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_code: Option<String>,
    pub phone_number: Option<String>,
    pub entity_type: Option<EntityType>,
    pub business_name: Option<String>,
    pub industry: Option<String>,
    pub socials: Option<Vec<String>>,
    pub pillar: Option<Pillar>,
    pub message: Option<String>,
    pub consent: Option<bool>,
}

impl AnswersPatch {
    /// Apply the present fields onto the answer record.
    pub fn apply(self, answers: &mut WizardAnswers) {
        if let Some(v) = self.full_name {
            answers.full_name = v;
        }
        if let Some(v) = self.email {
            answers.email = v;
        }
        if let Some(v) = self.phone_code {
            answers.phone_code = v;
        }
        if let Some(v) = self.phone_number {
            answers.phone_number = v;
        }
        if let Some(v) = self.entity_type {
            answers.entity_type = Some(v);
        }
        if let Some(v) = self.business_name {
            answers.business_name = v;
        }
        if let Some(v) = self.industry {
            answers.industry = v;
        }
        if let Some(v) = self.socials {
            answers.socials = v;
        }
        if let Some(v) = self.pillar {
            answers.pillar = Some(v);
        }
        if let Some(v) = self.message {
            answers.message = v;
        }
        if let Some(v) = self.consent {
            answers.consent = v;
        }
    }
}

/// Sentinel used when no social links survive filtering.
const NO_SOCIALS: &str = "No links provided.";

/// Sentinel used when the budget selection was cleared by a plan change.
const NO_BUDGET: &str = "Not specified";

/// The flattened record handed to the submission sink, verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    pub full_name: String,
    pub email: String,
    /// Rendered as "<code> <number>".
    pub phone: String,
    pub client_type: String,
    pub business_name: String,
    pub industry: String,
    pub pillar: String,
    pub plan_name: String,
    pub plan_description: String,
    /// Bulleted, newline-joined social links, or a sentinel when empty.
    pub social_networks: String,
    pub budget_range: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionPayload {
    /// Assemble the payload from the final answers and the active plan.
    ///
    /// Blank social entries are dropped; an all-blank list produces the
    /// "none provided" sentinel, never an empty or delimiter-only string.
    pub fn assemble(answers: &WizardAnswers, plan: Plan) -> Self {
        let socials: Vec<String> = answers
            .socials
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| format!("\u{2022} {s}"))
            .collect();
        let social_networks = if socials.is_empty() {
            NO_SOCIALS.to_string()
        } else {
            socials.join("\n")
        };

        Self {
            full_name: answers.full_name.clone(),
            email: answers.email.clone(),
            phone: format!("{} {}", answers.phone_code, answers.phone_number),
            client_type: answers
                .entity_type
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            business_name: answers.business_name.clone(),
            industry: answers.industry.clone(),
            pillar: answers
                .pillar
                .map(|p| p.label().to_string())
                .unwrap_or_default(),
            plan_name: plan.display_name().to_string(),
            plan_description: plan.description().to_string(),
            social_networks,
            budget_range: answers
                .budget
                .label()
                .unwrap_or(NO_BUDGET)
                .to_string(),
            message: answers.message.clone(),
            submitted_at: Utc::now(),
        }
    }
}
