//! Wizard step state machine — tracks where a prospective client is in the
//! qualification flow.

use serde::{Deserialize, Serialize};

use crate::wizard::model::Plan;

/// The steps of the qualification wizard.
///
/// Progresses Identity → Context → Pillar → SocialFootprint → Budget →
/// Message → Submitted, with Upsell inserted after Budget when the session
/// is on the Blue plan and the offer has not been resolved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Identity,
    Context,
    Pillar,
    SocialFootprint,
    Budget,
    Upsell,
    Message,
    Submitted,
}

impl WizardStep {
    /// The ordered step sequence for a plan. The Red plan never sees the
    /// upsell offer; Submitted is terminal and not part of the sequence.
    pub fn sequence(plan: Plan) -> &'static [WizardStep] {
        use WizardStep::*;
        match plan {
            Plan::Blue => &[
                Identity,
                Context,
                Pillar,
                SocialFootprint,
                Budget,
                Upsell,
                Message,
            ],
            Plan::Red => &[Identity, Context, Pillar, SocialFootprint, Budget, Message],
        }
    }

    /// Zero-based position of this step in the plan's sequence. Submitted
    /// (and any step absent from the sequence) reports the sequence length,
    /// so the index never exceeds the step count.
    pub fn index_in(self, plan: Plan) -> usize {
        let seq = Self::sequence(plan);
        seq.iter().position(|s| *s == self).unwrap_or(seq.len())
    }

    /// Number of steps in the plan's sequence.
    pub fn count_for(plan: Plan) -> usize {
        Self::sequence(plan).len()
    }

    /// Whether this step is terminal (the wizard accepts no further
    /// transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// Heading shown for the step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Identity => "Identity",
            Self::Context => "Context",
            Self::Pillar => "Focus",
            Self::SocialFootprint => "Digital footprint",
            Self::Budget => "Investment",
            Self::Upsell => "Upgrade offer",
            Self::Message => "Message",
            Self::Submitted => "Request received",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Identity => "identity",
            Self::Context => "context",
            Self::Pillar => "pillar",
            Self::SocialFootprint => "social_footprint",
            Self::Budget => "budget",
            Self::Upsell => "upsell",
            Self::Message => "message",
            Self::Submitted => "submitted",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blue_sequence_includes_upsell() {
        let seq = WizardStep::sequence(Plan::Blue);
        assert_eq!(seq.len(), 7);
        assert_eq!(seq[4], WizardStep::Budget);
        assert_eq!(seq[5], WizardStep::Upsell);
        assert_eq!(seq[6], WizardStep::Message);
    }

    #[test]
    fn red_sequence_skips_upsell() {
        let seq = WizardStep::sequence(Plan::Red);
        assert_eq!(seq.len(), 6);
        assert!(!seq.contains(&WizardStep::Upsell));
        assert_eq!(seq[4], WizardStep::Budget);
        assert_eq!(seq[5], WizardStep::Message);
    }

    #[test]
    fn index_never_exceeds_count() {
        for plan in [Plan::Blue, Plan::Red] {
            let count = WizardStep::count_for(plan);
            for step in [
                WizardStep::Identity,
                WizardStep::Context,
                WizardStep::Pillar,
                WizardStep::SocialFootprint,
                WizardStep::Budget,
                WizardStep::Upsell,
                WizardStep::Message,
                WizardStep::Submitted,
            ] {
                assert!(step.index_in(plan) <= count, "{step} under {plan:?}");
            }
        }
    }

    #[test]
    fn submitted_is_terminal() {
        assert!(WizardStep::Submitted.is_terminal());
        assert!(!WizardStep::Identity.is_terminal());
        assert!(!WizardStep::Message.is_terminal());
    }

    #[test]
    fn display_matches_serde() {
        let steps = [
            WizardStep::Identity,
            WizardStep::Context,
            WizardStep::Pillar,
            WizardStep::SocialFootprint,
            WizardStep::Budget,
            WizardStep::Upsell,
            WizardStep::Message,
            WizardStep::Submitted,
        ];
        for step in steps {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }
}
