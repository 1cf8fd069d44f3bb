//! Step validator — a pure function of (step, answers).
//!
//! Consolidates the per-step rules in one place so they are unit-testable
//! without a session or any I/O. The session converts failures into its
//! inline error state; nothing here has side effects.

use crate::error::ValidationError;
use crate::wizard::model::WizardAnswers;
use crate::wizard::step::WizardStep;

/// Validate the answers against the rules for one step.
///
/// SocialFootprint and Upsell always pass: the first is optional and the
/// second is a binary choice that cannot be invalid. Submitted has nothing
/// left to check.
pub fn validate_step(step: WizardStep, answers: &WizardAnswers) -> Result<(), ValidationError> {
    match step {
        WizardStep::Identity => {
            if answers.full_name.trim().is_empty()
                || answers.email.trim().is_empty()
                || answers.phone_number.trim().is_empty()
            {
                return Err(ValidationError::IncompleteIdentity);
            }
            if !answers.email.contains('@') {
                return Err(ValidationError::InvalidEmail);
            }
            Ok(())
        }
        WizardStep::Context => {
            if answers.entity_type.is_none() {
                return Err(ValidationError::MissingEntityType);
            }
            if answers.business_name.trim().is_empty() || answers.industry.trim().is_empty() {
                return Err(ValidationError::IncompleteContext);
            }
            Ok(())
        }
        WizardStep::Pillar => {
            if answers.pillar.is_none() {
                return Err(ValidationError::MissingPillar);
            }
            Ok(())
        }
        WizardStep::SocialFootprint => Ok(()),
        WizardStep::Budget => {
            if !answers.budget.is_selected() {
                return Err(ValidationError::MissingBudget);
            }
            Ok(())
        }
        WizardStep::Upsell => Ok(()),
        WizardStep::Message => {
            if answers.message.trim().is_empty() || !answers.consent {
                return Err(ValidationError::IncompleteMessage);
            }
            Ok(())
        }
        WizardStep::Submitted => Ok(()),
    }
}
