//! Log sink — local development fallback when SMTP is not configured.

use async_trait::async_trait;

use crate::error::SinkError;
use crate::sink::SubmissionSink;
use crate::wizard::model::SubmissionPayload;

/// Sink that writes the payload to the log and always succeeds.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SinkError> {
        tracing::info!(
            business = %payload.business_name,
            plan = %payload.plan_name,
            budget = %payload.budget_range,
            "wizard submission (log sink)"
        );
        tracing::debug!(payload = ?payload, "full submission payload");
        Ok(())
    }
}
