//! Submission sink abstraction.
//!
//! The wizard core hands the finished payload to a sink and only cares
//! about the async success/failure signal. Production uses SMTP delivery;
//! local development logs the payload; tests use counting mocks.

pub mod email;
pub mod log;

use async_trait::async_trait;

use crate::error::SinkError;
use crate::wizard::model::SubmissionPayload;

pub use email::{EmailSink, EmailSinkConfig};
pub use log::LogSink;

/// Destination for a finished wizard submission.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Sink name for logs and error messages.
    fn name(&self) -> &str;

    /// Deliver one payload. Must not have side effects visible to the
    /// wizard beyond the returned signal.
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), SinkError>;
}
