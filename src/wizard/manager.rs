//! WizardManager — owns the live wizard sessions and drives transitions
//! against the shared submission sink.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::SessionError;
use crate::sink::SubmissionSink;
use crate::wizard::model::AnswersPatch;
use crate::wizard::session::{Advanced, Retreated, SessionStatus, SubmitOutcome, WizardSession};

/// Result of a retreat, as reported to the host page. `exit` is set when
/// the session was already at the first step.
#[derive(Debug, Clone, Serialize)]
pub struct RetreatResponse {
    pub exit: bool,
    pub status: SessionStatus,
}

/// In-memory session registry. Sessions are memory-only and die with the
/// process; the host page deletes a session when the visitor navigates
/// away.
pub struct WizardManager {
    sessions: RwLock<HashMap<Uuid, WizardSession>>,
    sink: Arc<dyn SubmissionSink>,
}

impl WizardManager {
    pub fn new(sink: Arc<dyn SubmissionSink>) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            sink,
        })
    }

    /// Create a session, with the plan resolved from the `plan` query
    /// parameter. Returns the new id and the initial status snapshot.
    pub async fn create_session(&self, plan_param: Option<&str>) -> (Uuid, SessionStatus) {
        let session = WizardSession::from_query_param(plan_param);
        let status = session.status();
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, session);
        info!(session = %id, plan = %status.plan, "wizard session created");
        (id, status)
    }

    /// Drop a session (visitor navigated away, or the host is done with a
    /// submitted one). Any in-flight delivery is simply abandoned.
    pub async fn delete_session(&self, id: Uuid) -> Result<(), SessionError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                debug!(session = %id, "wizard session deleted");
                Ok(())
            }
            None => Err(SessionError::NotFound { id }),
        }
    }

    /// Status snapshot for the host page.
    pub async fn status(&self, id: Uuid) -> Result<SessionStatus, SessionError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id).ok_or(SessionError::NotFound { id })?;
        Ok(session.status())
    }

    /// Apply a partial answer update. Edits clear any inline error.
    pub async fn update_answers(
        &self,
        id: Uuid,
        patch: AnswersPatch,
    ) -> Result<SessionStatus, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        session.apply(patch);
        Ok(session.status())
    }

    /// Select a budget-range label for the session's current plan.
    pub async fn select_budget(
        &self,
        id: Uuid,
        label: &str,
    ) -> Result<SessionStatus, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        // an invalid label becomes inline session state, not an HTTP error
        let _ = session.select_budget(label);
        Ok(session.status())
    }

    /// Advance the session. A validation failure is converted to inline
    /// session state; advancing from Message runs a submission attempt, per
    /// the wizard's transition rules.
    pub async fn advance(&self, id: Uuid) -> Result<SessionStatus, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        match session.advance() {
            Ok(Advanced::NeedsSubmit) => {
                session.submit(self.sink.as_ref()).await?;
            }
            Ok(Advanced::Moved(_)) | Ok(Advanced::Terminal) => {}
            Err(SessionError::Validation(_)) => {
                // already surfaced on the session
            }
            Err(e) => return Err(e),
        }
        Ok(session.status())
    }

    /// Go back one step. At the first step this reports `exit` instead.
    pub async fn retreat(&self, id: Uuid) -> Result<RetreatResponse, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        let exit = matches!(session.retreat(), Retreated::Exit);
        Ok(RetreatResponse {
            exit,
            status: session.status(),
        })
    }

    /// Resolve the upsell offer.
    pub async fn resolve_upsell(
        &self,
        id: Uuid,
        accept: bool,
    ) -> Result<SessionStatus, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        session.resolve_upsell(accept)?;
        info!(session = %id, accept, "upsell resolved");
        Ok(session.status())
    }

    /// Run a submission attempt. The session stays registered after a
    /// successful delivery so a repeated submit remains an idempotent
    /// no-op.
    pub async fn submit(&self, id: Uuid) -> Result<SessionStatus, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        let outcome = session.submit(self.sink.as_ref()).await?;
        if outcome == SubmitOutcome::Delivered {
            info!(session = %id, "wizard session submitted");
        }
        Ok(session.status())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::SinkError;
    use crate::wizard::model::{EntityType, Pillar, Plan, SubmissionPayload};
    use crate::wizard::step::WizardStep;

    struct CountingSink {
        calls: AtomicUsize,
    }

    impl CountingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SubmissionSink for CountingSink {
        fn name(&self) -> &str {
            "counting"
        }

        async fn deliver(&self, _payload: &SubmissionPayload) -> Result<(), SinkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn full_patch() -> AnswersPatch {
        AnswersPatch {
            full_name: Some("Alejandra Rivas".to_string()),
            email: Some("alejandra@acme.example".to_string()),
            phone_number: Some("999 999 999".to_string()),
            entity_type: Some(EntityType::Company),
            business_name: Some("Acme Andina".to_string()),
            industry: Some("Retail".to_string()),
            pillar: Some(Pillar::Sales),
            message: Some("We want to scale operations.".to_string()),
            consent: Some(true),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_resolves_plan_from_query_param() {
        let manager = WizardManager::new(CountingSink::new());
        let (_, status) = manager.create_session(Some("red")).await;
        assert_eq!(status.plan, Plan::Red);
        let (_, status) = manager.create_session(Some("anything")).await;
        assert_eq!(status.plan, Plan::Blue);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let manager = WizardManager::new(CountingSink::new());
        let missing = Uuid::new_v4();
        assert!(matches!(
            manager.status(missing).await,
            Err(SessionError::NotFound { .. })
        ));
        assert!(matches!(
            manager.advance(missing).await,
            Err(SessionError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn full_red_walk_submits_through_advance() {
        let sink = CountingSink::new();
        let manager = WizardManager::new(Arc::clone(&sink) as Arc<dyn SubmissionSink>);
        let (id, _) = manager.create_session(Some("red")).await;

        manager.update_answers(id, full_patch()).await.unwrap();
        for _ in 0..4 {
            manager.advance(id).await.unwrap();
        }
        let status = manager.select_budget(id, "$800 - $1,500 USD").await.unwrap();
        assert!(status.error.is_none());
        let status = manager.advance(id).await.unwrap();
        assert_eq!(status.step, WizardStep::Message);

        // advancing from Message runs the submission attempt
        let status = manager.advance(id).await.unwrap();
        assert_eq!(status.step, WizardStep::Submitted);
        assert!(status.is_success);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn validation_failure_is_inline_not_an_error() {
        let manager = WizardManager::new(CountingSink::new());
        let (id, _) = manager.create_session(None).await;
        let status = manager.advance(id).await.unwrap();
        assert_eq!(status.step, WizardStep::Identity);
        assert!(status.error.is_some());
    }

    #[tokio::test]
    async fn retreat_at_first_step_reports_exit() {
        let manager = WizardManager::new(CountingSink::new());
        let (id, _) = manager.create_session(None).await;
        let response = manager.retreat(id).await.unwrap();
        assert!(response.exit);
        assert_eq!(response.status.step, WizardStep::Identity);
    }

    #[tokio::test]
    async fn delete_session_then_status_is_not_found() {
        let manager = WizardManager::new(CountingSink::new());
        let (id, _) = manager.create_session(None).await;
        manager.delete_session(id).await.unwrap();
        assert!(matches!(
            manager.status(id).await,
            Err(SessionError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn repeated_submit_makes_one_sink_call() {
        let sink = CountingSink::new();
        let manager = WizardManager::new(Arc::clone(&sink) as Arc<dyn SubmissionSink>);
        let (id, _) = manager.create_session(Some("red")).await;

        manager.update_answers(id, full_patch()).await.unwrap();
        for _ in 0..4 {
            manager.advance(id).await.unwrap();
        }
        manager.select_budget(id, "$800 - $1,500 USD").await.unwrap();
        manager.advance(id).await.unwrap();

        manager.submit(id).await.unwrap();
        manager.submit(id).await.unwrap();
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }
}
