//! REST endpoints for the wizard, consumed by the host page.
//!
//! The host renders steps and options; the wizard core owns all state.
//! Validation failures never become HTTP errors: they show up as inline
//! error state in the returned status snapshot.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::IntakeConfig;
use crate::error::SessionError;
use crate::wizard::manager::WizardManager;
use crate::wizard::model::{AnswersPatch, Pillar};

/// Shared state for wizard routes.
#[derive(Clone)]
pub struct WizardRouteState {
    pub manager: Arc<WizardManager>,
    pub config: Arc<IntakeConfig>,
}

#[derive(Debug, Deserialize)]
struct CreateParams {
    plan: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BudgetBody {
    label: String,
}

#[derive(Debug, Deserialize)]
struct UpsellBody {
    accept: bool,
}

fn error_response(err: SessionError) -> Response {
    let status = match &err {
        SessionError::NotFound { .. } => StatusCode::NOT_FOUND,
        SessionError::InvalidAction { .. } => StatusCode::CONFLICT,
        SessionError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (
        status,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}

/// GET /api/wizard/options
///
/// The fixed option sources the host page renders: country dialing codes,
/// industries and pillars. Budget ranges are plan-dependent and come with
/// each session's status instead.
async fn get_options(State(state): State<WizardRouteState>) -> impl IntoResponse {
    let pillars: Vec<&str> = Pillar::ALL.iter().map(|p| p.label()).collect();
    Json(serde_json::json!({
        "country_codes": state.config.country_codes,
        "default_phone_code": state.config.default_phone_code,
        "industries": state.config.industries,
        "pillars": pillars,
    }))
}

/// POST /api/wizard/sessions?plan=red
async fn create_session(
    State(state): State<WizardRouteState>,
    Query(params): Query<CreateParams>,
) -> impl IntoResponse {
    let (id, status) = state.manager.create_session(params.plan.as_deref()).await;
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id, "status": status })),
    )
}

/// GET /api/wizard/sessions/{id}
async fn get_status(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.manager.status(id).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/wizard/sessions/{id}
async fn delete_session(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.manager.delete_session(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /api/wizard/sessions/{id}/answers
async fn patch_answers(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AnswersPatch>,
) -> Response {
    match state.manager.update_answers(id, body).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/wizard/sessions/{id}/budget
async fn post_budget(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(body): Json<BudgetBody>,
) -> Response {
    match state.manager.select_budget(id, &body.label).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/wizard/sessions/{id}/advance
async fn post_advance(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.manager.advance(id).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/wizard/sessions/{id}/retreat
async fn post_retreat(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.manager.retreat(id).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/wizard/sessions/{id}/upsell
async fn post_upsell(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpsellBody>,
) -> Response {
    match state.manager.resolve_upsell(id, body.accept).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/wizard/sessions/{id}/submit
async fn post_submit(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.manager.submit(id).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(e),
    }
}

/// Build the wizard REST routes.
pub fn wizard_routes(state: WizardRouteState) -> Router {
    Router::new()
        .route("/api/wizard/options", get(get_options))
        .route("/api/wizard/sessions", post(create_session))
        .route(
            "/api/wizard/sessions/{id}",
            get(get_status).delete(delete_session),
        )
        .route("/api/wizard/sessions/{id}/answers", patch(patch_answers))
        .route("/api/wizard/sessions/{id}/budget", post(post_budget))
        .route("/api/wizard/sessions/{id}/advance", post(post_advance))
        .route("/api/wizard/sessions/{id}/retreat", post(post_retreat))
        .route("/api/wizard/sessions/{id}/upsell", post(post_upsell))
        .route("/api/wizard/sessions/{id}/submit", post(post_submit))
        .with_state(state)
}
