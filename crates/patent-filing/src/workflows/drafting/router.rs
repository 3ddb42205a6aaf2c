use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{DraftId, DraftPatch, DraftSection, ProjectId, StartDraft};
use super::generator::SectionGenerator;
use super::repository::{DraftRepository, RepositoryError};
use super::service::{DraftingError, DraftingService};

/// Router builder exposing the drafting endpoints.
pub fn drafting_router<R, G>(service: Arc<DraftingService<R, G>>) -> Router
where
    R: DraftRepository + 'static,
    G: SectionGenerator + 'static,
{
    Router::new()
        .route("/api/v1/drafts", post(start_handler::<R, G>))
        .route(
            "/api/v1/drafts/:draft_id",
            get(get_handler::<R, G>).patch(update_handler::<R, G>),
        )
        .route(
            "/api/v1/drafts/:draft_id/generate/:section",
            post(generate_handler::<R, G>),
        )
        .route(
            "/api/v1/drafts/:draft_id/rephrase/:section",
            post(rephrase_handler::<R, G>),
        )
        .route(
            "/api/v1/users/:user_id/projects",
            get(projects_handler::<R, G>),
        )
        .route(
            "/api/v1/projects/:project_id/drafts",
            get(project_drafts_handler::<R, G>),
        )
        .with_state(service)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RephraseRequest {
    #[serde(default)]
    pub instruction: Option<String>,
}

fn error_response(error: DraftingError) -> Response {
    let status = match &error {
        DraftingError::Repository(RepositoryError::NotFound) | DraftingError::ProjectNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        DraftingError::InvalidStep(_) | DraftingError::EmptySection(_) => StatusCode::BAD_REQUEST,
        DraftingError::Generation(_) => StatusCode::BAD_GATEWAY,
        DraftingError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let message = match &error {
        DraftingError::Repository(RepositoryError::NotFound) => "Draft not found".to_string(),
        other => other.to_string(),
    };
    if status.is_server_error() {
        warn!(%error, "drafting request failed");
    }
    (status, axum::Json(json!({ "error": message }))).into_response()
}

fn invalid_section(section: &str) -> Response {
    let payload = json!({ "error": format!("Invalid section: {section}") });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

pub(crate) async fn start_handler<R, G>(
    State(service): State<Arc<DraftingService<R, G>>>,
    axum::Json(request): axum::Json<StartDraft>,
) -> Response
where
    R: DraftRepository + 'static,
    G: SectionGenerator + 'static,
{
    match service.start(request) {
        Ok(started) => (StatusCode::CREATED, axum::Json(started)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, G>(
    State(service): State<Arc<DraftingService<R, G>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    G: SectionGenerator + 'static,
{
    match service.get(&DraftId(draft_id)) {
        Ok(draft) => (StatusCode::OK, axum::Json(draft)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, G>(
    State(service): State<Arc<DraftingService<R, G>>>,
    Path(draft_id): Path<String>,
    axum::Json(patch): axum::Json<DraftPatch>,
) -> Response
where
    R: DraftRepository + 'static,
    G: SectionGenerator + 'static,
{
    match service.update(&DraftId(draft_id), patch) {
        Ok(draft) => (StatusCode::OK, axum::Json(draft)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn generate_handler<R, G>(
    State(service): State<Arc<DraftingService<R, G>>>,
    Path((draft_id, section)): Path<(String, String)>,
) -> Response
where
    R: DraftRepository + 'static,
    G: SectionGenerator + 'static,
{
    let Some(parsed) = DraftSection::from_slug(&section) else {
        return invalid_section(&section);
    };
    match service.generate_section(&DraftId(draft_id), parsed) {
        Ok(content) => (StatusCode::OK, axum::Json(content)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rephrase_handler<R, G>(
    State(service): State<Arc<DraftingService<R, G>>>,
    Path((draft_id, section)): Path<(String, String)>,
    body: Option<axum::Json<RephraseRequest>>,
) -> Response
where
    R: DraftRepository + 'static,
    G: SectionGenerator + 'static,
{
    let Some(parsed) = DraftSection::from_slug(&section) else {
        return invalid_section(&section);
    };
    let instruction = body.and_then(|axum::Json(request)| request.instruction);
    match service.rephrase_section(&DraftId(draft_id), parsed, instruction.as_deref()) {
        Ok(content) => (StatusCode::OK, axum::Json(content)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn projects_handler<R, G>(
    State(service): State<Arc<DraftingService<R, G>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    G: SectionGenerator + 'static,
{
    match service.projects_for_user(&user_id) {
        Ok(projects) => (StatusCode::OK, axum::Json(json!({ "projects": projects }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn project_drafts_handler<R, G>(
    State(service): State<Arc<DraftingService<R, G>>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    G: SectionGenerator + 'static,
{
    match service.drafts_for_project(&ProjectId(project_id)) {
        Ok(drafts) => (StatusCode::OK, axum::Json(json!({ "drafts": drafts }))).into_response(),
        Err(error) => error_response(error),
    }
}
