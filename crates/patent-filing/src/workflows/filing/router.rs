use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::SheetCounts;
use super::form::FormFields;
use super::render::DocumentRenderer;
use super::service::{FilingService, FilingServiceError};

/// Router builder exposing fee quotes, context assembly and submission.
pub fn filing_router<D>(service: Arc<FilingService<D>>) -> Router
where
    D: DocumentRenderer + 'static,
{
    Router::new()
        .route("/api/v1/filing/fees", post(fees_handler::<D>))
        .route("/api/v1/filing/context", post(context_handler::<D>))
        .route("/api/v1/filing/submit", post(submit_handler::<D>))
        .route("/api/v1/filing/overage", post(overage_handler::<D>))
        .with_state(service)
}

/// Body of the standalone excess-fee estimator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverageRequest {
    #[serde(default)]
    pub sheet_counts: OverageSheetCounts,
    #[serde(default)]
    pub others: OverageOthers,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverageSheetCounts {
    pub patent_document_sheets: u32,
    pub abstract_sheets: u32,
    pub claims_sheets: u32,
    pub drawing_sheets: u32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverageOthers {
    pub no_of_claims: u32,
}

impl From<OverageSheetCounts> for SheetCounts {
    fn from(value: OverageSheetCounts) -> Self {
        SheetCounts {
            patent_document: value.patent_document_sheets,
            abstract_sheets: value.abstract_sheets,
            claims: value.claims_sheets,
            drawings: value.drawing_sheets,
        }
    }
}

fn error_response(error: FilingServiceError) -> Response {
    let status = match &error {
        FilingServiceError::Intake(_) => StatusCode::BAD_REQUEST,
        FilingServiceError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        warn!(%error, "filing request failed");
    }
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn fees_handler<D>(
    State(service): State<Arc<FilingService<D>>>,
    Json(fields): Json<FormFields>,
) -> Response
where
    D: DocumentRenderer + 'static,
{
    match service.quote(&fields) {
        Ok(breakdown) => (StatusCode::OK, Json(breakdown)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn context_handler<D>(
    State(service): State<Arc<FilingService<D>>>,
    Json(fields): Json<FormFields>,
) -> Response
where
    D: DocumentRenderer + 'static,
{
    let today = Local::now().date_naive();
    match service.prepare(&fields, today) {
        Ok(context) => (StatusCode::OK, Json(context)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<D>(
    State(service): State<Arc<FilingService<D>>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response
where
    D: DocumentRenderer + 'static,
{
    let fields = FormFields::from(fields);
    let now = Local::now();
    match service.submit(&fields, now.date_naive()) {
        Ok(document) => {
            let file_name = document.file_name(&now.format("%Y%m%d_%H%M%S").to_string());
            let disposition = format!("attachment; filename=\"{file_name}\"");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, document.content_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document.bytes,
            )
                .into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn overage_handler<D>(
    State(service): State<Arc<FilingService<D>>>,
    Json(request): Json<OverageRequest>,
) -> Response
where
    D: DocumentRenderer + 'static,
{
    let quote = service.overage_quote(&request.sheet_counts.into(), request.others.no_of_claims);
    (StatusCode::OK, Json(quote)).into_response()
}
