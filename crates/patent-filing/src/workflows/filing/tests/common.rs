use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::filing::context::ApplicationContext;
use crate::workflows::filing::domain::{ApplicantCategory, PersonRecord};
use crate::workflows::filing::form::FormFields;
use crate::workflows::filing::render::{DocumentRenderer, RenderError, RenderedDocument};
use crate::workflows::filing::rules::FilingRules;
use crate::workflows::filing::{filing_router, FilingService};

/// A complete, valid Complete-application form with one natural-person
/// applicant and one inventor.
pub(super) fn filing_form() -> FormFields {
    FormFields::new()
        .with("applicationType", "Complete")
        .with("title", "Self-cleaning solar panel mount")
        .with("publicationPreference", "Early")
        .with("examinationPreference", "Ordinary")
        .with("inventorsSameAsApplicants", "Yes")
        .with("inventors[0][name]", "Asha Rao")
        .with("inventors[0][gender]", "Female")
        .with("inventors[0][nationality]", "Indian")
        .with("inventors[0][residency]", "India")
        .with("inventors[0][address]", "12 MG Road, Bengaluru")
        .with("inventors[0][state]", "Karnataka")
        .with("applicants[0][name]", "Asha Rao")
        .with("applicants[0][gender]", "Female")
        .with("applicants[0][category]", "Natural Person")
        .with("applicants[0][nationality]", "Indian")
        .with("applicants[0][residency]", "India")
        .with("applicants[0][address]", "12 MG Road, Bengaluru")
        .with("applicants[0][state]", "Karnataka")
        .with("agents[0][inpaNo]", "IN/PA-1234")
        .with("agents[0][name]", "R. Menon")
        .with("agents[0][mobile]", "9800000000")
        .with("agents[0][email]", "menon@example.in")
        .with("serviceAddress[serviceName]", "Menon & Co")
        .with("serviceAddress[postalAddress]", "4 Residency Road, Bengaluru")
        .with("serviceAddress[mobile]", "9800000000")
        .with("serviceAddress[email]", "filings@menon.example.in")
        .with("sheetCounts[patentDocumentSheets]", "20")
        .with("sheetCounts[abstractSheets]", "1")
        .with("sheetCounts[claimsSheets]", "3")
        .with("sheetCounts[drawingSheets]", "4")
        .with("noOfClaims", "8")
        .with("noOfDrawings", "4")
}

pub(super) fn applicant(category: ApplicantCategory, gender: &str) -> PersonRecord {
    PersonRecord {
        name: format!("{} applicant", category.label()),
        gender: gender.to_string(),
        category: Some(category),
        ..PersonRecord::default()
    }
}

#[derive(Default)]
pub(super) struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn render(&self, context: &ApplicationContext) -> Result<RenderedDocument, RenderError> {
        Ok(RenderedDocument {
            bytes: format!("{} / {}", context.title, context.total_fee).into_bytes(),
            content_type: mime::TEXT_PLAIN_UTF_8,
            extension: "txt",
        })
    }
}

pub(super) struct MissingTemplateRenderer;

impl DocumentRenderer for MissingTemplateRenderer {
    fn render(&self, _context: &ApplicationContext) -> Result<RenderedDocument, RenderError> {
        Err(RenderError::TemplateUnavailable("form1_template".to_string()))
    }
}

pub(super) fn build_service() -> FilingService<PlainTextRenderer> {
    FilingService::new(
        Arc::new(FilingRules::standard()),
        Arc::new(PlainTextRenderer),
    )
}

pub(super) fn filing_router_with_service<D: DocumentRenderer + 'static>(
    service: FilingService<D>,
) -> axum::Router {
    filing_router(Arc::new(service))
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}
