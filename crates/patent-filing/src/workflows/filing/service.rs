use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::context::ApplicationContext;
use super::domain::{FilingRequest, SheetCounts};
use super::fees::{FeeBreakdown, OverageQuote};
use super::form::FormFields;
use super::intake::{IntakeGuard, IntakeViolation};
use super::render::{DocumentRenderer, RenderError, RenderedDocument};
use super::rules::{Assessment, FilingRules};

/// Service composing the intake guard, the filing rules and the document
/// renderer.
pub struct FilingService<D> {
    guard: IntakeGuard,
    rules: Arc<FilingRules>,
    renderer: Arc<D>,
}

impl<D> FilingService<D>
where
    D: DocumentRenderer + 'static,
{
    pub fn new(rules: Arc<FilingRules>, renderer: Arc<D>) -> Self {
        Self {
            guard: IntakeGuard::new(),
            rules,
            renderer,
        }
    }

    pub fn rules(&self) -> &FilingRules {
        &self.rules
    }

    fn assess(&self, fields: &FormFields) -> Result<(FilingRequest, Assessment), FilingServiceError> {
        let request = self.guard.request_from_form(fields)?;
        let assessment = self.rules.assess(&request);

        debug!(
            inventors = request.inventors.len(),
            applicants = request.applicants.len(),
            agents = request.agents.len(),
            "decoded filing request"
        );

        Ok((request, assessment))
    }

    /// Price a filing without assembling the template context.
    pub fn quote(&self, fields: &FormFields) -> Result<FeeBreakdown, FilingServiceError> {
        let (request, assessment) = self.assess(fields)?;
        info!(
            application_type = request.application_type.label(),
            category = %assessment.main_applicant_category,
            total_fee = assessment.fees.total_fee(),
            "quoted filing fees"
        );
        Ok(assessment.fees)
    }

    /// Build the context the document template consumes.
    pub fn prepare(
        &self,
        fields: &FormFields,
        filing_date: NaiveDate,
    ) -> Result<ApplicationContext, FilingServiceError> {
        let (request, assessment) = self.assess(fields)?;
        let context = ApplicationContext::build(&request, &assessment, filing_date);
        info!(
            category = %context.main_applicant_category,
            expedited_allowed = context.is_expedited_allowed,
            total_fee = context.total_fee,
            "prepared application context"
        );
        Ok(context)
    }

    /// Prepare the context and hand it to the renderer.
    pub fn submit(
        &self,
        fields: &FormFields,
        filing_date: NaiveDate,
    ) -> Result<RenderedDocument, FilingServiceError> {
        let context = self.prepare(fields, filing_date)?;
        let document = self.renderer.render(&context)?;
        info!(
            bytes = document.bytes.len(),
            content_type = %document.content_type,
            "rendered application document"
        );
        Ok(document)
    }

    pub fn overage_quote(&self, sheet_counts: &SheetCounts, claim_count: u32) -> OverageQuote {
        self.rules.calculator().overage_quote(sheet_counts, claim_count)
    }
}

/// Error raised by the filing service.
#[derive(Debug, thiserror::Error)]
pub enum FilingServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Render(#[from] RenderError),
}
