//! Filing intake: decode the form, resolve the applicant category, check
//! expedited eligibility, price the filing and assemble the template context.
//!
//! Everything below the service is a pure function of the request and the
//! injected [`FilingRules`]; only the renderer touches the outside world.

pub mod context;
pub mod decoder;
pub mod domain;
pub mod fees;
pub mod form;
pub mod intake;
pub mod render;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use context::{checkbox, ApplicationContext, SelectionFlags};
pub use domain::{
    AgentRecord, ApplicantCategory, ApplicationType, ConventionDetails, ExaminationPreference,
    FilingRequest, PersonRecord, PublicationPreference, ReferencedApplication, ServiceAddress,
    SheetCounts, Toggle,
};
pub use fees::{
    CategoryFees, FeeBreakdown, FeeCalculator, FeeInputs, FeeSchedule, FeeScheduleError,
    OverageQuote, SurchargedFee,
};
pub use form::FormFields;
pub use intake::{IntakeGuard, IntakeViolation};
pub use render::{DocumentRenderer, RenderError, RenderedDocument};
pub use router::filing_router;
pub use rules::{
    Assessment, CategoryPriority, ExpeditedEligibility, ExpeditedPolicy, FilingRules,
};
pub use service::{FilingService, FilingServiceError};
