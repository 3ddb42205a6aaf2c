use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{
    AgentRecord, ApplicantCategory, ApplicationType, ConventionDetails, ExaminationPreference,
    FilingRequest, PersonRecord, PublicationPreference, ReferencedApplication, ServiceAddress,
    SheetCounts, Toggle,
};
use super::fees::FeeBreakdown;
use super::rules::Assessment;

const CONTEXT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Glyph a text renderer prints for a selection flag.
pub fn checkbox(selected: bool) -> char {
    if selected {
        '☑'
    } else {
        '☐'
    }
}

/// One flag per value of every closed-set field, so the template never
/// branches on raw values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionFlags {
    pub type_provisional: bool,
    pub type_complete: bool,
    pub category_natural: bool,
    pub category_small: bool,
    pub category_startup: bool,
    pub category_educational: bool,
    pub category_others: bool,
    pub inventors_same_yes: bool,
    pub inventors_same_no: bool,
    pub previous_provisional_yes: bool,
    pub previous_provisional_no: bool,
    pub publication_early: bool,
    pub publication_ordinary: bool,
    pub examination_expedited: bool,
    pub examination_ordinary: bool,
}

impl SelectionFlags {
    fn from_request(request: &FilingRequest, category: ApplicantCategory) -> Self {
        Self {
            type_provisional: request.application_type == ApplicationType::Provisional,
            type_complete: request.application_type == ApplicationType::Complete,
            category_natural: category == ApplicantCategory::NaturalPerson,
            category_small: category == ApplicantCategory::SmallEntity,
            category_startup: category == ApplicantCategory::StartUp,
            category_educational: category == ApplicantCategory::EducationalInstitution,
            category_others: category == ApplicantCategory::Others,
            inventors_same_yes: request.inventors_same_as_applicants == Toggle::Yes,
            inventors_same_no: request.inventors_same_as_applicants == Toggle::No,
            previous_provisional_yes: request.previous_provisional == Toggle::Yes,
            previous_provisional_no: request.previous_provisional == Toggle::No,
            publication_early: request.publication == PublicationPreference::Early,
            publication_ordinary: request.publication == PublicationPreference::Ordinary,
            examination_expedited: request.examination == ExaminationPreference::Expedited,
            examination_ordinary: request.examination == ExaminationPreference::Ordinary,
        }
    }
}

/// Everything the document template addresses. Built once per request and
/// handed to the renderer; every key is present even when the form left it
/// blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationContext {
    pub application_type: &'static str,
    pub title: String,
    pub date: String,
    pub previous_provisional: &'static str,
    pub provisional_number: String,
    pub inventors: Vec<PersonRecord>,
    pub inventor: PersonRecord,
    pub applicants: Vec<PersonRecord>,
    pub applicant: PersonRecord,
    pub main_applicant_category: ApplicantCategory,
    pub is_expedited_allowed: bool,
    pub expedited_reason: String,
    pub no_of_claims: u32,
    pub no_of_drawings: u32,
    pub sheet_counts: SheetCounts,
    pub publication_preference: &'static str,
    pub examination_preference: &'static str,
    pub agents: Vec<AgentRecord>,
    pub agent1: AgentRecord,
    pub agent2: AgentRecord,
    pub fees: FeeBreakdown,
    pub total_fee: u64,
    pub selected: SelectionFlags,
    pub convention: ConventionDetails,
    pub pct: ReferencedApplication,
    pub divisional: ReferencedApplication,
    pub addition: ReferencedApplication,
    pub service_address: ServiceAddress,
}

impl ApplicationContext {
    pub fn build(request: &FilingRequest, assessment: &Assessment, filing_date: NaiveDate) -> Self {
        let category = assessment.main_applicant_category;
        let agent = |index: usize| request.agents.get(index).cloned().unwrap_or_default();

        Self {
            application_type: request.application_type.label(),
            title: request.title.clone(),
            date: filing_date.format(CONTEXT_DATE_FORMAT).to_string(),
            previous_provisional: match request.previous_provisional {
                Toggle::Unanswered => Toggle::No.label(),
                answered => answered.label(),
            },
            provisional_number: request.provisional_number.clone(),
            inventors: request.inventors.clone(),
            inventor: request.inventors.first().cloned().unwrap_or_default(),
            applicants: request.applicants.clone(),
            applicant: request.applicants.first().cloned().unwrap_or_default(),
            main_applicant_category: category,
            is_expedited_allowed: assessment.eligibility.allowed,
            expedited_reason: assessment.eligibility.reason_text().to_string(),
            no_of_claims: request.claim_count,
            no_of_drawings: request.drawing_count,
            sheet_counts: request.sheet_counts,
            publication_preference: request.publication.label(),
            examination_preference: request.examination.label(),
            agents: request.agents.clone(),
            agent1: agent(0),
            agent2: agent(1),
            fees: assessment.fees,
            total_fee: assessment.fees.total_fee(),
            selected: SelectionFlags::from_request(request, category),
            convention: request.convention.clone(),
            pct: request.pct.clone(),
            divisional: request.divisional.clone(),
            addition: request.addition.clone(),
            service_address: request.service_address.clone(),
        }
    }
}
