use super::decoder::{
    decode_agents, decode_applicants, decode_group, decode_inventors, decode_service_address,
    APPLICANTS,
};
use super::domain::{
    ApplicantCategory, ApplicationType, ConventionDetails, ExaminationPreference, FilingRequest,
    PublicationPreference, ReferencedApplication, SheetCounts, Toggle,
};
use super::form::{indexed_key, nested_key, FieldKey, FormFields};

const APPLICATION_TYPE: &str = "applicationType";
const LEGACY_APPLICATION_TYPE: &str = "provisionalOrComplete";
const TITLE: &str = "title";
const REQUIRED_AGENT_FIELDS: [&str; 4] = ["inpaNo", "name", "mobile", "email"];
const REQUIRED_SERVICE_FIELDS: [&str; 4] = ["serviceName", "postalAddress", "mobile", "email"];
const SHEET_FIELDS: [&str; 4] = [
    "patentDocumentSheets",
    "abstractSheets",
    "claimsSheets",
    "drawingSheets",
];

/// Preconditions the boundary enforces before the rule engine runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid application type: {0}")]
    InvalidApplicationType(String),
    #[error("At least one inventor is required")]
    MissingInventor,
    #[error("At least one applicant is required")]
    MissingApplicant,
    #[error("Missing required agent field: {0}")]
    MissingAgentField(String),
    #[error("Missing required service address field: {0}")]
    MissingServiceAddressField(String),
    #[error("Invalid applicant category: {0}")]
    InvalidCategory(String),
    #[error("Count field {field} must be a non-negative integer, found '{value}'")]
    NonNumericCount { field: String, value: String },
}

/// Validates raw form fields and decodes them into a [`FilingRequest`].
///
/// Checks run in a fixed order and the first failure is reported, so the
/// caller always names a single violated precondition.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn new() -> Self {
        Self
    }

    pub fn request_from_form(&self, fields: &FormFields) -> Result<FilingRequest, IntakeViolation> {
        let application_type = application_type(fields)?;
        let title = fields
            .non_empty(TITLE)
            .ok_or(IntakeViolation::MissingField(TITLE))?
            .to_string();
        let application_type = ApplicationType::from_label(application_type)
            .ok_or_else(|| IntakeViolation::InvalidApplicationType(application_type.to_string()))?;

        if !fields.keys().any(|key| key.starts_with("inventors[")) {
            return Err(IntakeViolation::MissingInventor);
        }

        let named_applicants = decode_group(fields, &APPLICANTS, |entry| entry.index());
        if named_applicants.is_empty() {
            return Err(IntakeViolation::MissingApplicant);
        }

        for field in REQUIRED_AGENT_FIELDS {
            let key = indexed_key("agents", 0, field);
            if fields.non_empty(&key).is_none() {
                return Err(IntakeViolation::MissingAgentField(key));
            }
        }

        for field in REQUIRED_SERVICE_FIELDS {
            let key = nested_key("serviceAddress", field);
            if fields.non_empty(&key).is_none() {
                return Err(IntakeViolation::MissingServiceAddressField(key));
            }
        }

        for (key, value) in fields.iter() {
            let key = FieldKey::parse(key);
            if !matches!(key, FieldKey::Scalar(_))
                && key.field() == "category"
                && !value.is_empty()
                && ApplicantCategory::from_label(value).is_none()
            {
                return Err(IntakeViolation::InvalidCategory(value.to_string()));
            }
        }

        let sheet_counts = SheetCounts {
            patent_document: count(fields, &nested_key("sheetCounts", SHEET_FIELDS[0]))?,
            abstract_sheets: count(fields, &nested_key("sheetCounts", SHEET_FIELDS[1]))?,
            claims: count(fields, &nested_key("sheetCounts", SHEET_FIELDS[2]))?,
            drawings: count(fields, &nested_key("sheetCounts", SHEET_FIELDS[3]))?,
        };
        let claim_count = count(fields, "noOfClaims")?;
        let drawing_count = count(fields, "noOfDrawings")?;

        Ok(FilingRequest {
            application_type,
            title,
            publication: PublicationPreference::from_form_value(fields.text("publicationPreference")),
            examination: ExaminationPreference::from_form_value(fields.text("examinationPreference")),
            inventors_same_as_applicants: Toggle::from_form_value(
                fields.text("inventorsSameAsApplicants"),
            ),
            previous_provisional: Toggle::from_form_value(
                fields.text_or("previousProvisionalFiled", "No"),
            ),
            provisional_number: fields.text("provisionalApplicationNumber").to_string(),
            inventors: decode_inventors(fields),
            applicants: decode_applicants(fields),
            agents: decode_agents(fields),
            service_address: decode_service_address(fields),
            sheet_counts,
            claim_count,
            drawing_count,
            convention: ConventionDetails {
                country: fields.text("conventionCountry").to_string(),
                number: fields.text("conventionNumber").to_string(),
                date: fields.text("conventionDate").to_string(),
                applicant: fields.text("conventionApplicant").to_string(),
                title: fields.text("conventionTitle").to_string(),
                ipc: fields.text("conventionIPC").to_string(),
            },
            pct: referenced(fields, "pct"),
            divisional: referenced(fields, "divisional"),
            addition: referenced(fields, "addition"),
        })
    }
}

fn application_type(fields: &FormFields) -> Result<&str, IntakeViolation> {
    let value = if fields.contains(APPLICATION_TYPE) {
        fields.non_empty(APPLICATION_TYPE)
    } else {
        fields.non_empty(LEGACY_APPLICATION_TYPE)
    };
    value.ok_or(IntakeViolation::MissingField(APPLICATION_TYPE))
}

/// Absent or blank counts read as zero.
fn count(fields: &FormFields, key: &str) -> Result<u32, IntakeViolation> {
    match fields.non_empty(key) {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| IntakeViolation::NonNumericCount {
                field: key.to_string(),
                value: raw.to_string(),
            }),
    }
}

fn referenced(fields: &FormFields, prefix: &str) -> ReferencedApplication {
    ReferencedApplication {
        number: fields.text(&format!("{prefix}Number")).to_string(),
        date: fields.text(&format!("{prefix}Date")).to_string(),
    }
}
