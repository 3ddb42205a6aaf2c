use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed set of applicant categories recognised by the fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ApplicantCategory {
    #[serde(rename = "Natural Person")]
    NaturalPerson,
    #[serde(rename = "Small Entity")]
    SmallEntity,
    #[serde(rename = "Start-Up")]
    StartUp,
    #[serde(rename = "Educational institution")]
    EducationalInstitution,
    #[serde(rename = "Others")]
    Others,
}

impl ApplicantCategory {
    pub const ALL: [ApplicantCategory; 5] = [
        ApplicantCategory::NaturalPerson,
        ApplicantCategory::SmallEntity,
        ApplicantCategory::StartUp,
        ApplicantCategory::EducationalInstitution,
        ApplicantCategory::Others,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicantCategory::NaturalPerson => "Natural Person",
            ApplicantCategory::SmallEntity => "Small Entity",
            ApplicantCategory::StartUp => "Start-Up",
            ApplicantCategory::EducationalInstitution => "Educational institution",
            ApplicantCategory::Others => "Others",
        }
    }

    /// Exact label match; the form posts the labels verbatim.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == value.trim())
    }

    /// Category as decoded from the form: anything unrecognised is `Others`.
    pub fn from_form_value(value: &str) -> Self {
        Self::from_label(value).unwrap_or(ApplicantCategory::Others)
    }
}

impl fmt::Display for ApplicantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationType {
    Provisional,
    Complete,
}

impl ApplicationType {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationType::Provisional => "Provisional",
            ApplicationType::Complete => "Complete",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "Provisional" => Some(ApplicationType::Provisional),
            "Complete" => Some(ApplicationType::Complete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationPreference {
    Early,
    #[default]
    Ordinary,
}

impl PublicationPreference {
    pub fn from_form_value(value: &str) -> Self {
        if value.trim() == "Early" {
            PublicationPreference::Early
        } else {
            PublicationPreference::Ordinary
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PublicationPreference::Early => "Early",
            PublicationPreference::Ordinary => "Ordinary",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExaminationPreference {
    Expedited,
    #[default]
    Ordinary,
}

impl ExaminationPreference {
    pub fn from_form_value(value: &str) -> Self {
        if value.trim() == "Expedited" {
            ExaminationPreference::Expedited
        } else {
            ExaminationPreference::Ordinary
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExaminationPreference::Expedited => "Expedited",
            ExaminationPreference::Ordinary => "Ordinary",
        }
    }
}

/// Answer to a yes/no question on the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toggle {
    Yes,
    No,
    #[default]
    Unanswered,
}

impl Toggle {
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "Yes" => Toggle::Yes,
            "No" => Toggle::No,
            _ => Toggle::Unanswered,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Toggle::Yes => "Yes",
            Toggle::No => "No",
            Toggle::Unanswered => "",
        }
    }
}

/// Inventor or applicant as listed on the form.
///
/// Only applicants carry a category; inventors and the stand-in default
/// record leave it unset, which serializes as an empty string so template
/// placeholders stay addressable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub gender: String,
    pub nationality: String,
    pub residency: String,
    pub address: String,
    pub state: String,
    #[serde(
        default,
        serialize_with = "category_label",
        deserialize_with = "category_from_label"
    )]
    pub category: Option<ApplicantCategory>,
}

impl PersonRecord {
    pub fn is_female(&self) -> bool {
        self.gender.trim().eq_ignore_ascii_case("female")
    }
}

fn category_label<S>(category: &Option<ApplicantCategory>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(category.map(ApplicantCategory::label).unwrap_or_default())
}

fn category_from_label<'de, D>(deserializer: D) -> Result<Option<ApplicantCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .map(|value| ApplicantCategory::from_form_value(&value)))
}

/// Registered patent agent authorised on the filing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub inpa_no: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
}

/// Address for service of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAddress {
    pub name: String,
    pub postal_address: String,
    pub telephone: String,
    pub mobile: String,
    pub fax: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCounts {
    pub patent_document: u32,
    pub abstract_sheets: u32,
    pub claims: u32,
    pub drawings: u32,
}

impl SheetCounts {
    pub fn total(&self) -> u64 {
        u64::from(self.patent_document)
            + u64::from(self.abstract_sheets)
            + u64::from(self.claims)
            + u64::from(self.drawings)
    }
}

/// Priority application under the Paris convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionDetails {
    pub country: String,
    pub number: String,
    pub date: String,
    pub applicant: String,
    pub title: String,
    pub ipc: String,
}

/// Number/date pair for PCT, divisional and patent-of-addition references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedApplication {
    pub number: String,
    pub date: String,
}

/// Validated, decoded filing request handed to the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRequest {
    pub application_type: ApplicationType,
    pub title: String,
    pub publication: PublicationPreference,
    pub examination: ExaminationPreference,
    pub inventors_same_as_applicants: Toggle,
    pub previous_provisional: Toggle,
    pub provisional_number: String,
    pub inventors: Vec<PersonRecord>,
    pub applicants: Vec<PersonRecord>,
    pub agents: Vec<AgentRecord>,
    pub service_address: ServiceAddress,
    pub sheet_counts: SheetCounts,
    pub claim_count: u32,
    pub drawing_count: u32,
    pub convention: ConventionDetails,
    pub pct: ReferencedApplication,
    pub divisional: ReferencedApplication,
    pub addition: ReferencedApplication,
}
