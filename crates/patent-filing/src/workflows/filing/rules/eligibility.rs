use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicantCategory, PersonRecord};

pub const NO_APPLICANTS_REASON: &str = "No applicants found";
pub const NOT_ELIGIBLE_REASON: &str = "Expedited examination not available – no eligible applicant (Start-Up, Small Entity, Educational Institution, or Female Natural Person).";

/// Outcome of the expedited-examination check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpeditedEligibility {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl ExpeditedEligibility {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn refused(reason: &str) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.to_string()),
        }
    }

    pub fn reason_text(&self) -> &str {
        self.reason.as_deref().unwrap_or_default()
    }
}

/// Which applicants open the expedited examination track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpeditedPolicy {
    eligible_categories: BTreeSet<ApplicantCategory>,
}

impl ExpeditedPolicy {
    pub fn new(eligible_categories: BTreeSet<ApplicantCategory>) -> Self {
        Self {
            eligible_categories,
        }
    }

    pub fn standard() -> Self {
        Self::new(BTreeSet::from([
            ApplicantCategory::StartUp,
            ApplicantCategory::SmallEntity,
            ApplicantCategory::EducationalInstitution,
        ]))
    }

    pub fn is_eligible_category(&self, category: ApplicantCategory) -> bool {
        self.eligible_categories.contains(&category)
    }

    fn qualifies(&self, applicant: &PersonRecord) -> bool {
        match applicant.category {
            Some(category) if self.is_eligible_category(category) => true,
            Some(ApplicantCategory::NaturalPerson) => applicant.is_female(),
            _ => false,
        }
    }

    pub fn evaluate(&self, applicants: &[PersonRecord]) -> ExpeditedEligibility {
        if applicants.is_empty() {
            return ExpeditedEligibility::refused(NO_APPLICANTS_REASON);
        }

        if applicants.iter().any(|applicant| self.qualifies(applicant)) {
            ExpeditedEligibility::allowed()
        } else {
            ExpeditedEligibility::refused(NOT_ELIGIBLE_REASON)
        }
    }
}

impl Default for ExpeditedPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
