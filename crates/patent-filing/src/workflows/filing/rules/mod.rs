mod category;
mod eligibility;

pub use category::CategoryPriority;
pub use eligibility::{
    ExpeditedEligibility, ExpeditedPolicy, NOT_ELIGIBLE_REASON, NO_APPLICANTS_REASON,
};

use serde::Serialize;

use super::domain::{ApplicantCategory, FilingRequest};
use super::fees::{FeeBreakdown, FeeCalculator, FeeInputs, FeeSchedule};

/// Read-only tables the rule engine consults: fee schedule, category
/// priority and the expedited-eligible category set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingRules {
    pub schedule: FeeSchedule,
    pub priority: CategoryPriority,
    pub expedited: ExpeditedPolicy,
}

impl FilingRules {
    pub fn new(schedule: FeeSchedule, priority: CategoryPriority, expedited: ExpeditedPolicy) -> Self {
        Self {
            schedule,
            priority,
            expedited,
        }
    }

    pub fn standard() -> Self {
        Self::default()
    }

    pub fn with_schedule(schedule: FeeSchedule) -> Self {
        Self {
            schedule,
            ..Self::default()
        }
    }

    pub fn calculator(&self) -> FeeCalculator<'_> {
        FeeCalculator::new(&self.schedule)
    }

    /// Resolve category and eligibility, then price the filing.
    pub fn assess(&self, request: &FilingRequest) -> Assessment {
        let category = self.priority.resolve(&request.applicants);
        let eligibility = self.expedited.evaluate(&request.applicants);
        let fees = self.calculator().calculate(&FeeInputs {
            application_type: request.application_type,
            publication: request.publication,
            examination: request.examination,
            category,
            sheet_counts: request.sheet_counts,
            claim_count: request.claim_count,
        });

        Assessment {
            main_applicant_category: category,
            eligibility,
            fees,
        }
    }
}

/// Derived values for one request, ahead of context assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub main_applicant_category: ApplicantCategory,
    pub eligibility: ExpeditedEligibility,
    pub fees: FeeBreakdown,
}
