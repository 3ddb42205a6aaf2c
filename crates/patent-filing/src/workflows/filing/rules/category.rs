use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicantCategory, PersonRecord};

/// Ranking used to pick the category that sets the fee schedule for the
/// whole application. Higher ranks win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPriority {
    ranks: BTreeMap<ApplicantCategory, u8>,
}

impl CategoryPriority {
    pub fn new(ranks: BTreeMap<ApplicantCategory, u8>) -> Self {
        Self { ranks }
    }

    pub fn standard() -> Self {
        Self::new(BTreeMap::from([
            (ApplicantCategory::Others, 5),
            (ApplicantCategory::EducationalInstitution, 4),
            (ApplicantCategory::StartUp, 3),
            (ApplicantCategory::SmallEntity, 2),
            (ApplicantCategory::NaturalPerson, 1),
        ]))
    }

    pub fn rank(&self, category: ApplicantCategory) -> u8 {
        self.ranks.get(&category).copied().unwrap_or(0)
    }

    /// Highest-ranked category among `applicants`, first seen on ties.
    /// Records without a category or with an unranked one are skipped; an
    /// empty result falls back to `Others`.
    pub fn resolve(&self, applicants: &[PersonRecord]) -> ApplicantCategory {
        let mut best: Option<(u8, ApplicantCategory)> = None;

        for category in applicants.iter().filter_map(|applicant| applicant.category) {
            let rank = self.rank(category);
            if rank == 0 {
                continue;
            }
            if best.map_or(true, |(best_rank, _)| rank > best_rank) {
                best = Some((rank, category));
            }
        }

        best.map(|(_, category)| category)
            .unwrap_or(ApplicantCategory::Others)
    }
}

impl Default for CategoryPriority {
    fn default() -> Self {
        Self::standard()
    }
}
