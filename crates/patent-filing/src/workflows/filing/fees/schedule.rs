use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::domain::ApplicantCategory;

/// Statutory fee triple for one applicant category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFees {
    pub filing_fee: u64,
    pub publication_fee: u64,
    pub examination_fee: u64,
}

/// Free allowance and per-unit surcharge beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverageRate {
    pub allowance: u64,
    pub per_unit: u64,
}

impl OverageRate {
    pub fn charge(&self, count: u64) -> u64 {
        count
            .saturating_sub(self.allowance)
            .saturating_mul(self.per_unit)
    }
}

/// Fee tables applied to every request. Built once and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    categories: BTreeMap<ApplicantCategory, CategoryFees>,
    pub sheets: OverageRate,
    pub claims: OverageRate,
    pub offline_surcharge_percent: u64,
}

const STANDARD_SHEETS: OverageRate = OverageRate {
    allowance: 30,
    per_unit: 160,
};
const STANDARD_CLAIMS: OverageRate = OverageRate {
    allowance: 10,
    per_unit: 800,
};
const STANDARD_OFFLINE_SURCHARGE_PERCENT: u64 = 10;

impl FeeSchedule {
    pub fn standard() -> Self {
        let fees = |filing_fee, publication_fee, examination_fee| CategoryFees {
            filing_fee,
            publication_fee,
            examination_fee,
        };

        Self {
            categories: BTreeMap::from([
                (ApplicantCategory::NaturalPerson, fees(1600, 2500, 4000)),
                (ApplicantCategory::SmallEntity, fees(4000, 6250, 10000)),
                (ApplicantCategory::StartUp, fees(1600, 2500, 4000)),
                (
                    ApplicantCategory::EducationalInstitution,
                    fees(8000, 10000, 20000),
                ),
                (ApplicantCategory::Others, fees(8000, 12500, 20000)),
            ]),
            sheets: STANDARD_SHEETS,
            claims: STANDARD_CLAIMS,
            offline_surcharge_percent: STANDARD_OFFLINE_SURCHARGE_PERCENT,
        }
    }

    /// Build a schedule from explicit category rows; every category must be
    /// present so lookups never miss.
    pub fn from_categories(
        categories: BTreeMap<ApplicantCategory, CategoryFees>,
    ) -> Result<Self, FeeScheduleError> {
        if let Some(missing) = ApplicantCategory::ALL
            .into_iter()
            .find(|category| !categories.contains_key(category))
        {
            return Err(FeeScheduleError::MissingCategory(missing));
        }

        Ok(Self {
            categories,
            ..Self::standard()
        })
    }

    pub fn with_offline_surcharge(mut self, percent: u64) -> Self {
        self.offline_surcharge_percent = percent;
        self
    }

    /// Fees for `category`, falling back to the `Others` row.
    pub fn fees_for(&self, category: ApplicantCategory) -> CategoryFees {
        self.categories
            .get(&category)
            .or_else(|| self.categories.get(&ApplicantCategory::Others))
            .copied()
            .unwrap_or(CategoryFees {
                filing_fee: 0,
                publication_fee: 0,
                examination_fee: 0,
            })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FeeScheduleError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Parse a CSV export with header
    /// `category,filing_fee,publication_fee,examination_fee`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FeeScheduleError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut categories = BTreeMap::new();

        for row in csv_reader.deserialize::<FeeRow>() {
            let row = row?;
            let category = ApplicantCategory::from_label(&row.category)
                .ok_or_else(|| FeeScheduleError::UnknownCategory(row.category.clone()))?;
            if categories
                .insert(
                    category,
                    CategoryFees {
                        filing_fee: row.filing_fee,
                        publication_fee: row.publication_fee,
                        examination_fee: row.examination_fee,
                    },
                )
                .is_some()
            {
                return Err(FeeScheduleError::DuplicateCategory(category));
            }
        }

        Self::from_categories(categories)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Deserialize)]
struct FeeRow {
    category: String,
    filing_fee: u64,
    publication_fee: u64,
    examination_fee: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum FeeScheduleError {
    #[error("failed to read fee schedule: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse fee schedule: {0}")]
    Csv(#[from] csv::Error),
    #[error("fee schedule lists unknown category '{0}'")]
    UnknownCategory(String),
    #[error("fee schedule lists category '{0}' more than once")]
    DuplicateCategory(ApplicantCategory),
    #[error("fee schedule is missing category '{0}'")]
    MissingCategory(ApplicantCategory),
}
