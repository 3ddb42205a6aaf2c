mod overage;
mod schedule;

pub use overage::{OverageQuote, SurchargedFee};
pub use schedule::{CategoryFees, FeeSchedule, FeeScheduleError, OverageRate};

use serde::Serialize;

use super::domain::{
    ApplicantCategory, ApplicationType, ExaminationPreference, PublicationPreference, SheetCounts,
};

/// Everything the calculator needs; nothing else from the request leaks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeInputs {
    pub application_type: ApplicationType,
    pub publication: PublicationPreference,
    pub examination: ExaminationPreference,
    pub category: ApplicantCategory,
    pub sheet_counts: SheetCounts,
    pub claim_count: u32,
}

/// Per-component statutory fees. The total is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    filing_fee: u64,
    publication_fee: u64,
    examination_fee: u64,
    excess_sheet_fee: u64,
    excess_claim_fee: u64,
    total_fee: u64,
}

impl FeeBreakdown {
    pub fn new(
        filing_fee: u64,
        publication_fee: u64,
        examination_fee: u64,
        excess_sheet_fee: u64,
        excess_claim_fee: u64,
    ) -> Self {
        Self {
            filing_fee,
            publication_fee,
            examination_fee,
            excess_sheet_fee,
            excess_claim_fee,
            total_fee: filing_fee
                .saturating_add(publication_fee)
                .saturating_add(examination_fee)
                .saturating_add(excess_sheet_fee)
                .saturating_add(excess_claim_fee),
        }
    }

    pub fn filing_fee(&self) -> u64 {
        self.filing_fee
    }

    pub fn publication_fee(&self) -> u64 {
        self.publication_fee
    }

    pub fn examination_fee(&self) -> u64 {
        self.examination_fee
    }

    pub fn excess_sheet_fee(&self) -> u64 {
        self.excess_sheet_fee
    }

    pub fn excess_claim_fee(&self) -> u64 {
        self.excess_claim_fee
    }

    pub fn total_fee(&self) -> u64 {
        self.total_fee
    }
}

/// Applies a [`FeeSchedule`] to a single filing.
pub struct FeeCalculator<'a> {
    schedule: &'a FeeSchedule,
}

impl<'a> FeeCalculator<'a> {
    pub fn new(schedule: &'a FeeSchedule) -> Self {
        Self { schedule }
    }

    pub fn calculate(&self, inputs: &FeeInputs) -> FeeBreakdown {
        let fees = self.schedule.fees_for(inputs.category);

        // Expedited and ordinary examination currently share one fee per category.
        let (publication_fee, examination_fee) = match inputs.application_type {
            ApplicationType::Provisional => (0, 0),
            ApplicationType::Complete => {
                let publication = match inputs.publication {
                    PublicationPreference::Early => fees.publication_fee,
                    PublicationPreference::Ordinary => 0,
                };
                (publication, fees.examination_fee)
            }
        };

        FeeBreakdown::new(
            fees.filing_fee,
            publication_fee,
            examination_fee,
            self.schedule.sheets.charge(inputs.sheet_counts.total()),
            self.schedule.claims.charge(u64::from(inputs.claim_count)),
        )
    }

    /// Standalone excess-sheet/claim quote with the offline surcharge applied.
    pub fn overage_quote(&self, sheet_counts: &SheetCounts, claim_count: u32) -> OverageQuote {
        let percent = self.schedule.offline_surcharge_percent;
        OverageQuote {
            excess_sheet_fee: SurchargedFee::new(
                self.schedule.sheets.charge(sheet_counts.total()),
                percent,
            ),
            excess_claim_fee: SurchargedFee::new(
                self.schedule.claims.charge(u64::from(claim_count)),
                percent,
            ),
        }
    }
}
