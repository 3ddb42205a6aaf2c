use serde::{Deserialize, Serialize};

/// Fee quoted for online filing and for paper filing with the surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargedFee {
    pub online: u64,
    pub offline: u64,
}

impl SurchargedFee {
    /// Offline amount is `online * (100 + percent) / 100`, rounded down and
    /// saturating at `u64::MAX`.
    pub fn new(online: u64, surcharge_percent: u64) -> Self {
        let factor = u128::from(surcharge_percent) + 100;
        let offline = u128::from(online).saturating_mul(factor) / 100;
        Self {
            online,
            offline: u64::try_from(offline).unwrap_or(u64::MAX),
        }
    }
}

/// Excess-sheet and excess-claim quote served to the fee estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverageQuote {
    pub excess_sheet_fee: SurchargedFee,
    pub excess_claim_fee: SurchargedFee,
}
