//! Per-agent usage ledger

use super::cost::{CostBreakdown, CostRates};
use super::record::UsageRecord;
use serde::{Deserialize, Serialize};

/// Insertion-ordered list of usage records for one agent.
///
/// Pure append: no deduplication and no reordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageLedger {
    records: Vec<UsageRecord>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, usage: UsageRecord) {
        self.records.push(usage);
    }

    /// Field-wise sum of every record; all zeros for an empty ledger.
    pub fn totals(&self) -> UsageRecord {
        self.records.iter().sum()
    }

    /// Cost of [`totals`](Self::totals) at the given rates.
    pub fn cost(&self, rates: &CostRates) -> CostBreakdown {
        rates.cost_of(&self.totals())
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
