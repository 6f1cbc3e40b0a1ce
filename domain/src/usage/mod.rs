//! Token usage and cost accounting.
//!
//! - [`record::UsageRecord`] - token counts of one completion call
//! - [`ledger::UsageLedger`] - per-agent list of records with field-wise totals
//! - [`cost::CostRates`] / [`cost::CostBreakdown`] - per-agent pricing

pub mod cost;
pub mod ledger;
pub mod record;
