//! Cost rates and cost breakdowns

use super::record::UsageRecord;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

/// Default price of one prompt token (0.01 per 1K tokens).
pub const DEFAULT_INPUT_RATE: f64 = 0.01 / 1000.0;

/// Default price of one completion token (0.028 per 1K tokens).
pub const DEFAULT_OUTPUT_RATE: f64 = 0.028 / 1000.0;

/// Per-token prices for one agent.
///
/// Rates belong to the agent, not the process, so agents served by
/// differently priced deployments can share one session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    pub input_per_token: f64,
    pub output_per_token: f64,
}

impl CostRates {
    pub fn new(input_per_token: f64, output_per_token: f64) -> Self {
        Self {
            input_per_token,
            output_per_token,
        }
    }

    /// Build rates from prices quoted per thousand tokens.
    pub fn per_thousand(input: f64, output: f64) -> Self {
        Self::new(input / 1000.0, output / 1000.0)
    }

    pub fn cost_of(&self, usage: &UsageRecord) -> CostBreakdown {
        let input_cost = usage.prompt_tokens as f64 * self.input_per_token;
        let output_cost = usage.completion_tokens as f64 * self.output_per_token;
        CostBreakdown {
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
        }
    }
}

impl Default for CostRates {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_RATE, DEFAULT_OUTPUT_RATE)
    }
}

/// Input, output and total cost derived from token totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

impl Add for CostBreakdown {
    type Output = CostBreakdown;

    fn add(self, rhs: CostBreakdown) -> CostBreakdown {
        CostBreakdown {
            input_cost: self.input_cost + rhs.input_cost,
            output_cost: self.output_cost + rhs.output_cost,
            total_cost: self.total_cost + rhs.total_cost,
        }
    }
}

impl Sum for CostBreakdown {
    fn sum<I: Iterator<Item = CostBreakdown>>(iter: I) -> Self {
        iter.fold(CostBreakdown::default(), Add::add)
    }
}
