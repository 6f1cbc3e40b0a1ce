//! Pricing configuration from TOML (`[pricing]` section)

use super::ConfigValidationError;
use debate_application::RolePricing;
use debate_domain::{AgentRole, CostRates};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prices in currency units per 1000 tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileRates {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl FileRates {
    fn validate(&self, scope: &str) -> Result<(), ConfigValidationError> {
        for (name, value) in [
            ("input_per_1k", self.input_per_1k),
            ("output_per_1k", self.output_per_1k),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigValidationError::NegativeRate {
                    field: format!("{}.{}", scope, name),
                });
            }
        }
        Ok(())
    }

    fn to_rates(self) -> CostRates {
        CostRates::per_thousand(self.input_per_1k, self.output_per_1k)
    }
}

/// Raw pricing configuration from TOML
///
/// # Example
///
/// ```toml
/// [pricing]
/// input_per_1k = 0.01
/// output_per_1k = 0.028
///
/// [pricing.roles.master]
/// input_per_1k = 0.03
/// output_per_1k = 0.06
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePricingConfig {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
    /// Per-role overrides keyed by `master`, `moderator`, `debater_1`, `debater_2`
    pub roles: BTreeMap<String, FileRates>,
}

impl Default for FilePricingConfig {
    fn default() -> Self {
        Self {
            input_per_1k: 0.01,
            output_per_1k: 0.028,
            roles: BTreeMap::new(),
        }
    }
}

impl FilePricingConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigValidationError> {
        self.default_rates().validate("pricing")?;
        for (role, rates) in &self.roles {
            parse_role(role)?;
            rates.validate(&format!("pricing.roles.{}", role))?;
        }
        Ok(())
    }

    fn default_rates(&self) -> FileRates {
        FileRates {
            input_per_1k: self.input_per_1k,
            output_per_1k: self.output_per_1k,
        }
    }

    pub fn to_role_pricing(&self) -> Result<RolePricing, ConfigValidationError> {
        let mut pricing = RolePricing::uniform(self.default_rates().to_rates());
        for (role, rates) in &self.roles {
            pricing = pricing.with_override(parse_role(role)?, rates.to_rates());
        }
        Ok(pricing)
    }
}

fn parse_role(name: &str) -> Result<AgentRole, ConfigValidationError> {
    AgentRole::ALL
        .into_iter()
        .find(|role| role.as_str() == name)
        .ok_or_else(|| ConfigValidationError::UnknownRole(name.to_string()))
}
