//! Usage record value object

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Token usage of a single completion call (Value Object)
///
/// `total_tokens == prompt_tokens + completion_tokens` holds for every
/// record built through [`UsageRecord::new`]; records reported by a provider
/// go through [`UsageRecord::checked`] so a mismatch is caught at the edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageRecord {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl UsageRecord {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Build a record from provider-reported counts, rejecting an
    /// inconsistent total.
    pub fn checked(prompt_tokens: u64, completion_tokens: u64, total_tokens: u64) -> Option<Self> {
        (prompt_tokens + completion_tokens == total_tokens).then_some(Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.total_tokens == 0
    }
}

impl Add for UsageRecord {
    type Output = UsageRecord;

    fn add(self, rhs: UsageRecord) -> UsageRecord {
        UsageRecord {
            prompt_tokens: self.prompt_tokens + rhs.prompt_tokens,
            completion_tokens: self.completion_tokens + rhs.completion_tokens,
            total_tokens: self.total_tokens + rhs.total_tokens,
        }
    }
}

impl AddAssign for UsageRecord {
    fn add_assign(&mut self, rhs: UsageRecord) {
        *self = *self + rhs;
    }
}

impl Sum for UsageRecord {
    fn sum<I: Iterator<Item = UsageRecord>>(iter: I) -> Self {
        iter.fold(UsageRecord::default(), Add::add)
    }
}

impl<'a> Sum<&'a UsageRecord> for UsageRecord {
    fn sum<I: Iterator<Item = &'a UsageRecord>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
