//! Application-level configuration.
//!
//! - [`DebateSettings`] - model, submission mode, pricing, limits and deadlines
//! - [`RetryPolicy`] - resubmission of retryable gateway faults

pub mod debate_settings;

pub use debate_settings::{DebateSettings, RetryPolicy, RolePricing, SubmissionMode};
