//! Debate domain.
//!
//! - [`role::AgentRole`] - the four participants and their memory retention
//! - [`agenda::Agenda`] - the talking points fixed after agenda-setting
//! - [`phase::DebatePhaseTracker`] - strictly forward phase sequencing
//! - [`transcript::TopicTranscript`] - round-by-round text of one talking point
//! - [`config::DebateConfig`] - topic, agenda size and rounds per topic
//! - [`value_objects::DebateResult`] - everything a finished debate produced

pub mod agenda;
pub mod config;
pub mod phase;
pub mod role;
pub mod transcript;
pub mod value_objects;
