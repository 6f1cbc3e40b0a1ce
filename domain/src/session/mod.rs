//! Chat message domain.
//!
//! - [`entities::Message`] - a single chat message with its [`entities::Role`]
//! - [`stream::StreamEvent`] - one event of an incremental completion

pub mod entities;
pub mod stream;
