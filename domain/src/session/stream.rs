//! Streaming events for incremental completions.

/// An event in a streaming completion.
///
/// The infrastructure adapter emits one [`StreamEvent::Delta`] per content
/// fragment and a single [`StreamEvent::Completed`] once the provider signals
/// the end of the stream. Faults travel alongside as errors, not as events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text fragment from the model.
    Delta(String),
    /// The provider's termination signal.
    Completed,
}

impl StreamEvent {
    /// Returns the fragment text if this is a Delta event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) => Some(s),
            StreamEvent::Completed => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed)
    }
}
