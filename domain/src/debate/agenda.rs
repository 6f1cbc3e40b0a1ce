//! Agenda and talking points

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Delimiter the moderator is asked to separate talking points with.
pub const DEFAULT_AGENDA_DELIMITER: &str = ";";

/// One agenda item (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TalkingPoint(String);

impl TalkingPoint {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TalkingPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered talking points of a debate, fixed once agenda-setting ends.
///
/// Keeps the moderator's raw answer alongside the parsed items: the final
/// synthesis prompt quotes the agenda as the moderator wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    raw: String,
    points: Vec<TalkingPoint>,
}

impl Agenda {
    /// Split the moderator's answer on `delimiter` and trim every item.
    ///
    /// The resulting count is accepted as-is, even when it differs from the
    /// number of talking points that was requested. Items that are empty
    /// after trimming (e.g. from a trailing delimiter) are dropped, so the
    /// agenda can be shorter than a plain split and never holds a blank
    /// talking point.
    pub fn parse(raw: impl Into<String>, delimiter: &str) -> Self {
        let raw = raw.into();
        let points = raw
            .split(delimiter)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(TalkingPoint::new)
            .collect();
        Self { raw, points }
    }

    /// Like [`parse`](Self::parse), logging when the count differs from the
    /// requested size.
    pub fn parse_expecting(raw: impl Into<String>, delimiter: &str, expected: usize) -> Self {
        let agenda = Self::parse(raw, delimiter);
        if agenda.len() != expected {
            warn!(
                requested = expected,
                produced = agenda.len(),
                "Moderator agenda size differs from request; using it as produced"
            );
        }
        agenda
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn points(&self) -> &[TalkingPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &TalkingPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
