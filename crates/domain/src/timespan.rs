use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A range of time between two UTC instants.
///
/// Every `TimeSpan` satisfies `start < end`. Equal instants are rejected,
/// this is the only ordering policy used for events and conflict queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Error, Debug, PartialEq)]
#[error("Provided timespan start: {0} and end: {1} is invalid. The end must be after the start.")]
pub struct InvalidTimeSpanError(pub DateTime<Utc>, pub DateTime<Utc>);

impl TimeSpan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidTimeSpanError> {
        if end <= start {
            return Err(InvalidTimeSpanError(start, end));
        }
        Ok(Self { start, end })
    }

    /// Used for spans that were validated before they were persisted
    pub(crate) fn new_unchecked(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Two spans overlap when `a.start <= b.end && a.end >= b.start`.
    ///
    /// Touching boundaries count as an overlap, so a meeting ending at 12:00
    /// collides with one starting at 12:00.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}
