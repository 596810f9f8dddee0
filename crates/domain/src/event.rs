use crate::{
    participant::{ParticipantRole, ParticipantWithRole},
    shared::entity::{Entity, ID},
    timespan::{InvalidTimeSpanError, TimeSpan},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EventType {
    #[default]
    Personal,
    Team,
    Project,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Team => "Team",
            Self::Project => "Project",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Event type: {0} is not valid")]
pub struct InvalidEventTypeError(String);

impl FromStr for EventType {
    type Err = InvalidEventTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Personal" => Ok(Self::Personal),
            "Team" => Ok(Self::Team),
            "Project" => Ok(Self::Project),
            _ => Err(InvalidEventTypeError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum EventValidationError {
    #[error("The event title can not be empty")]
    EmptyTitle,
    #[error(transparent)]
    InvalidTimeSpan(#[from] InvalidTimeSpanError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: ID,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub event_type: EventType,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Fields of an `Event` a client is allowed to change. `None` leaves
/// the current value untouched.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub event_type: Option<EventType>,
}

impl Event {
    pub fn new(
        title: String,
        timespan: TimeSpan,
        event_type: EventType,
        now: DateTime<Utc>,
    ) -> Result<Self, EventValidationError> {
        if title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        Ok(Self {
            id: Default::default(),
            title,
            start_time: timespan.start(),
            end_time: timespan.end(),
            event_type,
            created: now,
            updated: now,
        })
    }

    pub fn timespan(&self) -> TimeSpan {
        TimeSpan::new_unchecked(self.start_time, self.end_time)
    }

    /// Applies only the fields that differ from the current values.
    ///
    /// Returns `Ok(false)` when nothing changed, in which case the event
    /// is left as it was. The resulting event is validated before anything
    /// is written to `self`.
    pub fn apply_update(&mut self, update: &EventUpdate) -> Result<bool, EventValidationError> {
        let mut next = self.clone();
        let mut changed = false;

        if let Some(title) = &update.title {
            if *title != next.title {
                next.title = title.clone();
                changed = true;
            }
        }
        if let Some(start_time) = update.start_time {
            if start_time != next.start_time {
                next.start_time = start_time;
                changed = true;
            }
        }
        if let Some(end_time) = update.end_time {
            if end_time != next.end_time {
                next.end_time = end_time;
                changed = true;
            }
        }
        if let Some(event_type) = update.event_type {
            if event_type != next.event_type {
                next.event_type = event_type;
                changed = true;
            }
        }

        if !changed {
            return Ok(false);
        }
        if next.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        TimeSpan::new(next.start_time, next.end_time)?;

        *self = next;
        Ok(true)
    }
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// An `Event` together with its participants and their roles in it
#[derive(Debug, Clone, PartialEq)]
pub struct EventWithParticipants {
    pub event: Event,
    pub participants: Vec<ParticipantWithRole>,
}

impl EventWithParticipants {
    pub fn shares_participant_with(&self, external_ids: &[String]) -> bool {
        self.participants
            .iter()
            .any(|p| external_ids.contains(&p.participant.external_id))
    }

    /// `(email, role)` pairs, sorted so two sets can be compared
    pub fn participant_roles(&self) -> Vec<(String, ParticipantRole)> {
        let mut roles = self
            .participants
            .iter()
            .map(|p| (p.participant.email.clone(), p.role))
            .collect::<Vec<_>>();
        roles.sort();
        roles
    }

    /// Case insensitive substring match on the title, the type and
    /// the name or email of any participant
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        if self.event.title.to_lowercase().contains(&query)
            || self.event.event_type.as_str().to_lowercase().contains(&query)
        {
            return true;
        }
        self.participants.iter().any(|p| {
            p.participant.name.to_lowercase().contains(&query)
                || p.participant.email.to_lowercase().contains(&query)
        })
    }
}

impl Entity for EventWithParticipants {
    fn id(&self) -> &ID {
        &self.event.id
    }
}
