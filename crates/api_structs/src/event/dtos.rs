use chrono::{DateTime, Utc};
use huddle_domain::{
    EventType, EventWithParticipants, NewParticipant, ParticipantRole, ParticipantWithRole, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventParticipantDTO {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub role: ParticipantRole,
}

impl EventParticipantDTO {
    pub fn new(p: ParticipantWithRole) -> Self {
        Self {
            id: p.participant.id,
            name: p.participant.name,
            email: p.participant.email,
            role: p.role,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDTO {
    pub id: ID,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub participants: Vec<EventParticipantDTO>,
}

impl EventDTO {
    pub fn new(e: EventWithParticipants) -> Self {
        Self {
            id: e.event.id,
            title: e.event.title,
            start_time: e.event.start_time,
            end_time: e.event.end_time,
            event_type: e.event.event_type,
            created: e.event.created,
            updated: e.event.updated,
            participants: e
                .participants
                .into_iter()
                .map(EventParticipantDTO::new)
                .collect(),
        }
    }
}

/// Participant as given by a client. Unknown emails are provisioned.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInputDTO {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Option<ParticipantRole>,
}

impl From<ParticipantInputDTO> for NewParticipant {
    fn from(p: ParticipantInputDTO) -> Self {
        Self {
            name: p.name,
            email: p.email,
            role: p.role,
        }
    }
}

pub const CONFLICT_WARNING_MESSAGE: &str = "Some participants have scheduling conflicts";

/// Scheduling conflicts reported next to a successful write
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictWarningDTO {
    pub message: String,
    pub conflicts: Vec<EventDTO>,
}

impl ConflictWarningDTO {
    /// `None` when there is nothing to warn about
    pub fn from_conflicts(conflicts: Vec<EventWithParticipants>) -> Option<Self> {
        if conflicts.is_empty() {
            return None;
        }
        Some(Self {
            message: CONFLICT_WARNING_MESSAGE.into(),
            conflicts: conflicts.into_iter().map(EventDTO::new).collect(),
        })
    }
}
