use crate::dtos::{ConflictWarningDTO, EventDTO, ParticipantInputDTO};
use chrono::{DateTime, Utc};
use huddle_domain::{EventType, EventWithParticipants, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event: EventDTO,
}

impl EventResponse {
    pub fn new(event: EventWithParticipants) -> Self {
        Self {
            event: EventDTO::new(event),
        }
    }
}

/// Result of a write that may have caused scheduling conflicts
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdatedResponse {
    pub is_updated: bool,
    pub warnings: Option<ConflictWarningDTO>,
}

pub mod create_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub start_time: DateTime<Utc>,
        pub end_time: DateTime<Utc>,
        #[serde(default, rename = "type")]
        pub event_type: Option<EventType>,
        #[serde(default)]
        pub participants: Vec<ParticipantInputDTO>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: EventDTO,
        pub warnings: Option<ConflictWarningDTO>,
    }

    impl APIResponse {
        pub fn new(event: EventWithParticipants, conflicts: Vec<EventWithParticipants>) -> Self {
            Self {
                event: EventDTO::new(event),
                warnings: ConflictWarningDTO::from_conflicts(conflicts),
            }
        }
    }
}

pub mod get_events {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub limit: Option<usize>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<EventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<EventWithParticipants>) -> Self {
            Self {
                events: events.into_iter().map(EventDTO::new).collect(),
            }
        }
    }
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}

pub mod update_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub start_time: Option<DateTime<Utc>>,
        #[serde(default)]
        pub end_time: Option<DateTime<Utc>>,
        #[serde(default, rename = "type")]
        pub event_type: Option<EventType>,
        #[serde(default)]
        pub participants: Option<Vec<ParticipantInputDTO>>,
    }

    pub type APIResponse = EventUpdatedResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }
}

pub mod check_conflicts {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub start_time: DateTime<Utc>,
        pub end_time: DateTime<Utc>,
        #[serde(default)]
        pub emails: Vec<String>,
        /// External identity references of the participants
        #[serde(default)]
        pub user_ids: Vec<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub conflicted_events: Vec<EventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<EventWithParticipants>) -> Self {
            Self {
                conflicted_events: events.into_iter().map(EventDTO::new).collect(),
            }
        }
    }
}

pub mod search_events {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Default)]
    pub struct QueryParams {
        pub query: Option<String>,
    }

    pub type APIResponse = Vec<EventDTO>;
}
