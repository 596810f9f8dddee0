use crate::dtos::EventDTO;
use huddle_domain::{EventWithParticipants, ParticipantRole, ID};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct InvitationQueryParams {
    pub token: Option<String>,
}

pub mod get_invited_event {
    use super::*;

    pub type QueryParams = InvitationQueryParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: EventDTO,
        pub participant_id: ID,
        pub role: ParticipantRole,
    }

    impl APIResponse {
        pub fn new(event: EventWithParticipants, participant_id: ID, role: ParticipantRole) -> Self {
            Self {
                event: EventDTO::new(event),
                participant_id,
                role,
            }
        }
    }
}

pub mod update_invited_event {
    use super::*;

    pub type QueryParams = InvitationQueryParams;
    pub use crate::update_event::RequestBody;
    pub type APIResponse = crate::EventUpdatedResponse;
}
