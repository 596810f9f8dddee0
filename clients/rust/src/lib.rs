mod base;
mod event;
mod invitation;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use event::EventClient;
pub use event::{CheckConflictsInput, CreateEventInput, UpdateEventInput};
pub use huddle_api_structs::dtos::*;
pub use huddle_domain::{EventType, ParticipantRole, ID};
use invitation::InvitationClient;
use status::StatusClient;
use std::sync::Arc;

/// Huddle SDK
///
/// The SDK contains methods for interacting with the Huddle server API.
#[derive(Clone)]
pub struct HuddleSDK {
    pub event: EventClient,
    pub invitation: InvitationClient,
    pub status: StatusClient,
}

impl HuddleSDK {
    /// `address` is the base url of the api, e.g. `http://localhost:5000/api/v1`
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));

        Self {
            event: EventClient::new(base.clone()),
            invitation: InvitationClient::new(base.clone()),
            status: StatusClient::new(base),
        }
    }
}
