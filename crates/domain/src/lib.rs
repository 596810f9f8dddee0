mod conflict;
mod event;
mod invitation;
mod participant;
mod shared;
mod timespan;

pub use conflict::find_conflicts;
pub use event::{
    Event, EventType, EventUpdate, EventValidationError, EventWithParticipants,
    InvalidEventTypeError,
};
pub use invitation::{
    issue_invitation_token, verify_invitation_token, InvitationClaims, InvitationError,
    INVITATION_TTL_DAYS,
};
pub use participant::{
    EventParticipant, InvalidRoleError, NewParticipant, Participant, ParticipantRole,
    ParticipantWithRole,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use timespan::{InvalidTimeSpanError, TimeSpan};
