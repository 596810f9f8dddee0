use huddle_domain::ParticipantRole;

/// A Policy decides which actions the bearer of an invitation can take.
///
/// The `Policy` is derived from the `ParticipantRole` carried by the invitation.
/// Every `UseCase` behind an invitation contains a list of `Permission`s that is
/// required to execute it, if the `Policy` does not allow all of these
/// `Permission`s the request will be rejected.
#[derive(Debug, Default)]
pub struct Policy {
    allow: Vec<Permission>,
}

impl Policy {
    pub fn from_role(role: ParticipantRole) -> Self {
        let allow = match role {
            ParticipantRole::Viewer => vec![Permission::ReadEvent],
            ParticipantRole::Editor => vec![Permission::ReadEvent, Permission::UpdateEvent],
            ParticipantRole::Organizer => vec![
                Permission::ReadEvent,
                Permission::UpdateEvent,
                Permission::DeleteEvent,
            ],
        };
        Self { allow }
    }

    /// Checks if this `Policy` has the right to list of `Permission`s
    pub fn authorize(&self, permissions: &[Permission]) -> bool {
        permissions
            .iter()
            .all(|permission| self.allow.contains(permission))
    }
}

/// `Permission` are different kind of actions that can be performed on an event.
#[derive(Debug, PartialEq)]
pub enum Permission {
    ReadEvent,
    UpdateEvent,
    DeleteEvent,
}
