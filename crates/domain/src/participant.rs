use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A human taking part in one or more `Event`s.
///
/// Participants are shared between events and identified by their email,
/// which is unique across the whole system. The `external_id` is the
/// reference handed out by the identity provider when the participant
/// was first seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub external_id: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Participant {
    pub fn new(name: String, email: String, external_id: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Default::default(),
            name,
            email,
            external_id,
            created: now,
            updated: now,
        }
    }
}

impl Entity for Participant {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// The role a `Participant` has in a single `Event`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    #[default]
    Viewer,
    Editor,
    Organizer,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Organizer => "organizer",
        }
    }
}

impl Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Participant role: {0} is not valid")]
pub struct InvalidRoleError(String);

impl FromStr for ParticipantRole {
    type Err = InvalidRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            "organizer" => Ok(Self::Organizer),
            _ => Err(InvalidRoleError(s.to_string())),
        }
    }
}

/// Join between an `Event` and a `Participant`, the only place a role lives
#[derive(Debug, Clone, PartialEq)]
pub struct EventParticipant {
    pub event_id: ID,
    pub participant_id: ID,
    pub role: ParticipantRole,
}

/// A `Participant` as seen from one `Event`
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantWithRole {
    pub participant: Participant,
    pub role: ParticipantRole,
}

/// Reference to a participant given by a client, resolved by email
#[derive(Debug, Clone, PartialEq)]
pub struct NewParticipant {
    pub name: Option<String>,
    pub email: String,
    pub role: Option<ParticipantRole>,
}

impl NewParticipant {
    /// Name handed to the identity provider, falls back to the local part of the email
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => self
                .email
                .split('@')
                .next()
                .unwrap_or(&self.email)
                .to_string(),
        }
    }

    pub fn role(&self) -> ParticipantRole {
        self.role.unwrap_or_default()
    }

    /// Very small sanity check, the identity provider does the real validation
    pub fn has_valid_email(&self) -> bool {
        match self.email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !self.email.contains(char::is_whitespace)
            }
            None => false,
        }
    }
}
