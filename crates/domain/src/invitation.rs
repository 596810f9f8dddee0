use crate::{participant::ParticipantRole, shared::entity::ID};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long an invitation link stays usable
pub const INVITATION_TTL_DAYS: i64 = 7;

/// Claims carried by an invitation token.
///
/// The role is trusted as-is once the signature checks out. Changing or
/// removing a participant's role does not revoke tokens that were already
/// handed out, they stay valid until they expire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationClaims {
    pub event_id: ID,
    pub participant_id: ID,
    pub role: ParticipantRole,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvitationError {
    #[error("Invalid or expired invitation token")]
    InvalidToken,
    #[error("Unable to sign the invitation token")]
    Signing,
}

pub fn issue_invitation_token(
    event_id: &ID,
    participant_id: &ID,
    role: ParticipantRole,
    secret: &str,
    now: DateTime<Utc>,
) -> Result<String, InvitationError> {
    let claims = InvitationClaims {
        event_id: event_id.clone(),
        participant_id: participant_id.clone(),
        role,
        iat: now.timestamp(),
        exp: (now + Duration::days(INVITATION_TTL_DAYS)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| InvitationError::Signing)
}

/// Bad signatures, malformed tokens and expired tokens all end up as
/// `InvitationError::InvalidToken`.
pub fn verify_invitation_token(
    token: &str,
    secret: &str,
    now: DateTime<Utc>,
) -> Result<InvitationClaims, InvitationError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked against the injected clock below
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<InvitationClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| InvitationError::InvalidToken)?
    .claims;

    if now.timestamp() >= claims.exp {
        return Err(InvitationError::InvalidToken);
    }

    Ok(claims)
}
