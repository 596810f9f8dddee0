//! Resolves participants given by email, provisioning an identity for the
//! ones that are seen for the first time.

use crate::error::HuddleError;
use huddle_domain::{NewParticipant, Participant, ParticipantWithRole};
use huddle_infra::HuddleContext;
use tracing::{error, info};

#[derive(Debug, PartialEq)]
pub enum ParticipantDirectoryError {
    InvalidEmail(String),
    Provisioning(String),
    StorageError,
}

impl From<ParticipantDirectoryError> for HuddleError {
    fn from(e: ParticipantDirectoryError) -> Self {
        match e {
            ParticipantDirectoryError::InvalidEmail(email) => Self::BadClientData(format!(
                "The participant email: {}, is not valid.",
                email
            )),
            ParticipantDirectoryError::Provisioning(email) => Self::IdentityProvisioning(format!(
                "Unable to create an identity for the participant with email: {}",
                email
            )),
            ParticipantDirectoryError::StorageError => Self::InternalError,
        }
    }
}

/// Returns the participant with the given email, creating it when it does
/// not exist. The name of an existing participant is left untouched.
pub async fn resolve_or_create(
    input: &NewParticipant,
    ctx: &HuddleContext,
) -> Result<Participant, ParticipantDirectoryError> {
    if !input.has_valid_email() {
        return Err(ParticipantDirectoryError::InvalidEmail(input.email.clone()));
    }

    if let Some(participant) = find_by_email(&input.email, ctx).await? {
        return Ok(participant);
    }

    let name = input.display_name();
    let identity = ctx
        .identity_provider
        .create_user(&input.email, &name)
        .await
        .map_err(|e| {
            error!(
                "Unable to provision participant {}. Error: {:?}",
                input.email, e
            );
            ParticipantDirectoryError::Provisioning(input.email.clone())
        })?;

    let participant = Participant::new(name, input.email.clone(), identity.user_id, ctx.sys.now());
    if let Err(e) = ctx.repos.participants.insert(&participant).await {
        // Someone else might have created the same participant in the meantime
        return match find_by_email(&input.email, ctx).await? {
            Some(participant) => Ok(participant),
            None => {
                error!("Unable to store participant {}. Error: {:?}", input.email, e);
                Err(ParticipantDirectoryError::StorageError)
            }
        };
    }
    info!("Created participant {}", participant.id);

    Ok(participant)
}

/// Resolves every input in order and pairs it with its role.
///
/// Repeated emails are collapsed, the first occurrence decides the role.
/// All emails are checked before anything is provisioned.
pub async fn resolve_or_create_many(
    inputs: &[NewParticipant],
    ctx: &HuddleContext,
) -> Result<Vec<ParticipantWithRole>, ParticipantDirectoryError> {
    if let Some(invalid) = inputs.iter().find(|p| !p.has_valid_email()) {
        return Err(ParticipantDirectoryError::InvalidEmail(invalid.email.clone()));
    }

    let mut resolved: Vec<ParticipantWithRole> = Vec::with_capacity(inputs.len());
    for input in inputs {
        if resolved.iter().any(|p| p.participant.email == input.email) {
            continue;
        }
        let participant = resolve_or_create(input, ctx).await?;
        resolved.push(ParticipantWithRole {
            participant,
            role: input.role(),
        });
    }

    Ok(resolved)
}

pub async fn find_by_email(
    email: &str,
    ctx: &HuddleContext,
) -> Result<Option<Participant>, ParticipantDirectoryError> {
    ctx.repos
        .participants
        .find_by_email(email)
        .await
        .map_err(|_| ParticipantDirectoryError::StorageError)
}

/// Looks up participants without provisioning, unknown emails are skipped
pub async fn find_by_emails(
    emails: &[String],
    ctx: &HuddleContext,
) -> Result<Vec<Participant>, ParticipantDirectoryError> {
    ctx.repos
        .participants
        .find_by_emails(emails)
        .await
        .map_err(|_| ParticipantDirectoryError::StorageError)
}

#[cfg(test)]
pub mod test {
    use super::*;
    use huddle_domain::ParticipantRole;
    use huddle_infra::{ExternalIdentity, IIdentityProvider};
    use std::sync::Arc;

    pub struct FailingIdentityProvider;

    #[async_trait::async_trait]
    impl IIdentityProvider for FailingIdentityProvider {
        async fn create_user(&self, _email: &str, _name: &str) -> anyhow::Result<ExternalIdentity> {
            Err(anyhow::Error::msg("Identity provider is down"))
        }
    }

    fn input(email: &str, role: Option<ParticipantRole>) -> NewParticipant {
        NewParticipant {
            name: None,
            email: email.into(),
            role,
        }
    }

    #[actix_web::main]
    #[test]
    async fn resolves_same_participant_twice() {
        let ctx = HuddleContext::create_inmemory();
        let john = input("john@example.com", None);

        let first = resolve_or_create(&john, &ctx).await.unwrap();
        let second = resolve_or_create(&john, &ctx).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.name, "john");
        assert_eq!(first.external_id, second.external_id);
    }

    #[actix_web::main]
    #[test]
    async fn existing_participant_keeps_its_name() {
        let ctx = HuddleContext::create_inmemory();
        let mut john = input("john@example.com", None);
        john.name = Some("John".into());
        resolve_or_create(&john, &ctx).await.unwrap();

        john.name = Some("Johnny".into());
        let p = resolve_or_create(&john, &ctx).await.unwrap();
        assert_eq!(p.name, "John");
    }

    #[actix_web::main]
    #[test]
    async fn provisioning_failure_creates_nothing() {
        let mut ctx = HuddleContext::create_inmemory();
        ctx.identity_provider = Arc::new(FailingIdentityProvider);

        let res = resolve_or_create(&input("new@example.com", None), &ctx).await;
        assert_eq!(
            res,
            Err(ParticipantDirectoryError::Provisioning("new@example.com".into()))
        );
        assert!(find_by_email("new@example.com", &ctx).await.unwrap().is_none());
    }

    #[actix_web::main]
    #[test]
    async fn collapses_repeated_emails() {
        let ctx = HuddleContext::create_inmemory();
        let inputs = vec![
            input("john@example.com", Some(ParticipantRole::Editor)),
            input("jane@example.com", None),
            input("john@example.com", Some(ParticipantRole::Organizer)),
        ];
        let resolved = resolve_or_create_many(&inputs, &ctx).await.unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].participant.email, "john@example.com");
        assert_eq!(resolved[0].role, ParticipantRole::Editor);
        assert_eq!(resolved[1].role, ParticipantRole::Viewer);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_email_before_provisioning() {
        let ctx = HuddleContext::create_inmemory();
        let inputs = vec![input("john@example.com", None), input("not-an-email", None)];
        let res = resolve_or_create_many(&inputs, &ctx).await;
        assert_eq!(
            res,
            Err(ParticipantDirectoryError::InvalidEmail("not-an-email".into()))
        );
        assert!(find_by_email("john@example.com", &ctx).await.unwrap().is_none());
    }
}
