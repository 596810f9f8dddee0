use super::check_conflicts::detect_conflicts;
use crate::error::HuddleError;
use crate::participant::{resolve_or_create_many, ParticipantDirectoryError};
use crate::shared::{
    auth::Permission,
    usecase::{execute, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use huddle_api_structs::update_event::*;
use huddle_api_structs::{dtos::ConflictWarningDTO, EventUpdatedResponse};
use huddle_domain::{
    EventParticipant, EventType, EventUpdate, EventValidationError, EventWithParticipants,
    NewParticipant, ParticipantRole, ID,
};
use huddle_infra::HuddleContext;

pub async fn update_event_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<HuddleContext>,
) -> Result<HttpResponse, HuddleError> {
    let usecase = UpdateEventUseCase::new(path_params.event_id.clone(), body.0);

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(res.into_api_response()))
        .map_err(HuddleError::from)
}

#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub title: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub event_type: Option<EventType>,
    /// When given, replaces the participants of the event
    pub participants: Option<Vec<NewParticipant>>,
}

impl UpdateEventUseCase {
    pub fn new(event_id: ID, body: RequestBody) -> Self {
        Self {
            event_id,
            title: body.title,
            start_time: body.start_time,
            end_time: body.end_time,
            event_type: body.event_type,
            participants: body
                .participants
                .map(|participants| participants.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub is_updated: bool,
    pub conflicts: Vec<EventWithParticipants>,
}

impl UseCaseResponse {
    pub fn into_api_response(self) -> EventUpdatedResponse {
        EventUpdatedResponse {
            is_updated: self.is_updated,
            warnings: ConflictWarningDTO::from_conflicts(self.conflicts),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidTimeSpan,
    EmptyTitle,
    Participants(ParticipantDirectoryError),
    StorageError,
}

impl From<UseCaseError> for HuddleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::InvalidTimeSpan => {
                Self::BadClientData("The end time must be after the start time".into())
            }
            UseCaseError::EmptyTitle => Self::BadClientData("The event must have a title".into()),
            UseCaseError::Participants(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<ParticipantDirectoryError> for UseCaseError {
    fn from(e: ParticipantDirectoryError) -> Self {
        Self::Participants(e)
    }
}

impl From<EventValidationError> for UseCaseError {
    fn from(e: EventValidationError) -> Self {
        match e {
            EventValidationError::EmptyTitle => Self::EmptyTitle,
            EventValidationError::InvalidTimeSpan(_) => Self::InvalidTimeSpan,
        }
    }
}

/// `(email, role)` pairs the participants would end up with, the first
/// occurrence of an email decides its role
fn requested_roles(participants: &[NewParticipant]) -> Vec<(String, ParticipantRole)> {
    let mut roles: Vec<(String, ParticipantRole)> = Vec::with_capacity(participants.len());
    for p in participants {
        if !roles.iter().any(|(email, _)| *email == p.email) {
            roles.push((p.email.clone(), p.role()));
        }
    }
    roles.sort();
    roles
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Error> {
        let current = match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let mut event = current.event.clone();
        let fields_changed = event.apply_update(&EventUpdate {
            title: self.title.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            event_type: self.event_type,
        })?;

        let replaced_participants = match &self.participants {
            // An empty list leaves the participants as they are
            Some(participants)
                if !participants.is_empty()
                    && requested_roles(participants) != current.participant_roles() =>
            {
                Some(resolve_or_create_many(participants, ctx).await?)
            }
            _ => None,
        };

        if !fields_changed && replaced_participants.is_none() {
            return Ok(UseCaseResponse {
                is_updated: false,
                conflicts: Vec::new(),
            });
        }

        let timespan_changed = event.timespan() != current.event.timespan();
        let conflicts = if timespan_changed || replaced_participants.is_some() {
            let participants = replaced_participants
                .as_deref()
                .unwrap_or(current.participants.as_slice());
            detect_conflicts(&event.timespan(), participants, Some(&event.id), ctx)
                .await
                .map_err(|_| UseCaseError::StorageError)?
        } else {
            Vec::new()
        };

        event.updated = ctx.sys.now();
        let rows = replaced_participants.as_ref().map(|participants| {
            participants
                .iter()
                .map(|p| EventParticipant {
                    event_id: event.id.clone(),
                    participant_id: p.participant.id.clone(),
                    role: p.role,
                })
                .collect::<Vec<_>>()
        });
        ctx.repos
            .events
            .save(&event, rows.as_deref())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse {
            is_updated: true,
            conflicts,
        })
    }
}

impl PermissionBoundary for UpdateEventUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::UpdateEvent]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::test::context_with_failing_store;
    use crate::event::create_event::CreateEventUseCase;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, hour, minute, 0).unwrap()
    }

    fn participant(email: &str, role: Option<ParticipantRole>) -> NewParticipant {
        NewParticipant {
            name: None,
            email: email.into(),
            role,
        }
    }

    async fn create(
        ctx: &HuddleContext,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        participants: Vec<NewParticipant>,
    ) -> EventWithParticipants {
        CreateEventUseCase {
            title: title.into(),
            start_time: start,
            end_time: end,
            event_type: EventType::Team,
            participants,
        }
        .execute(ctx)
        .await
        .unwrap()
        .event
    }

    fn empty_update(event_id: &ID) -> UpdateEventUseCase {
        UpdateEventUseCase {
            event_id: event_id.clone(),
            title: None,
            start_time: None,
            end_time: None,
            event_type: None,
            participants: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn identical_payload_is_not_an_update() {
        let ctx = HuddleContext::create_inmemory();
        let e = create(
            &ctx,
            "Standup",
            at(9, 0),
            at(9, 15),
            vec![participant("john@example.com", Some(ParticipantRole::Editor))],
        )
        .await;

        let mut usecase = UpdateEventUseCase {
            title: Some("Standup".into()),
            start_time: Some(at(9, 0)),
            end_time: Some(at(9, 15)),
            event_type: Some(EventType::Team),
            participants: Some(vec![participant(
                "john@example.com",
                Some(ParticipantRole::Editor),
            )]),
            ..empty_update(&e.event.id)
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(!res.is_updated);
        assert_eq!(ctx.repos.events.find(&e.event.id).await.unwrap().unwrap(), e);
    }

    #[actix_web::main]
    #[test]
    async fn updates_fields() {
        let ctx = HuddleContext::create_inmemory();
        let e = create(&ctx, "Standup", at(9, 0), at(9, 15), vec![]).await;

        let mut usecase = UpdateEventUseCase {
            title: Some("Daily".into()),
            end_time: Some(at(9, 30)),
            ..empty_update(&e.event.id)
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.is_updated);

        let stored = ctx.repos.events.find(&e.event.id).await.unwrap().unwrap();
        assert_eq!(stored.event.title, "Daily");
        assert_eq!(stored.event.end_time, at(9, 30));
        assert_eq!(stored.event.start_time, at(9, 0));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_timespan() {
        let ctx = HuddleContext::create_inmemory();
        let e = create(&ctx, "Standup", at(9, 0), at(9, 15), vec![]).await;

        let mut usecase = UpdateEventUseCase {
            start_time: Some(at(9, 15)),
            ..empty_update(&e.event.id)
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidTimeSpan
        );
        assert_eq!(ctx.repos.events.find(&e.event.id).await.unwrap().unwrap(), e);
    }

    #[actix_web::main]
    #[test]
    async fn missing_event_is_not_found() {
        let ctx = HuddleContext::create_inmemory();
        let event_id = ID::default();
        let mut usecase = UpdateEventUseCase {
            title: Some("Anything".into()),
            ..empty_update(&event_id)
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(event_id)
        );
    }

    #[actix_web::main]
    #[test]
    async fn replaces_participants() {
        let ctx = HuddleContext::create_inmemory();
        let e = create(
            &ctx,
            "Standup",
            at(9, 0),
            at(9, 15),
            vec![participant("john@example.com", None)],
        )
        .await;

        let mut usecase = UpdateEventUseCase {
            participants: Some(vec![
                participant("jane@example.com", Some(ParticipantRole::Organizer)),
                participant("john@example.com", Some(ParticipantRole::Editor)),
            ]),
            ..empty_update(&e.event.id)
        };
        assert!(usecase.execute(&ctx).await.unwrap().is_updated);

        let stored = ctx.repos.events.find(&e.event.id).await.unwrap().unwrap();
        assert_eq!(
            stored.participant_roles(),
            vec![
                ("jane@example.com".to_string(), ParticipantRole::Organizer),
                ("john@example.com".to_string(), ParticipantRole::Editor),
            ]
        );
    }

    #[actix_web::main]
    #[test]
    async fn warns_about_conflicts_except_itself() {
        let ctx = HuddleContext::create_inmemory();
        let john = || vec![participant("john@example.com", None)];
        let morning = create(&ctx, "Morning", at(9, 0), at(10, 0), john()).await;
        let noon = create(&ctx, "Noon", at(12, 0), at(13, 0), john()).await;

        let mut usecase = UpdateEventUseCase {
            start_time: Some(at(9, 30)),
            ..empty_update(&noon.event.id)
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.is_updated);
        assert_eq!(res.conflicts.len(), 1);
        assert_eq!(res.conflicts[0].event.id, morning.event.id);

        // A title change leaves the timespan and participants alone
        let mut usecase = UpdateEventUseCase {
            title: Some("Brunch".into()),
            ..empty_update(&noon.event.id)
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert!(res.is_updated);
        assert!(res.conflicts.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn storage_failure_is_not_reported_as_missing() {
        let ctx = context_with_failing_store();
        let mut usecase = UpdateEventUseCase {
            title: Some("Anything".into()),
            ..empty_update(&ID::default())
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::StorageError
        );
    }

    #[actix_web::main]
    #[test]
    async fn empty_participant_list_keeps_participants() {
        let ctx = HuddleContext::create_inmemory();
        let e = create(
            &ctx,
            "Standup",
            at(9, 0),
            at(9, 15),
            vec![participant("john@example.com", Some(ParticipantRole::Editor))],
        )
        .await;

        let mut usecase = UpdateEventUseCase {
            participants: Some(vec![]),
            ..empty_update(&e.event.id)
        };
        assert!(!usecase.execute(&ctx).await.unwrap().is_updated);

        let mut usecase = UpdateEventUseCase {
            title: Some("Daily".into()),
            participants: Some(vec![]),
            ..empty_update(&e.event.id)
        };
        assert!(usecase.execute(&ctx).await.unwrap().is_updated);

        let stored = ctx.repos.events.find(&e.event.id).await.unwrap().unwrap();
        assert_eq!(stored.event.title, "Daily");
        assert_eq!(
            stored.participant_roles(),
            vec![("john@example.com".to_string(), ParticipantRole::Editor)]
        );
    }
}
