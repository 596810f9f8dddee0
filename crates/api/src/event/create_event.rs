use super::check_conflicts::detect_conflicts;
use super::subscribers::SendInvitationsOnEventCreated;
use crate::error::HuddleError;
use crate::participant::{resolve_or_create_many, ParticipantDirectoryError};
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use huddle_api_structs::create_event::*;
use huddle_domain::{
    Event, EventParticipant, EventType, EventValidationError, EventWithParticipants,
    NewParticipant, TimeSpan,
};
use huddle_infra::HuddleContext;

pub async fn create_event_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<HuddleContext>,
) -> Result<HttpResponse, HuddleError> {
    let body = body.0;
    let usecase = CreateEventUseCase {
        title: body.title,
        start_time: body.start_time,
        end_time: body.end_time,
        event_type: body.event_type.unwrap_or_default(),
        participants: body.participants.into_iter().map(Into::into).collect(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.event, res.conflicts)))
        .map_err(HuddleError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub event_type: EventType,
    pub participants: Vec<NewParticipant>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub event: EventWithParticipants,
    /// Advisory, the event is created regardless
    pub conflicts: Vec<EventWithParticipants>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimeSpan,
    EmptyTitle,
    Participants(ParticipantDirectoryError),
    StorageError,
}

impl From<UseCaseError> for HuddleError {
    fn from(e: UseCaseError) -> Self {
        match e {
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

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Error> {
        let timespan = TimeSpan::new(self.start_time, self.end_time)
            .map_err(|_| UseCaseError::InvalidTimeSpan)?;
        let event = Event::new(self.title.clone(), timespan, self.event_type, ctx.sys.now())?;

        let participants = resolve_or_create_many(&self.participants, ctx).await?;

        let conflicts = detect_conflicts(&timespan, &participants, None, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let rows = participants
            .iter()
            .map(|p| EventParticipant {
                event_id: event.id.clone(),
                participant_id: p.participant.id.clone(),
                role: p.role,
            })
            .collect::<Vec<_>>();
        ctx.repos
            .events
            .insert(&event, &rows)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse {
            event: EventWithParticipants {
                event,
                participants,
            },
            conflicts,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SendInvitationsOnEventCreated)]
    }
}
