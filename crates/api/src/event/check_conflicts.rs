use crate::error::HuddleError;
use crate::participant::{find_by_emails, ParticipantDirectoryError};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use huddle_api_structs::check_conflicts::*;
use huddle_domain::{EventWithParticipants, ParticipantWithRole, TimeSpan, ID};
use huddle_infra::HuddleContext;

pub async fn check_conflicts_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<HuddleContext>,
) -> Result<HttpResponse, HuddleError> {
    let body = body.0;
    let usecase = CheckConflictsUseCase {
        start_time: body.start_time,
        end_time: body.end_time,
        emails: body.emails,
        external_ids: body.user_ids,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(HuddleError::from)
}

/// Existing events that overlap `timespan` and share a participant with
/// `participants`, skipping the `exclude` event.
pub(crate) async fn detect_conflicts(
    timespan: &TimeSpan,
    participants: &[ParticipantWithRole],
    exclude: Option<&ID>,
    ctx: &HuddleContext,
) -> anyhow::Result<Vec<EventWithParticipants>> {
    let external_ids = participants
        .iter()
        .map(|p| p.participant.external_id.clone())
        .collect::<Vec<_>>();
    find_conflicting(timespan, &external_ids, exclude, ctx).await
}

async fn find_conflicting(
    timespan: &TimeSpan,
    external_ids: &[String],
    exclude: Option<&ID>,
    ctx: &HuddleContext,
) -> anyhow::Result<Vec<EventWithParticipants>> {
    if external_ids.is_empty() {
        return Ok(Vec::new());
    }
    let conflicts = ctx
        .repos
        .events
        .find_conflicting(timespan, external_ids)
        .await?;
    Ok(conflicts
        .into_iter()
        .filter(|e| Some(&e.event.id) != exclude)
        .collect())
}

#[derive(Debug)]
pub struct CheckConflictsUseCase {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub emails: Vec<String>,
    /// External identity references
    pub external_ids: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimeSpan,
    StorageError,
}

impl From<UseCaseError> for HuddleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTimeSpan => {
                Self::BadClientData("The end time must be after the start time".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<ParticipantDirectoryError> for UseCaseError {
    fn from(_: ParticipantDirectoryError) -> Self {
        Self::StorageError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CheckConflictsUseCase {
    type Response = Vec<EventWithParticipants>;

    type Error = UseCaseError;

    const NAME: &'static str = "CheckConflicts";

    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Error> {
        let timespan = TimeSpan::new(self.start_time, self.end_time)
            .map_err(|_| UseCaseError::InvalidTimeSpan)?;

        if self.emails.is_empty() && self.external_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut external_ids = self.external_ids.clone();
        if !self.emails.is_empty() {
            for participant in find_by_emails(&self.emails, ctx).await? {
                if !external_ids.contains(&participant.external_id) {
                    external_ids.push(participant.external_id);
                }
            }
        }

        find_conflicting(&timespan, &external_ids, None, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
