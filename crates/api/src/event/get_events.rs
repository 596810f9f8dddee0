use crate::error::HuddleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use huddle_api_structs::get_events::*;
use huddle_domain::EventWithParticipants;
use huddle_infra::HuddleContext;

pub async fn get_events_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<HuddleContext>,
) -> Result<HttpResponse, HuddleError> {
    let usecase = GetEventsUseCase {
        limit: query_params.limit,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(HuddleError::from)
}

#[derive(Debug)]
pub struct GetEventsUseCase {
    /// Capped by the configured events list limit
    pub limit: Option<usize>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for HuddleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = Vec<EventWithParticipants>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Error> {
        let max = ctx.config.events_list_limit;
        let limit = self.limit.map(|limit| limit.min(max)).unwrap_or(max);

        ctx.repos
            .events
            .list(limit)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
