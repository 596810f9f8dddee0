use crate::error::HuddleError;
use crate::shared::{
    auth::Permission,
    usecase::{execute, PermissionBoundary, UseCase},
};
use actix_web::{web, HttpResponse};
use huddle_api_structs::delete_event::*;
use huddle_domain::{Event, ID};
use huddle_infra::HuddleContext;

pub async fn delete_event_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<HuddleContext>,
) -> Result<HttpResponse, HuddleError> {
    let usecase = DeleteEventUseCase {
        event_id: path_params.event_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::NoContent().finish())
        .map_err(HuddleError::from)
}

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for HuddleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.events.delete(&self.event_id).await {
            Ok(Some(event)) => Ok(event),
            Ok(None) => Err(UseCaseError::NotFound(self.event_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

impl PermissionBoundary for DeleteEventUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::DeleteEvent]
    }
}
