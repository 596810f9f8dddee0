//! Access to a single event for the bearer of an invitation token, scoped
//! by the role the invitation was issued with.

use crate::error::HuddleError;
use crate::event::{DeleteEventUseCase, GetEventUseCase, UpdateEventUseCase};
use crate::shared::{auth::protect_invitation_route, usecase::execute_with_policy};
use actix_web::{web, HttpRequest, HttpResponse};
use huddle_api_structs::{get_invited_event, update_invited_event, InvitationQueryParams};
use huddle_infra::HuddleContext;

async fn get_invited_event_controller(
    http_req: HttpRequest,
    query_params: web::Query<get_invited_event::QueryParams>,
    ctx: web::Data<HuddleContext>,
) -> Result<HttpResponse, HuddleError> {
    let (bearer, policy) =
        protect_invitation_route(&http_req, query_params.token.as_deref(), &ctx)?;

    let usecase = GetEventUseCase {
        event_id: bearer.event_id.clone(),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|event| {
            HttpResponse::Ok().json(get_invited_event::APIResponse::new(
                event,
                bearer.participant_id,
                bearer.role,
            ))
        })
        .map_err(HuddleError::from)
}

async fn update_invited_event_controller(
    http_req: HttpRequest,
    query_params: web::Query<update_invited_event::QueryParams>,
    body: web::Json<update_invited_event::RequestBody>,
    ctx: web::Data<HuddleContext>,
) -> Result<HttpResponse, HuddleError> {
    let (bearer, policy) =
        protect_invitation_route(&http_req, query_params.token.as_deref(), &ctx)?;

    let usecase = UpdateEventUseCase::new(bearer.event_id, body.0);

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(res.into_api_response()))
        .map_err(HuddleError::from)
}

async fn delete_invited_event_controller(
    http_req: HttpRequest,
    query_params: web::Query<InvitationQueryParams>,
    ctx: web::Data<HuddleContext>,
) -> Result<HttpResponse, HuddleError> {
    let (bearer, policy) =
        protect_invitation_route(&http_req, query_params.token.as_deref(), &ctx)?;

    let usecase = DeleteEventUseCase {
        event_id: bearer.event_id,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|_| HttpResponse::NoContent().finish())
        .map_err(HuddleError::from)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/invitations/event",
        web::get().to(get_invited_event_controller),
    );
    cfg.route(
        "/invitations/event",
        web::put().to(update_invited_event_controller),
    );
    cfg.route(
        "/invitations/event",
        web::delete().to(delete_invited_event_controller),
    );
}
