use crate::error::HuddleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use huddle_api_structs::dtos::EventDTO;
use huddle_api_structs::search_events::*;
use huddle_domain::EventWithParticipants;
use huddle_infra::HuddleContext;

pub async fn search_events_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<HuddleContext>,
) -> Result<HttpResponse, HuddleError> {
    let usecase = SearchEventsUseCase {
        query: query_params.0.query,
    };

    execute(usecase, &ctx)
        .await
        .map(|events| {
            let res: APIResponse = events.into_iter().map(EventDTO::new).collect();
            HttpResponse::Ok().json(res)
        })
        .map_err(HuddleError::from)
}

#[derive(Debug)]
pub struct SearchEventsUseCase {
    pub query: Option<String>,
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
impl UseCase for SearchEventsUseCase {
    type Response = Vec<EventWithParticipants>;

    type Error = UseCaseError;

    const NAME: &'static str = "SearchEvents";

    async fn execute(&mut self, ctx: &HuddleContext) -> Result<Self::Response, Self::Error> {
        let query = match &self.query {
            Some(query) if !query.trim().is_empty() => query.trim(),
            _ => return Ok(Vec::new()),
        };

        ctx.repos
            .events
            .search(query)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::create_event::CreateEventUseCase;
    use chrono::{Duration, Utc};
    use huddle_domain::{EventType, NewParticipant};

    async fn setup() -> HuddleContext {
        let ctx = HuddleContext::create_inmemory();
        let now = Utc::now();
        for (title, email) in [
            ("Sprint planning", "john@example.com"),
            ("Lunch", "jane@example.com"),
        ] {
            CreateEventUseCase {
                title: title.into(),
                start_time: now,
                end_time: now + Duration::hours(1),
                event_type: EventType::Personal,
                participants: vec![
                    NewParticipant {
                        name: None,
                        email: email.into(),
                        role: None,
                    },
                    NewParticipant {
                        name: Some("Alice Smith".into()),
                        email: "alice@example.com".into(),
                        role: None,
                    },
                ],
            }
            .execute(&ctx)
            .await
            .unwrap();
        }
        ctx
    }

    async fn search(ctx: &HuddleContext, query: Option<&str>) -> Vec<EventWithParticipants> {
        SearchEventsUseCase {
            query: query.map(String::from),
        }
        .execute(ctx)
        .await
        .unwrap()
    }

    #[actix_web::main]
    #[test]
    async fn searches_title_and_participants() {
        let ctx = setup().await;

        let res = search(&ctx, Some("SPRINT")).await;
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].event.title, "Sprint planning");
        // All participants of a match are returned
        assert_eq!(res[0].participants.len(), 2);

        assert_eq!(search(&ctx, Some("jane@")).await.len(), 1);
        assert_eq!(search(&ctx, Some("alice smith")).await.len(), 2);
        assert_eq!(search(&ctx, Some("personal")).await.len(), 2);
        assert!(search(&ctx, Some("retro")).await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn empty_query_returns_nothing() {
        let ctx = setup().await;
        assert!(search(&ctx, None).await.is_empty());
        assert!(search(&ctx, Some("  ")).await.is_empty());
    }
}
