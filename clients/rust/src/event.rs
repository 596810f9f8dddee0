use crate::base::NO_QUERY;
use crate::{APIResponse, BaseClient, ID};
use chrono::{DateTime, Utc};
use huddle_api_structs::dtos::ParticipantInputDTO;
use huddle_api_structs::*;
use huddle_domain::EventType;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct EventClient {
    base: Arc<BaseClient>,
}

pub struct CreateEventInput {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub event_type: Option<EventType>,
    pub participants: Vec<ParticipantInputDTO>,
}

#[derive(Default)]
pub struct UpdateEventInput {
    pub title: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub event_type: Option<EventType>,
    pub participants: Option<Vec<ParticipantInputDTO>>,
}

impl From<UpdateEventInput> for update_event::RequestBody {
    fn from(input: UpdateEventInput) -> Self {
        Self {
            title: input.title,
            start_time: input.start_time,
            end_time: input.end_time,
            event_type: input.event_type,
            participants: input.participants,
        }
    }
}

pub struct CheckConflictsInput {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub emails: Vec<String>,
    pub user_ids: Vec<String>,
}

impl EventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateEventInput) -> APIResponse<create_event::APIResponse> {
        let body = create_event::RequestBody {
            title: input.title,
            start_time: input.start_time,
            end_time: input.end_time,
            event_type: input.event_type,
            participants: input.participants,
        };
        self.base
            .post(body, "events".into(), StatusCode::CREATED)
            .await
    }

    pub async fn list(&self, limit: Option<usize>) -> APIResponse<get_events::APIResponse> {
        let query = get_events::QueryParams { limit };
        self.base
            .get("events".into(), &query, StatusCode::OK)
            .await
    }

    pub async fn get(&self, event_id: &ID) -> APIResponse<get_event::APIResponse> {
        self.base
            .get(format!("events/{}", event_id), &NO_QUERY, StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        event_id: &ID,
        input: UpdateEventInput,
    ) -> APIResponse<update_event::APIResponse> {
        let body: update_event::RequestBody = input.into();
        self.base
            .put(
                body,
                format!("events/{}", event_id),
                &NO_QUERY,
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, event_id: &ID) -> APIResponse<()> {
        self.base
            .delete(
                format!("events/{}", event_id),
                &NO_QUERY,
                StatusCode::NO_CONTENT,
            )
            .await
    }

    pub async fn check_conflicts(
        &self,
        input: CheckConflictsInput,
    ) -> APIResponse<check_conflicts::APIResponse> {
        let body = check_conflicts::RequestBody {
            start_time: input.start_time,
            end_time: input.end_time,
            emails: input.emails,
            user_ids: input.user_ids,
        };
        self.base
            .post(body, "events/check-conflicts".into(), StatusCode::OK)
            .await
    }

    pub async fn search(&self, query: &str) -> APIResponse<search_events::APIResponse> {
        let query = search_events::QueryParams {
            query: Some(query.to_string()),
        };
        self.base
            .get("events/content/search".into(), &query, StatusCode::OK)
            .await
    }
}
