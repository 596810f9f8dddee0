use crate::event::UpdateEventInput;
use crate::{APIResponse, BaseClient};
use huddle_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

/// Access to an event with the token from an invitation link
#[derive(Clone)]
pub struct InvitationClient {
    base: Arc<BaseClient>,
}

impl InvitationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    fn query(token: &str) -> InvitationQueryParams {
        InvitationQueryParams {
            token: Some(token.to_string()),
        }
    }

    pub async fn get_event(&self, token: &str) -> APIResponse<get_invited_event::APIResponse> {
        self.base
            .get(
                "invitations/event".into(),
                &Self::query(token),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update_event(
        &self,
        token: &str,
        input: UpdateEventInput,
    ) -> APIResponse<update_invited_event::APIResponse> {
        let body: update_invited_event::RequestBody = input.into();
        self.base
            .put(
                body,
                "invitations/event".into(),
                &Self::query(token),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete_event(&self, token: &str) -> APIResponse<()> {
        self.base
            .delete(
                "invitations/event".into(),
                &Self::query(token),
                StatusCode::NO_CONTENT,
            )
            .await
    }
}
