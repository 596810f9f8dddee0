use super::Policy;
use crate::error::HuddleError;
use actix_web::HttpRequest;
use huddle_domain::{verify_invitation_token, ParticipantRole, ID};
use huddle_infra::HuddleContext;

/// The participant an invitation token was issued to
#[derive(Debug, Clone)]
pub struct InvitationBearer {
    pub event_id: ID,
    pub participant_id: ID,
    pub role: ParticipantRole,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn get_token(req: &HttpRequest, query_token: Option<&str>) -> Option<String> {
    if let Some(token) = query_token {
        if !token.trim().is_empty() {
            return Some(token.trim().to_string());
        }
    }
    let header = req.headers().get("authorization")?;
    match header.to_str() {
        Ok(token) => Some(parse_authtoken_header(token)),
        Err(_) => None,
    }
}

/// Authenticates the bearer of an invitation token, given either as the
/// `token` query parameter or in the `authorization` header.
///
/// The role in a valid token is trusted as is, the event participants are
/// not consulted.
pub fn protect_invitation_route(
    req: &HttpRequest,
    query_token: Option<&str>,
    ctx: &HuddleContext,
) -> Result<(InvitationBearer, Policy), HuddleError> {
    let token = match get_token(req, query_token) {
        Some(token) => token,
        None => {
            return Err(HuddleError::Unauthorized(
                "Missing invitation token".into(),
            ))
        }
    };

    let claims = verify_invitation_token(&token, &ctx.config.invitation_secret, ctx.sys.now())
        .map_err(|e| HuddleError::Unauthorized(e.to_string()))?;

    let policy = Policy::from_role(claims.role);
    Ok((
        InvitationBearer {
            event_id: claims.event_id,
            participant_id: claims.participant_id,
            role: claims.role,
        },
        policy,
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Duration;
    use huddle_domain::issue_invitation_token;

    fn token(ctx: &HuddleContext, role: ParticipantRole) -> String {
        issue_invitation_token(
            &ID::default(),
            &ID::default(),
            role,
            &ctx.config.invitation_secret,
            ctx.sys.now(),
        )
        .unwrap()
    }

    #[test]
    fn accepts_token_from_query_or_header() {
        let ctx = HuddleContext::create_inmemory();
        let token = token(&ctx, ParticipantRole::Editor);

        let req = TestRequest::default().to_http_request();
        let (bearer, _) = protect_invitation_route(&req, Some(&token), &ctx).unwrap();
        assert_eq!(bearer.role, ParticipantRole::Editor);

        let req = TestRequest::default()
            .insert_header(("authorization", format!("Bearer {}", token)))
            .to_http_request();
        assert!(protect_invitation_route(&req, None, &ctx).is_ok());
    }

    #[test]
    fn rejects_missing_and_invalid_tokens() {
        let ctx = HuddleContext::create_inmemory();
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            protect_invitation_route(&req, None, &ctx),
            Err(HuddleError::Unauthorized(_))
        ));
        assert!(matches!(
            protect_invitation_route(&req, Some("not-a-token"), &ctx),
            Err(HuddleError::Unauthorized(_))
        ));

        let expired = issue_invitation_token(
            &ID::default(),
            &ID::default(),
            ParticipantRole::Viewer,
            &ctx.config.invitation_secret,
            ctx.sys.now() - Duration::days(8),
        )
        .unwrap();
        assert!(protect_invitation_route(&req, Some(&expired), &ctx).is_err());
    }
}
