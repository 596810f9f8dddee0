use super::create_event::{CreateEventUseCase, UseCaseResponse};
use crate::shared::usecase::Subscriber;
use huddle_domain::{issue_invitation_token, Event, ParticipantWithRole};
use huddle_infra::{HuddleContext, Mail};
use tracing::{error, info};
use url::Url;

/// Link to the event in the frontend, authenticated by the invitation token
fn invitation_link(frontend_url: &str, token: &str) -> anyhow::Result<Url> {
    let mut link = Url::parse(&format!(
        "{}/events/calendar",
        frontend_url.trim_end_matches('/')
    ))?;
    link.query_pairs_mut().append_pair("token", token);
    Ok(link)
}

fn invitation_mail(event: &Event, invitee: &ParticipantWithRole, link: &Url) -> Mail {
    let html_body = format!(
        r#"<html>
  <body>
    <p>Hello {name},</p>
    <p>You have been invited to the event: <strong>{title}</strong>.</p>
    <p><strong>Your role:</strong> {role}</p>
    <p>
      Follow the link below to open the event:<br />
      <a href="{link}" target="_blank">Open the event</a>
    </p>
    <p>Or copy and paste this link into your browser:</p>
    <p style="word-break: break-all;">{link}</p>
  </body>
</html>"#,
        name = invitee.participant.name,
        title = event.title,
        role = invitee.role,
        link = link,
    );

    Mail {
        to: invitee.participant.email.clone(),
        subject: format!("Invitation to the event: {}", event.title),
        html_body,
    }
}

async fn send_invitation(
    event: &Event,
    invitee: &ParticipantWithRole,
    ctx: &HuddleContext,
) -> anyhow::Result<()> {
    let token = issue_invitation_token(
        &event.id,
        &invitee.participant.id,
        invitee.role,
        &ctx.config.invitation_secret,
        ctx.sys.now(),
    )?;
    let link = invitation_link(&ctx.config.frontend_url, &token)?;
    ctx.mailer
        .send(invitation_mail(event, invitee, &link))
        .await
}

pub struct SendInvitationsOnEventCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateEventUseCase> for SendInvitationsOnEventCreated {
    async fn notify(&self, res: &UseCaseResponse, ctx: &HuddleContext) {
        let event = &res.event.event;
        for invitee in &res.event.participants {
            // Sideeffect, the event exists regardless of the outcome
            if let Err(e) = send_invitation(event, invitee, ctx).await {
                error!(
                    "Unable to send invitation for event {} to {}. Error: {:?}",
                    event.id, invitee.participant.email, e
                );
            }
        }
        info!("Invitations sent for event {}", event.id);
    }
}
