mod helpers;

use chrono::{DateTime, TimeZone, Utc};
use helpers::setup::{spawn_app, token_from_mail};
use huddle_sdk::{
    APIError, CheckConflictsInput, CreateEventInput, EventType, HuddleSDK, ParticipantInputDTO,
    ParticipantRole, UpdateEventInput, ID,
};
use reqwest::StatusCode;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, hour, minute, 0).unwrap()
}

fn participant(email: &str, role: Option<ParticipantRole>) -> ParticipantInputDTO {
    ParticipantInputDTO {
        name: None,
        email: email.into(),
        role,
    }
}

fn event_input(
    title: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    participants: Vec<ParticipantInputDTO>,
) -> CreateEventInput {
    CreateEventInput {
        title: title.into(),
        start_time: start,
        end_time: end,
        event_type: Some(EventType::Team),
        participants,
    }
}

fn assert_status<T: std::fmt::Debug>(res: Result<T, APIError>, status: StatusCode) {
    match res {
        Err(APIError::UnexpectedStatusCode(s)) => assert_eq!(s, status),
        other => panic!("Expected status {}, got {:?}", status, other),
    }
}

async fn create_event(sdk: &HuddleSDK, input: CreateEventInput) -> huddle_sdk::EventDTO {
    sdk.event
        .create(input)
        .await
        .expect("Expected to create event")
        .event
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_create_event_with_conflict_warning() {
    let (_, sdk, _) = spawn_app().await;
    let john = || vec![participant("john@example.com", None)];

    let a = sdk
        .event
        .create(event_input("A", at(10, 0), at(12, 0), john()))
        .await
        .expect("Expected to create event");
    assert!(a.warnings.is_none());
    assert_eq!(a.event.participants.len(), 1);
    assert_eq!(a.event.participants[0].role, ParticipantRole::Viewer);

    let b = sdk
        .event
        .create(event_input("B", at(11, 0), at(13, 0), john()))
        .await
        .expect("Expected to create event");
    let warnings = b.warnings.expect("Expected conflict warnings");
    assert_eq!(
        warnings.message,
        "Some participants have scheduling conflicts"
    );
    assert_eq!(warnings.conflicts.len(), 1);
    assert_eq!(warnings.conflicts[0].id, a.event.id);

    let res = sdk
        .event
        .check_conflicts(CheckConflictsInput {
            start_time: at(12, 30),
            end_time: at(14, 0),
            emails: vec!["john@example.com".into()],
            user_ids: Vec::new(),
        })
        .await
        .expect("Expected to check conflicts");
    // Only B overlaps
    assert_eq!(res.conflicted_events.len(), 1);
    assert_eq!(res.conflicted_events[0].id, b.event.id);

    let res = sdk
        .event
        .check_conflicts(CheckConflictsInput {
            start_time: at(13, 30),
            end_time: at(14, 0),
            emails: vec!["john@example.com".into()],
            user_ids: Vec::new(),
        })
        .await
        .expect("Expected to check conflicts");
    assert!(res.conflicted_events.is_empty());
}

#[actix_web::main]
#[test]
async fn test_create_event_validation() {
    let (_, sdk, _) = spawn_app().await;

    let res = sdk
        .event
        .create(event_input("A", at(10, 0), at(10, 0), vec![]))
        .await;
    assert_status(res, StatusCode::BAD_REQUEST);

    let res = sdk
        .event
        .create(event_input(
            "A",
            at(10, 0),
            at(11, 0),
            vec![participant("not-an-email", None)],
        ))
        .await;
    assert_status(res, StatusCode::BAD_REQUEST);
}

#[actix_web::main]
#[test]
async fn test_crud_event() {
    let (_, sdk, _) = spawn_app().await;
    let event = create_event(
        &sdk,
        event_input(
            "Planning",
            at(9, 0),
            at(10, 0),
            vec![participant("john@example.com", Some(ParticipantRole::Organizer))],
        ),
    )
    .await;

    let fetched = sdk.event.get(&event.id).await.expect("Expected event");
    assert_eq!(fetched.event, event);

    let listed = sdk.event.list(None).await.expect("Expected events");
    assert_eq!(listed.events.len(), 1);

    let res = sdk
        .event
        .update(
            &event.id,
            UpdateEventInput {
                title: Some("Planning".into()),
                ..Default::default()
            },
        )
        .await
        .expect("Expected to update event");
    assert!(!res.is_updated);
    assert!(res.warnings.is_none());

    let res = sdk
        .event
        .update(
            &event.id,
            UpdateEventInput {
                title: Some("Retro".into()),
                participants: Some(vec![participant("jane@example.com", None)]),
                ..Default::default()
            },
        )
        .await
        .expect("Expected to update event");
    assert!(res.is_updated);

    let fetched = sdk.event.get(&event.id).await.expect("Expected event").event;
    assert_eq!(fetched.title, "Retro");
    assert_eq!(fetched.participants.len(), 1);
    assert_eq!(fetched.participants[0].email, "jane@example.com");

    assert!(sdk.event.delete(&event.id).await.is_ok());
    assert_status(sdk.event.get(&event.id).await, StatusCode::NOT_FOUND);
    assert_status(sdk.event.delete(&event.id).await, StatusCode::NOT_FOUND);
    assert_status(
        sdk.event.update(&ID::default(), Default::default()).await,
        StatusCode::NOT_FOUND,
    );
}

#[actix_web::main]
#[test]
async fn test_search_events() {
    let (_, sdk, _) = spawn_app().await;
    create_event(
        &sdk,
        event_input(
            "Sprint planning",
            at(9, 0),
            at(10, 0),
            vec![participant("john@example.com", None)],
        ),
    )
    .await;
    create_event(&sdk, event_input("Lunch", at(12, 0), at(13, 0), vec![])).await;

    let res = sdk.event.search("sprint").await.expect("Expected results");
    assert_eq!(res.len(), 1);
    assert_eq!(res[0].title, "Sprint planning");

    assert_eq!(sdk.event.search("JOHN@").await.unwrap().len(), 1);
    assert_eq!(sdk.event.search("team").await.unwrap().len(), 2);
    assert!(sdk.event.search("").await.unwrap().is_empty());
}

#[actix_web::main]
#[test]
async fn test_invitations() {
    let (app, sdk, _) = spawn_app().await;
    let event = create_event(
        &sdk,
        event_input(
            "Offsite",
            at(9, 0),
            at(17, 0),
            vec![
                participant("viewer@example.com", None),
                participant("editor@example.com", Some(ParticipantRole::Editor)),
            ],
        ),
    )
    .await;

    let mails = app.mailer.sent();
    assert_eq!(mails.len(), 2);
    assert_eq!(mails[0].subject, "Invitation to the event: Offsite");
    assert!(mails[0]
        .html_body
        .contains(&format!("{}/events/calendar?token=", app.config.frontend_url)));
    let viewer_token = token_from_mail(&mails[0].html_body);
    let editor_token = token_from_mail(&mails[1].html_body);

    let res = sdk
        .invitation
        .get_event(&viewer_token)
        .await
        .expect("Expected invited event");
    assert_eq!(res.event.id, event.id);
    assert_eq!(res.role, ParticipantRole::Viewer);
    assert_eq!(res.participant_id, event.participants[0].id);

    // Viewers can only read
    let res = sdk
        .invitation
        .update_event(
            &viewer_token,
            UpdateEventInput {
                title: Some("Onsite".into()),
                ..Default::default()
            },
        )
        .await;
    assert_status(res, StatusCode::UNAUTHORIZED);

    let res = sdk
        .invitation
        .update_event(
            &editor_token,
            UpdateEventInput {
                title: Some("Onsite".into()),
                ..Default::default()
            },
        )
        .await
        .expect("Expected editor to update event");
    assert!(res.is_updated);
    assert_eq!(sdk.event.get(&event.id).await.unwrap().event.title, "Onsite");

    // Only organizers may delete
    assert_status(
        sdk.invitation.delete_event(&editor_token).await,
        StatusCode::UNAUTHORIZED,
    );

    assert_status(
        sdk.invitation.get_event("garbage").await,
        StatusCode::UNAUTHORIZED,
    );

    assert!(sdk.event.delete(&event.id).await.is_ok());
    assert_status(
        sdk.invitation.get_event(&viewer_token).await,
        StatusCode::NOT_FOUND,
    );
}
