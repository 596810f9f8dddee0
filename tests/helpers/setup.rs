use huddle_api::Application;
use huddle_infra::{Config, HuddleContext, InMemoryMailer};
use huddle_sdk::HuddleSDK;
use std::sync::Arc;

pub struct TestApp {
    pub config: Config,
    /// Every invitation sent by the application ends up here
    pub mailer: Arc<InMemoryMailer>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, HuddleSDK, String) {
    let mut ctx = HuddleContext::create_inmemory();
    ctx.config.port = 0; // Random port
    let mailer = Arc::new(InMemoryMailer::default());
    ctx.mailer = mailer.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config, mailer };
    let sdk = HuddleSDK::new(address.clone());
    (app, sdk, address)
}

/// Extracts the invitation token from the link in an invitation mail
pub fn token_from_mail(html_body: &str) -> String {
    html_body
        .split("token=")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("Invitation mail to contain a token")
        .to_string()
}
