use rand::{distributions::Alphanumeric, Rng};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Address invitations are sent from
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    /// Domain of the identity provider management api, e.g. `tenant.eu.auth0.com`
    pub domain: String,
    /// Bearer token for the management api
    pub token: String,
    /// Connection new users are created in
    pub connection: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign and verify invitation tokens
    pub invitation_secret: String,
    /// Base url of the frontend, invitation links point here
    pub frontend_url: String,
    /// Maximum number of events returned when listing events
    pub events_list_limit: usize,
    /// When not set, invitations are kept in memory instead of being sent
    pub smtp: Option<SmtpConfig>,
    /// When not set, participants get locally generated identities
    pub identity_provider: Option<IdentityProviderConfig>,
}

impl Config {
    pub fn new() -> Self {
        let invitation_secret = match std::env::var("INVITATION_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find INVITATION_SECRET environment variable. Going to create one.");
                let secret = random_secret(32);
                warn!("Invitation tokens are signed with a generated secret and will not survive a restart.");
                secret
            }
        };
        let default_port = 5000;
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.to_string());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port
            }
        };
        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        let default_events_list_limit = 100;
        let events_list_limit = match std::env::var("EVENTS_LIST_LIMIT") {
            Ok(limit) => limit.parse::<usize>().unwrap_or_else(|_| {
                warn!(
                    "The given EVENTS_LIST_LIMIT: {} is not valid, falling back to: {}.",
                    limit, default_events_list_limit
                );
                default_events_list_limit
            }),
            Err(_) => default_events_list_limit,
        };

        Self {
            port,
            invitation_secret,
            frontend_url,
            events_list_limit,
            smtp: Self::smtp_from_env(),
            identity_provider: Self::identity_provider_from_env(),
        }
    }

    fn smtp_from_env() -> Option<SmtpConfig> {
        let host = match std::env::var("SMTP_HOST") {
            Ok(host) => host,
            Err(_) => {
                info!("Did not find SMTP_HOST environment variable. Invitations will not be emailed.");
                return None;
            }
        };
        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|port| match port.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("The given SMTP_PORT: {} is not valid, using the default.", port);
                    None
                }
            });
        let username = std::env::var("SMTP_USERNAME").ok();
        let from = std::env::var("SMTP_FROM")
            .ok()
            .or_else(|| username.clone())
            .unwrap_or_else(|| format!("no-reply@{}", host));

        Some(SmtpConfig {
            host,
            port,
            username,
            password: std::env::var("SMTP_PASSWORD").ok(),
            from,
        })
    }

    fn identity_provider_from_env() -> Option<IdentityProviderConfig> {
        match (
            std::env::var("IDENTITY_PROVIDER_DOMAIN"),
            std::env::var("IDENTITY_PROVIDER_TOKEN"),
        ) {
            (Ok(domain), Ok(token)) => Some(IdentityProviderConfig {
                domain,
                token,
                connection: std::env::var("IDENTITY_PROVIDER_CONNECTION")
                    .unwrap_or_else(|_| "email".into()),
            }),
            _ => {
                info!("Identity provider is not configured. Participants will get local identities.");
                None
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Alphanumeric secret used when no invitation secret is configured
fn random_secret(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
