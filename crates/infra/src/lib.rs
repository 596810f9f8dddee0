mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, IdentityProviderConfig, SmtpConfig};
pub use repos::{IEventRepo, IParticipantRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct HuddleContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub identity_provider: Arc<dyn IIdentityProvider>,
    pub mailer: Arc<dyn IMailer>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl HuddleContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string).await?,
            None => {
                warn!("DATABASE_URL is not set. Events will only be stored in memory.");
                Repos::create_inmemory()
            }
        };
        let config = Config::new();
        let identity_provider = Self::identity_provider(&config);
        let mailer: Arc<dyn IMailer> = match &config.smtp {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
            None => Arc::new(InMemoryMailer::default()),
        };

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            identity_provider,
            mailer,
        })
    }

    fn identity_provider(config: &Config) -> Arc<dyn IIdentityProvider> {
        match &config.identity_provider {
            Some(provider) => {
                info!("Participants are provisioned at {}", provider.domain);
                Arc::new(ManagementApiIdentityProvider::new(provider.clone()))
            }
            None => Arc::new(LocalIdentityProvider {}),
        }
    }

    /// Context where every collaborator lives in memory
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            identity_provider: Arc::new(LocalIdentityProvider {}),
            mailer: Arc::new(InMemoryMailer::default()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<HuddleContext> {
    HuddleContext::create(ContextParams {
        postgres_connection_string: std::env::var("DATABASE_URL").ok(),
    })
    .await
}
