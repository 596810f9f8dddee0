mod event;
mod participant;
mod shared;

pub use event::{IEventRepo, InMemoryEventRepo, PostgresEventRepo};
pub use participant::{IParticipantRepo, InMemoryParticipantRepo, PostgresParticipantRepo};
use shared::inmemory_repo::InMemoryTables;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub participants: Arc<dyn IParticipantRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            participants: Arc::new(PostgresParticipantRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        let tables = Arc::new(InMemoryTables::default());
        Self {
            events: Arc::new(InMemoryEventRepo::new(tables.clone())),
            participants: Arc::new(InMemoryParticipantRepo::new(tables)),
        }
    }
}
