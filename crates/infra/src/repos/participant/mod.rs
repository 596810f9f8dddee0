mod inmemory;
mod postgres;

use huddle_domain::Participant;
pub use inmemory::InMemoryParticipantRepo;
pub use postgres::PostgresParticipantRepo;

/// Participants are keyed by their unique email
#[async_trait::async_trait]
pub trait IParticipantRepo: Send + Sync {
    /// Fails when a participant with the same email already exists
    async fn insert(&self, participant: &Participant) -> anyhow::Result<()>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Participant>>;
    async fn find_by_emails(&self, emails: &[String]) -> anyhow::Result<Vec<Participant>>;
}
