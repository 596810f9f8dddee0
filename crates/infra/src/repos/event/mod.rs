mod inmemory;
mod postgres;

use huddle_domain::{Event, EventParticipant, EventWithParticipants, TimeSpan, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

/// Repository for the event aggregate, an `Event` and its participant join rows.
#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    /// Stores the event and its join rows in one transaction
    async fn insert(&self, e: &Event, participants: &[EventParticipant]) -> anyhow::Result<()>;
    /// Saves the event fields. When `participants` is given, all the join
    /// rows of the event are replaced by them in the same transaction.
    async fn save(&self, e: &Event, participants: Option<&[EventParticipant]>)
        -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<EventWithParticipants>>;
    /// At most `limit` events, oldest first
    async fn list(&self, limit: usize) -> anyhow::Result<Vec<EventWithParticipants>>;
    /// Events overlapping `timespan` that have at least one participant
    /// with an external identity in `external_ids`
    async fn find_conflicting(
        &self,
        timespan: &TimeSpan,
        external_ids: &[String],
    ) -> anyhow::Result<Vec<EventWithParticipants>>;
    async fn search(&self, query: &str) -> anyhow::Result<Vec<EventWithParticipants>>;
    /// Removes the join rows and then the event itself
    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>>;
}
