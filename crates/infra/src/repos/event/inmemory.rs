use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use huddle_domain::{
    find_conflicts, Event, EventParticipant, EventWithParticipants, ParticipantWithRole,
    TimeSpan, ID,
};
use std::sync::Arc;

pub struct InMemoryEventRepo {
    tables: Arc<InMemoryTables>,
}

impl InMemoryEventRepo {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }

    fn with_participants(&self, event: Event) -> EventWithParticipants {
        let rows = find_by(&self.tables.event_participants, |row| {
            row.event_id == event.id
        });
        let participants = rows
            .into_iter()
            .filter_map(|row| {
                find(&row.participant_id, &self.tables.participants).map(|participant| {
                    ParticipantWithRole {
                        participant,
                        role: row.role,
                    }
                })
            })
            .collect();
        EventWithParticipants {
            event,
            participants,
        }
    }

    fn all(&self) -> Vec<EventWithParticipants> {
        let mut events = find_by(&self.tables.events, |_| true);
        events.sort_by_key(|e| e.created);
        events
            .into_iter()
            .map(|e| self.with_participants(e))
            .collect()
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &Event, participants: &[EventParticipant]) -> anyhow::Result<()> {
        insert(e, &self.tables.events);
        for row in participants {
            insert(row, &self.tables.event_participants);
        }
        Ok(())
    }

    async fn save(
        &self,
        e: &Event,
        participants: Option<&[EventParticipant]>,
    ) -> anyhow::Result<()> {
        save(e, &self.tables.events);
        if let Some(participants) = participants {
            find_and_delete_by(&self.tables.event_participants, |row| row.event_id == e.id);
            for row in participants {
                insert(row, &self.tables.event_participants);
            }
        }
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<EventWithParticipants>> {
        Ok(find(event_id, &self.tables.events).map(|e| self.with_participants(e)))
    }

    async fn list(&self, limit: usize) -> anyhow::Result<Vec<EventWithParticipants>> {
        Ok(self.all().into_iter().take(limit).collect())
    }

    async fn find_conflicting(
        &self,
        timespan: &TimeSpan,
        external_ids: &[String],
    ) -> anyhow::Result<Vec<EventWithParticipants>> {
        Ok(find_conflicts(timespan, external_ids, None, &self.all()))
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<EventWithParticipants>> {
        Ok(self
            .all()
            .into_iter()
            .filter(|e| e.matches_query(query))
            .collect())
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        find_and_delete_by(&self.tables.event_participants, |row| {
            row.event_id == *event_id
        });
        Ok(delete(event_id, &self.tables.events))
    }
}
