use super::IParticipantRepo;
use crate::repos::shared::inmemory_repo::*;
use huddle_domain::Participant;
use std::sync::Arc;

pub struct InMemoryParticipantRepo {
    tables: Arc<InMemoryTables>,
}

impl InMemoryParticipantRepo {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }
}

#[async_trait::async_trait]
impl IParticipantRepo for InMemoryParticipantRepo {
    async fn insert(&self, participant: &Participant) -> anyhow::Result<()> {
        let mut participants = self.tables.participants.lock().unwrap();
        if participants.iter().any(|p| p.email == participant.email) {
            return Err(anyhow::anyhow!(
                "Participant with email {} already exists",
                participant.email
            ));
        }
        participants.push(participant.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Participant>> {
        Ok(find_by(&self.tables.participants, |p| p.email == email)
            .into_iter()
            .next())
    }

    async fn find_by_emails(&self, emails: &[String]) -> anyhow::Result<Vec<Participant>> {
        Ok(find_by(&self.tables.participants, |p| emails.contains(&p.email)))
    }
}
