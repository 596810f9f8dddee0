use super::IParticipantRepo;
use chrono::{DateTime, Utc};
use huddle_domain::Participant;
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresParticipantRepo {
    pool: PgPool,
}

impl PostgresParticipantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ParticipantRaw {
    participant_uid: Uuid,
    name: String,
    email: String,
    external_id: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl From<ParticipantRaw> for Participant {
    fn from(p: ParticipantRaw) -> Self {
        Self {
            id: p.participant_uid.into(),
            name: p.name,
            email: p.email,
            external_id: p.external_id,
            created: p.created,
            updated: p.updated,
        }
    }
}

#[async_trait::async_trait]
impl IParticipantRepo for PostgresParticipantRepo {
    async fn insert(&self, p: &Participant) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO participants(participant_uid, name, email, external_id, created, updated)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(p.id.inner_ref())
        .bind(&p.name)
        .bind(&p.email)
        .bind(&p.external_id)
        .bind(p.created)
        .bind(p.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Participant>> {
        let participant = sqlx::query_as::<_, ParticipantRaw>(
            r#"
            SELECT * FROM participants AS p
            WHERE p.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(participant.map(Into::into))
    }

    async fn find_by_emails(&self, emails: &[String]) -> anyhow::Result<Vec<Participant>> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let participants = sqlx::query_as::<_, ParticipantRaw>(
            r#"
            SELECT * FROM participants AS p
            WHERE p.email = ANY($1)
            "#,
        )
        .bind(emails)
        .fetch_all(&self.pool)
        .await?;
        Ok(participants.into_iter().map(Into::into).collect())
    }
}
