use super::IEventRepo;
use chrono::{DateTime, Utc};
use huddle_domain::{
    Event, EventParticipant, EventWithParticipants, Participant, ParticipantRole,
    ParticipantWithRole, TimeSpan, ID,
};
use serde::Deserialize;
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    title: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    event_type: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ParticipantRaw {
    participant_uid: Uuid,
    name: String,
    email: String,
    external_id: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    role: ParticipantRole,
}

#[derive(Debug, FromRow)]
struct EventWithParticipantsRaw {
    #[sqlx(flatten)]
    event: EventRaw,
    participants: Json<Vec<ParticipantRaw>>,
}

impl TryFrom<EventRaw> for Event {
    type Error = anyhow::Error;

    fn try_from(e: EventRaw) -> anyhow::Result<Self> {
        Ok(Event {
            id: e.event_uid.into(),
            title: e.title,
            start_time: e.start_time,
            end_time: e.end_time,
            event_type: e.event_type.parse()?,
            created: e.created,
            updated: e.updated,
        })
    }
}

impl From<ParticipantRaw> for ParticipantWithRole {
    fn from(p: ParticipantRaw) -> Self {
        ParticipantWithRole {
            participant: Participant {
                id: p.participant_uid.into(),
                name: p.name,
                email: p.email,
                external_id: p.external_id,
                created: p.created,
                updated: p.updated,
            },
            role: p.role,
        }
    }
}

impl TryFrom<EventWithParticipantsRaw> for EventWithParticipants {
    type Error = anyhow::Error;

    fn try_from(e: EventWithParticipantsRaw) -> anyhow::Result<Self> {
        Ok(EventWithParticipants {
            event: e.event.try_into()?,
            participants: e.participants.0.into_iter().map(Into::into).collect(),
        })
    }
}

fn into_events(rows: Vec<EventWithParticipantsRaw>) -> anyhow::Result<Vec<EventWithParticipants>> {
    rows.into_iter().map(TryInto::try_into).collect()
}

/// Every event query projects the event columns together with its
/// participants aggregated into a json array
const SELECT_EVENTS: &str = r#"
    SELECT
        e.event_uid, e.title, e.start_time, e.end_time, e.event_type, e.created, e.updated,
        COALESCE(
            json_agg(json_build_object(
                'participant_uid', p.participant_uid,
                'name', p.name,
                'email', p.email,
                'external_id', p.external_id,
                'created', p.created,
                'updated', p.updated,
                'role', ep.role
            )) FILTER (WHERE p.participant_uid IS NOT NULL),
            '[]'
        ) AS participants
    FROM events AS e
    LEFT JOIN event_participants AS ep ON ep.event_uid = e.event_uid
    LEFT JOIN participants AS p ON p.participant_uid = ep.participant_uid
"#;

/// Escapes LIKE wildcards so the query is matched literally
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

async fn insert_participant_rows(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    rows: &[EventParticipant],
) -> anyhow::Result<()> {
    for row in rows {
        sqlx::query(
            r#"
            INSERT INTO event_participants(event_uid, participant_uid, role)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(row.event_id.inner_ref())
        .bind(row.participant_id.inner_ref())
        .bind(row.role.as_str())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &Event, participants: &[EventParticipant]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO events(
                event_uid,
                title,
                start_time,
                end_time,
                event_type,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.title)
        .bind(e.start_time)
        .bind(e.end_time)
        .bind(e.event_type.as_str())
        .bind(e.created)
        .bind(e.updated)
        .execute(&mut *tx)
        .await?;
        insert_participant_rows(&mut tx, participants).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn save(
        &self,
        e: &Event,
        participants: Option<&[EventParticipant]>,
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            UPDATE events SET
                title = $2,
                start_time = $3,
                end_time = $4,
                event_type = $5,
                updated = $6
            WHERE event_uid = $1
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.title)
        .bind(e.start_time)
        .bind(e.end_time)
        .bind(e.event_type.as_str())
        .bind(e.updated)
        .execute(&mut *tx)
        .await?;
        if let Some(participants) = participants {
            sqlx::query("DELETE FROM event_participants WHERE event_uid = $1")
                .bind(e.id.inner_ref())
                .execute(&mut *tx)
                .await?;
            insert_participant_rows(&mut tx, participants).await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<EventWithParticipants>> {
        let query = format!(
            "{} WHERE e.event_uid = $1 GROUP BY e.event_uid",
            SELECT_EVENTS
        );
        let event = sqlx::query_as::<_, EventWithParticipantsRaw>(&query)
            .bind(event_id.inner_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Unable to query event {}: {:?}", event_id, e);
                e
            })?;
        event.map(TryInto::try_into).transpose()
    }

    async fn list(&self, limit: usize) -> anyhow::Result<Vec<EventWithParticipants>> {
        let query = format!(
            "{} GROUP BY e.event_uid ORDER BY e.created ASC LIMIT $1",
            SELECT_EVENTS
        );
        let events = sqlx::query_as::<_, EventWithParticipantsRaw>(&query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        into_events(events)
    }

    async fn find_conflicting(
        &self,
        timespan: &TimeSpan,
        external_ids: &[String],
    ) -> anyhow::Result<Vec<EventWithParticipants>> {
        if external_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            r#"{}
            WHERE e.start_time <= $1 AND e.end_time >= $2
            AND EXISTS (
                SELECT 1 FROM event_participants AS ep2
                INNER JOIN participants AS p2 ON p2.participant_uid = ep2.participant_uid
                WHERE ep2.event_uid = e.event_uid AND p2.external_id = ANY($3)
            )
            GROUP BY e.event_uid
            ORDER BY e.start_time ASC
            "#,
            SELECT_EVENTS
        );
        let events = sqlx::query_as::<_, EventWithParticipantsRaw>(&query)
            .bind(timespan.end())
            .bind(timespan.start())
            .bind(external_ids)
            .fetch_all(&self.pool)
            .await?;
        into_events(events)
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<EventWithParticipants>> {
        let sql = format!(
            r#"{}
            WHERE e.title ILIKE $1 OR e.event_type ILIKE $1
            OR EXISTS (
                SELECT 1 FROM event_participants AS ep2
                INNER JOIN participants AS p2 ON p2.participant_uid = ep2.participant_uid
                WHERE ep2.event_uid = e.event_uid AND (p2.name ILIKE $1 OR p2.email ILIKE $1)
            )
            GROUP BY e.event_uid
            ORDER BY e.created ASC
            "#,
            SELECT_EVENTS
        );
        let events = sqlx::query_as::<_, EventWithParticipantsRaw>(&sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await?;
        into_events(events)
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM event_participants WHERE event_uid = $1")
            .bind(event_id.inner_ref())
            .execute(&mut *tx)
            .await?;
        let event = sqlx::query_as::<_, EventRaw>(
            r#"
            DELETE FROM events AS e
            WHERE e.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!("Unable to delete event {}: {:?}", event_id, e);
            e
        })?;
        tx.commit().await?;

        event.map(TryInto::try_into).transpose()
    }
}
