use super::IReminderRepo;
use crate::repos::shared::query_structs::ReminderQuery;
use reminder_sync_domain::{Reminder, ReminderJob, ID};
use sqlx::{FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_id: i64,
    user_id: i64,
    body: String,
    start_ts: i64,
    is_repeating: bool,
    period_minutes: i64,
    contact_method_id: i64,
    job_kind: Option<String>,
    job_id: Option<i64>,
}

impl ReminderRaw {
    fn into_domain(self) -> anyhow::Result<Reminder> {
        let job = match (self.job_kind, self.job_id) {
            (Some(kind), Some(id)) => Some(ReminderJob::from_parts(&kind, id)?),
            _ => None,
        };
        Ok(Reminder {
            id: self.reminder_id.into(),
            user_id: self.user_id.into(),
            body: self.body,
            start_ts: self.start_ts,
            is_repeating: self.is_repeating,
            period_minutes: self.period_minutes,
            contact_method_id: self.contact_method_id.into(),
            job,
        })
    }
}

fn into_reminders(rows: Vec<ReminderRaw>) -> anyhow::Result<Vec<Reminder>> {
    rows.into_iter().map(|r| r.into_domain()).collect()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<ID> {
        let (reminder_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO reminders
            (user_id, body, start_ts, is_repeating, period_minutes, contact_method_id, job_kind, job_id)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING reminder_id
            "#,
        )
        .bind(reminder.user_id.inner())
        .bind(&reminder.body)
        .bind(reminder.start_ts)
        .bind(reminder.is_repeating)
        .bind(reminder.period_minutes)
        .bind(reminder.contact_method_id.inner())
        .bind(reminder.job.map(|j| j.kind()))
        .bind(reminder.job.map(|j| j.raw_id()))
        .fetch_one(&self.pool)
        .await?;

        Ok(reminder_id.into())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET body = $2,
            start_ts = $3,
            is_repeating = $4,
            period_minutes = $5,
            contact_method_id = $6,
            job_kind = $7,
            job_id = $8
            WHERE reminder_id = $1
            "#,
        )
        .bind(reminder.id.inner())
        .bind(&reminder.body)
        .bind(reminder.start_ts)
        .bind(reminder.is_repeating)
        .bind(reminder.period_minutes)
        .bind(reminder.contact_method_id.inner())
        .bind(reminder.job.map(|j| j.kind()))
        .bind(reminder.job.map(|j| j.raw_id()))
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_id = $1
            "#,
        )
        .bind(reminder_id.inner())
        .fetch_optional(&self.pool)
        .await?
        .map(|r| r.into_domain())
        .transpose()
    }

    async fn find_by_query(&self, query: ReminderQuery) -> anyhow::Result<Vec<Reminder>> {
        let rows = match query.upcoming_after {
            Some(now) => {
                sqlx::query_as::<_, ReminderRaw>(
                    r#"
                    SELECT * FROM reminders AS r
                    WHERE r.user_id = $1 AND
                    (r.is_repeating OR r.start_ts > $2)
                    ORDER BY r.start_ts, r.reminder_id
                    "#,
                )
                .bind(query.user_id.inner())
                .bind(now)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ReminderRaw>(
                    r#"
                    SELECT * FROM reminders AS r
                    WHERE r.user_id = $1
                    ORDER BY r.start_ts, r.reminder_id
                    "#,
                )
                .bind(query.user_id.inner())
                .fetch_all(&self.pool)
                .await?
            }
        };

        into_reminders(rows)
    }

    async fn find_repeating(&self) -> anyhow::Result<Vec<Reminder>> {
        let rows = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.is_repeating
            ORDER BY r.reminder_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        into_reminders(rows)
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_id = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner())
        .fetch_optional(&self.pool)
        .await?
        .map(|r| r.into_domain())
        .transpose()
    }
}
