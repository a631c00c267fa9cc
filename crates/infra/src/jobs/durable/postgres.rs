use super::IDurableJobQueue;
use crate::system::ISys;
use reminder_sync_domain::{DurableJob, InsertOpts, JobState, ReminderJobArgs, ID};
use sqlx::{types::Json, FromRow, PgPool};
use std::sync::Arc;

pub struct PostgresDurableJobQueue {
    pool: PgPool,
    sys: Arc<dyn ISys>,
}

impl PostgresDurableJobQueue {
    pub fn new(pool: PgPool, sys: Arc<dyn ISys>) -> Self {
        Self { pool, sys }
    }

    async fn finalize(&self, job_id: &ID, state: JobState, error: Option<&str>) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE reminder_jobs
            SET state = $2,
            finalized_at = $3,
            errors = CASE WHEN $4::TEXT IS NULL THEN errors ELSE array_append(errors, $4::TEXT) END
            WHERE job_id = $1 AND state = 'running'
            "#,
        )
        .bind(job_id.inner())
        .bind(state.to_string())
        .bind(self.sys.get_timestamp_millis())
        .bind(error)
        .execute(&self.pool)
        .await?;

        // A job cancelled while it was running stays cancelled
        if res.rows_affected() == 0 && self.find(job_id).await?.is_none() {
            return Err(anyhow::anyhow!("Job with id: {} was not found", job_id));
        }
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct DurableJobRaw {
    job_id: i64,
    args: Json<ReminderJobArgs>,
    scheduled_at: i64,
    state: String,
    attempt: i32,
    errors: Vec<String>,
    created_at: i64,
    finalized_at: Option<i64>,
}

impl DurableJobRaw {
    fn into_domain(self) -> anyhow::Result<DurableJob> {
        Ok(DurableJob {
            id: self.job_id.into(),
            args: self.args.0,
            scheduled_at: self.scheduled_at,
            state: self.state.parse::<JobState>()?,
            attempt: self.attempt,
            errors: self.errors,
            created_at: self.created_at,
            finalized_at: self.finalized_at,
        })
    }
}

#[async_trait::async_trait]
impl IDurableJobQueue for PostgresDurableJobQueue {
    async fn insert(&self, args: ReminderJobArgs, opts: InsertOpts) -> anyhow::Result<DurableJob> {
        sqlx::query_as::<_, DurableJobRaw>(
            r#"
            INSERT INTO reminder_jobs
            (args, scheduled_at, state, attempt, errors, created_at)
            VALUES($1, $2, $3, 0, '{}', $4)
            RETURNING *
            "#,
        )
        .bind(Json(args))
        .bind(opts.scheduled_at)
        .bind(JobState::Available.to_string())
        .bind(self.sys.get_timestamp_millis())
        .fetch_one(&self.pool)
        .await?
        .into_domain()
    }

    async fn cancel(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>> {
        sqlx::query_as::<_, DurableJobRaw>(
            r#"
            UPDATE reminder_jobs AS j
            SET state = CASE WHEN j.state IN ('available', 'running') THEN 'cancelled' ELSE j.state END,
            finalized_at = COALESCE(j.finalized_at, $2)
            WHERE j.job_id = $1
            RETURNING *
            "#,
        )
        .bind(job_id.inner())
        .bind(self.sys.get_timestamp_millis())
        .fetch_optional(&self.pool)
        .await?
        .map(|j| j.into_domain())
        .transpose()
    }

    async fn delete(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>> {
        let deleted = sqlx::query_as::<_, DurableJobRaw>(
            r#"
            DELETE FROM reminder_jobs AS j
            WHERE j.job_id = $1 AND
            j.state <> 'running'
            RETURNING *
            "#,
        )
        .bind(job_id.inner())
        .fetch_optional(&self.pool)
        .await?;

        match deleted {
            Some(job) => job.into_domain().map(Some),
            None => match self.find(job_id).await? {
                Some(_) => Err(anyhow::anyhow!(
                    "Job with id: {} is running and can not be deleted",
                    job_id
                )),
                None => Ok(None),
            },
        }
    }

    async fn find(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>> {
        sqlx::query_as::<_, DurableJobRaw>(
            r#"
            SELECT * FROM reminder_jobs AS j
            WHERE j.job_id = $1
            "#,
        )
        .bind(job_id.inner())
        .fetch_optional(&self.pool)
        .await?
        .map(|j| j.into_domain())
        .transpose()
    }

    async fn fetch_due(&self, limit: usize) -> anyhow::Result<Vec<DurableJob>> {
        let jobs = sqlx::query_as::<_, DurableJobRaw>(
            r#"
            UPDATE reminder_jobs
            SET state = 'running',
            attempt = attempt + 1
            WHERE job_id IN (
                SELECT j.job_id FROM reminder_jobs AS j
                WHERE j.state = 'available' AND
                j.scheduled_at <= $1
                ORDER BY j.scheduled_at, j.job_id
                LIMIT $2
                FOR UPDATE SKIP LOCKED
            )
            RETURNING *
            "#,
        )
        .bind(self.sys.get_timestamp_millis())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut jobs = jobs
            .into_iter()
            .map(|j| j.into_domain())
            .collect::<anyhow::Result<Vec<_>>>()?;
        jobs.sort_by_key(|j| (j.scheduled_at, j.id));
        Ok(jobs)
    }

    async fn complete(&self, job_id: &ID) -> anyhow::Result<()> {
        self.finalize(job_id, JobState::Completed, None).await
    }

    async fn discard(&self, job_id: &ID, error: &str) -> anyhow::Result<()> {
        self.finalize(job_id, JobState::Discarded, Some(error)).await
    }
}
