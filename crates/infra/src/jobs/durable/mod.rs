mod inmemory;
mod postgres;

pub use inmemory::InMemoryDurableJobQueue;
pub use postgres::PostgresDurableJobQueue;
use reminder_sync_domain::{DurableJob, InsertOpts, ReminderJobArgs, ID};

/// Queue of one-shot jobs persisted in storage
#[async_trait::async_trait]
pub trait IDurableJobQueue: Send + Sync {
    async fn insert(&self, args: ReminderJobArgs, opts: InsertOpts) -> anyhow::Result<DurableJob>;
    /// Cancels the job unless it is already finalized. Returns `None`
    /// if there is no job with the given id.
    async fn cancel(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>>;
    /// Removes the job. A running job can not be deleted.
    async fn delete(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>>;
    async fn find(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>>;
    /// Claims up to `limit` available jobs that are due, marking them as running
    async fn fetch_due(&self, limit: usize) -> anyhow::Result<Vec<DurableJob>>;
    async fn complete(&self, job_id: &ID) -> anyhow::Result<()>;
    /// Finalizes a failed job without retrying it
    async fn discard(&self, job_id: &ID, error: &str) -> anyhow::Result<()>;
}
