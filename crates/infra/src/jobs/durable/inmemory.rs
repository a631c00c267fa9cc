use super::IDurableJobQueue;
use crate::{repos::shared::inmemory_repo::*, system::ISys};
use reminder_sync_domain::{DurableJob, InsertOpts, JobState, ReminderJobArgs, ID};
use std::sync::{atomic::AtomicI64, Arc, Mutex};

pub struct InMemoryDurableJobQueue {
    jobs: Mutex<Vec<DurableJob>>,
    sequence: AtomicI64,
    sys: Arc<dyn ISys>,
}

impl InMemoryDurableJobQueue {
    pub fn new(sys: Arc<dyn ISys>) -> Self {
        Self {
            jobs: Mutex::new(vec![]),
            sequence: AtomicI64::new(0),
            sys,
        }
    }

    fn finalize(&self, job_id: &ID, state: JobState, error: Option<&str>) -> anyhow::Result<()> {
        let now = self.sys.get_timestamp_millis();
        // A job cancelled while it was running stays cancelled
        let updated = update_many(
            &self.jobs,
            |j| j.id == *job_id && j.state == JobState::Running,
            |j| {
                j.state = state;
                j.finalized_at = Some(now);
                if let Some(error) = error {
                    j.errors.push(error.to_string());
                }
            },
        );
        if updated.is_empty() && find(job_id, &self.jobs).is_none() {
            return Err(anyhow::anyhow!("Job with id: {} was not found", job_id));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl IDurableJobQueue for InMemoryDurableJobQueue {
    async fn insert(&self, args: ReminderJobArgs, opts: InsertOpts) -> anyhow::Result<DurableJob> {
        let mut job = DurableJob::new(args, &opts, self.sys.get_timestamp_millis());
        job.id = next_id(&self.sequence);
        insert(&job, &self.jobs);
        Ok(job)
    }

    async fn cancel(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>> {
        let now = self.sys.get_timestamp_millis();
        let updated = update_many(
            &self.jobs,
            |j| j.id == *job_id,
            |j| {
                if !j.state.is_finalized() {
                    j.state = JobState::Cancelled;
                    j.finalized_at = Some(now);
                }
            },
        );
        Ok(updated.into_iter().next())
    }

    async fn delete(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>> {
        match find(job_id, &self.jobs) {
            Some(job) if job.state == JobState::Running => Err(anyhow::anyhow!(
                "Job with id: {} is running and can not be deleted",
                job_id
            )),
            Some(_) => Ok(delete(job_id, &self.jobs)),
            None => Ok(None),
        }
    }

    async fn find(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>> {
        Ok(find(job_id, &self.jobs))
    }

    async fn fetch_due(&self, limit: usize) -> anyhow::Result<Vec<DurableJob>> {
        let now = self.sys.get_timestamp_millis();
        let mut due = find_by(&self.jobs, |j| j.is_due(now));
        due.sort_by_key(|j| (j.scheduled_at, j.id));
        due.truncate(limit);

        let claimed: Vec<ID> = due.iter().map(|j| j.id).collect();
        let mut jobs = update_many(
            &self.jobs,
            |j| claimed.contains(&j.id),
            |j| {
                j.state = JobState::Running;
                j.attempt += 1;
            },
        );
        jobs.sort_by_key(|j| (j.scheduled_at, j.id));
        Ok(jobs)
    }

    async fn complete(&self, job_id: &ID) -> anyhow::Result<()> {
        self.finalize(job_id, JobState::Completed, None)
    }

    async fn discard(&self, job_id: &ID, error: &str) -> anyhow::Result<()> {
        self.finalize(job_id, JobState::Discarded, Some(error))
    }
}
