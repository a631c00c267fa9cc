use super::job_sync::schedule_job;
use crate::{error::ReminderSyncError, shared::usecase::UseCase};
use reminder_sync_domain::{Reminder, ReminderJob};
use reminder_sync_infra::ReminderSyncContext;
use tracing::{error, info};

/// Periodic jobs only live in the memory of the process that registered
/// them. At startup every repeating `Reminder` gets a fresh periodic job
/// and the new handle is stored on it.
#[derive(Debug)]
pub struct BootstrapPeriodicJobsUseCase;

#[derive(Debug, PartialEq, Default)]
pub struct BootstrapSummary {
    pub registered: usize,
    pub failed: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ReminderSyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => {
                Self::Storage("Unable to load repeating reminders".into())
            }
        }
    }
}

async fn register(reminder: &mut Reminder, ctx: &ReminderSyncContext) -> anyhow::Result<()> {
    if let Some(ReminderJob::Periodic(handle)) = &reminder.job {
        // Only there if bootstrapping twice within the same process
        ctx.jobs.periodic.remove(handle);
    }

    let job = schedule_job(reminder, ctx).await?;
    reminder.job = Some(job);
    let saved = ctx.repos.reminders.save(reminder).await;
    if !matches!(saved, Ok(true)) {
        if let ReminderJob::Periodic(handle) = job {
            ctx.jobs.periodic.remove(&handle);
        }
    }
    match saved {
        Ok(true) => Ok(()),
        Ok(false) => Err(anyhow::anyhow!(
            "Reminder with id: {} no longer exists",
            reminder.id
        )),
        Err(e) => Err(e),
    }
}

#[async_trait::async_trait]
impl UseCase for BootstrapPeriodicJobsUseCase {
    type Response = BootstrapSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "BootstrapPeriodicJobs";

    async fn execute(&mut self, ctx: &ReminderSyncContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx
            .repos
            .reminders
            .find_repeating()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut summary = BootstrapSummary::default();
        for mut reminder in reminders {
            match register(&mut reminder, ctx).await {
                Ok(()) => summary.registered += 1,
                Err(e) => {
                    error!(reminder_id = %reminder.id, "Unable to register periodic job: {:?}", e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            registered = summary.registered,
            failed = summary.failed,
            "Bootstrapped periodic jobs"
        );
        Ok(summary)
    }
}
