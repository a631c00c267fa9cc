use reminder_sync_domain::{JobTeardown, Reminder, ReminderJob};
use reminder_sync_infra::ReminderSyncContext;
use tracing::{info, warn};

/// Creates the scheduler entity for the `Reminder`: a periodic job when it
/// is repeating, otherwise a durable job scheduled at its start.
pub async fn schedule_job(
    reminder: &Reminder,
    ctx: &ReminderSyncContext,
) -> anyhow::Result<ReminderJob> {
    if reminder.is_repeating {
        // Only lives in memory, `BootstrapPeriodicJobsUseCase` registers it again on restart
        let handle = ctx.jobs.periodic.add(reminder.periodic_job());
        info!(reminder_id = %reminder.id, handle = %handle, "Added periodic job");
        Ok(ReminderJob::Periodic(handle))
    } else {
        let job = ctx
            .jobs
            .queue
            .insert(reminder.job_args(), reminder.insert_opts())
            .await?;
        info!(reminder_id = %reminder.id, job_id = %job.id, "Inserted durable job");
        Ok(ReminderJob::Durable(job.id))
    }
}

/// Cancels a job that is being replaced. Failing to cancel a durable
/// job is an error, a periodic handle that is already gone is not.
pub async fn cancel_job(job: &ReminderJob, ctx: &ReminderSyncContext) -> anyhow::Result<()> {
    match job {
        ReminderJob::Durable(job_id) => {
            if ctx.jobs.queue.cancel(job_id).await?.is_none() {
                warn!(job_id = %job_id, "Durable job to cancel was not found");
            }
        }
        ReminderJob::Periodic(handle) => {
            if !ctx.jobs.periodic.remove(handle) {
                warn!(handle = %handle, "Periodic job to remove was not registered");
            }
        }
    }
    Ok(())
}

/// Removes the job of a `Reminder` that is going away. Never fails, the
/// outcome is returned and failures are logged.
pub async fn teardown_job(job: Option<&ReminderJob>, ctx: &ReminderSyncContext) -> JobTeardown {
    let teardown = match job {
        None => JobTeardown::Missing,
        Some(ReminderJob::Periodic(handle)) => {
            if ctx.jobs.periodic.remove(handle) {
                JobTeardown::Removed
            } else {
                JobTeardown::Missing
            }
        }
        Some(ReminderJob::Durable(job_id)) => match ctx.jobs.queue.delete(job_id).await {
            Ok(Some(_)) => JobTeardown::Removed,
            Ok(None) => JobTeardown::Missing,
            Err(e) => JobTeardown::Failed(e.to_string()),
        },
    };

    if let JobTeardown::Failed(e) = &teardown {
        warn!(job = ?job, "Failed to tear down reminder job: {}", e);
    }
    teardown
}
