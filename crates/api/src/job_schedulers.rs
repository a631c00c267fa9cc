use crate::{
    reminder::{EnqueuePeriodicJobsUseCase, SendReminderUseCase},
    shared::usecase::execute,
};
use futures::future::join_all;
use reminder_sync_infra::ReminderSyncContext;
use std::time::Duration;
use tokio::time::interval;
use tracing::error;

pub fn start_periodic_jobs_enqueuer(ctx: ReminderSyncContext) {
    tokio::spawn(async move {
        let period = Duration::from_millis(ctx.config.periodic_tick_interval_millis);
        let mut interval = interval(period);
        loop {
            interval.tick().await;
            let _ = execute(EnqueuePeriodicJobsUseCase, &ctx).await;
        }
    });
}

pub fn start_reminder_job_worker(ctx: ReminderSyncContext) {
    tokio::spawn(async move {
        let period = Duration::from_millis(ctx.config.job_poll_interval_millis);
        let mut interval = interval(period);
        loop {
            interval.tick().await;
            run_due_jobs(&ctx).await;
        }
    });
}

/// Claims the durable jobs that are due and sends their reminders
/// concurrently. Returns the number of jobs that were claimed.
pub async fn run_due_jobs(ctx: &ReminderSyncContext) -> usize {
    let jobs = match ctx.jobs.queue.fetch_due(ctx.config.job_fetch_limit).await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Unable to fetch due jobs: {:?}", e);
            return 0;
        }
    };

    let count = jobs.len();
    let runs = jobs
        .into_iter()
        .map(|job| execute(SendReminderUseCase { job }, ctx));
    join_all(runs).await;
    count
}
