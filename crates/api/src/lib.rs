mod error;
mod job_schedulers;
mod reminder;
mod shared;

pub use error::ReminderSyncError;
use job_schedulers::{start_periodic_jobs_enqueuer, start_reminder_job_worker};
pub use job_schedulers::run_due_jobs;
pub use reminder::*;
use reminder_sync_infra::ReminderSyncContext;
pub use shared::usecase::{execute, UseCase};
use tracing::info;

pub struct Application {
    context: ReminderSyncContext,
}

impl Application {
    /// Registers the periodic jobs of every repeating reminder again, as
    /// they did not survive the previous process
    pub async fn new(context: ReminderSyncContext) -> Result<Self, ReminderSyncError> {
        execute(BootstrapPeriodicJobsUseCase, &context).await?;

        Ok(Self { context })
    }

    fn start_job_schedulers(context: ReminderSyncContext) {
        start_periodic_jobs_enqueuer(context.clone());
        start_reminder_job_worker(context);
    }

    /// Runs the job loops until ctrl-c is received
    pub async fn start(self) -> Result<(), std::io::Error> {
        Application::start_job_schedulers(self.context);
        tokio::signal::ctrl_c().await?;
        info!("Shutting down");
        Ok(())
    }
}
