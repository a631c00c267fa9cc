use crate::shared::usecase::UseCase;
use reminder_sync_domain::InsertOpts;
use reminder_sync_infra::ReminderSyncContext;
use tracing::error;

/// Moves the periodic jobs that are due onto the durable queue, where
/// workers pick them up like any other job
#[derive(Debug)]
pub struct EnqueuePeriodicJobsUseCase;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {}

#[async_trait::async_trait]
impl UseCase for EnqueuePeriodicJobsUseCase {
    /// Number of durable jobs inserted
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "EnqueuePeriodicJobs";

    async fn execute(&mut self, ctx: &ReminderSyncContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let mut enqueued = 0;
        for occurrence in ctx.jobs.periodic.due(now) {
            let opts = InsertOpts {
                scheduled_at: occurrence.scheduled_at,
            };
            match ctx.jobs.queue.insert(occurrence.args, opts).await {
                Ok(_) => enqueued += 1,
                Err(e) => error!(
                    handle = %occurrence.handle,
                    reminder_id = %occurrence.args.reminder_id,
                    "Unable to enqueue periodic job occurrence: {:?}", e
                ),
            }
        }
        Ok(enqueued)
    }
}
