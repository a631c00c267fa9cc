use crate::shared::usecase::UseCase;
use reminder_sync_domain::DurableJob;
use reminder_sync_infra::ReminderSyncContext;
use tracing::{info, warn};

/// Runs a durable job that has been claimed by a worker: the `User` is
/// notified through the `ContactMethod` of the `Reminder` and the job is
/// finalized. Failed notifications are discarded and never retried.
#[derive(Debug)]
pub struct SendReminderUseCase {
    pub job: DurableJob,
}

#[derive(Debug, PartialEq)]
pub enum SendReminderOutcome {
    Sent,
    /// The `Reminder` or its `ContactMethod` was removed after the job was scheduled
    Skipped,
    Discarded(String),
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl SendReminderUseCase {
    async fn finalize(
        &self,
        outcome: SendReminderOutcome,
        ctx: &ReminderSyncContext,
    ) -> Result<SendReminderOutcome, UseCaseError> {
        let res = match &outcome {
            SendReminderOutcome::Discarded(e) => ctx.jobs.queue.discard(&self.job.id, e).await,
            _ => ctx.jobs.queue.complete(&self.job.id).await,
        };
        res.map_err(|_| UseCaseError::StorageError)?;
        Ok(outcome)
    }
}

#[async_trait::async_trait]
impl UseCase for SendReminderUseCase {
    type Response = SendReminderOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminder";

    async fn execute(&mut self, ctx: &ReminderSyncContext) -> Result<Self::Response, Self::Error> {
        let reminder_id = self.job.args.reminder_id;
        let reminder = match ctx.repos.reminders.find(&reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => {
                warn!(job_id = %self.job.id, reminder_id = %reminder_id, "Job for a reminder that no longer exists");
                return self.finalize(SendReminderOutcome::Skipped, ctx).await;
            }
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let contact_method = match ctx
            .repos
            .contact_methods
            .find_by_user(&reminder.user_id, &reminder.contact_method_id)
            .await
        {
            Ok(Some(contact_method)) => contact_method,
            Ok(None) => {
                warn!(
                    job_id = %self.job.id,
                    reminder_id = %reminder_id,
                    "Contact method of reminder no longer exists"
                );
                return self.finalize(SendReminderOutcome::Skipped, ctx).await;
            }
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let outcome = match ctx.notifier.notify(&reminder, &contact_method).await {
            Ok(()) => {
                info!(job_id = %self.job.id, reminder_id = %reminder_id, "Reminder sent");
                SendReminderOutcome::Sent
            }
            Err(e) => {
                warn!(job_id = %self.job.id, reminder_id = %reminder_id, "Unable to send reminder: {:?}", e);
                SendReminderOutcome::Discarded(e.to_string())
            }
        };
        self.finalize(outcome, ctx).await
    }
}
