use super::job_sync::teardown_job;
use crate::{
    error::ReminderSyncError,
    shared::usecase::{execute, UseCase},
};
use reminder_sync_api_structs::delete_reminder::*;
use reminder_sync_domain::{JobTeardown, Reminder, ID};
use reminder_sync_infra::ReminderSyncContext;

pub async fn delete_reminder_controller(
    ctx: &ReminderSyncContext,
    reminder_id: ID,
) -> Result<APIResponse, ReminderSyncError> {
    let usecase = DeleteReminderUseCase { reminder_id };

    execute(usecase, ctx)
        .await
        .map(|res| APIResponse::new(res.reminder, res.job_teardown))
        .map_err(ReminderSyncError::from)
}

/// Removes a `Reminder` and the scheduler entity backing it. The
/// `Reminder` is deleted even if its job could not be torn down.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub struct DeletedReminder {
    pub reminder: Reminder,
    pub job_teardown: JobTeardown,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ReminderSyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::Storage("Unable to delete the reminder".into()),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for DeleteReminderUseCase {
    type Response = DeletedReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &ReminderSyncContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let job_teardown = teardown_job(reminder.job.as_ref(), ctx).await;

        match ctx.repos.reminders.delete(&reminder.id).await {
            Ok(Some(reminder)) => Ok(DeletedReminder {
                reminder,
                job_teardown,
            }),
            // Deleted by someone else in the meantime
            Ok(None) => Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::{create_reminder::CreateReminderUseCase, test_helpers::*};
    use reminder_sync_domain::ReminderJob;
    use std::sync::atomic::Ordering;

    async fn create(t: &TestContext, is_repeating: bool) -> Reminder {
        let mut usecase = CreateReminderUseCase {
            user_id: t.user_id,
            body: "Take out the trash".into(),
            start_ts: NOW + HOUR,
            is_repeating,
            period_minutes: if is_repeating { 60 * 24 * 7 } else { 0 },
            contact_method_id: t.contact_method_id,
        };
        usecase.execute(&t.ctx).await.unwrap()
    }

    #[tokio::test]
    async fn deletes_reminder_and_durable_job() {
        let t = setup().await;
        let reminder = create(&t, false).await;
        let job_id = match reminder.job {
            Some(ReminderJob::Durable(job_id)) => job_id,
            other => panic!("Expected durable job, got: {:?}", other),
        };

        let mut usecase = DeleteReminderUseCase {
            reminder_id: reminder.id,
        };
        let res = usecase.execute(&t.ctx).await.unwrap();

        assert_eq!(res.reminder, reminder);
        assert_eq!(res.job_teardown, JobTeardown::Removed);
        assert!(t.ctx.jobs.queue.find(&job_id).await.unwrap().is_none());
        assert!(t.ctx.repos.reminders.find(&reminder.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deletes_reminder_and_periodic_job() {
        let t = setup().await;
        let reminder = create(&t, true).await;

        let mut usecase = DeleteReminderUseCase {
            reminder_id: reminder.id,
        };
        let res = usecase.execute(&t.ctx).await.unwrap();

        assert_eq!(res.job_teardown, JobTeardown::Removed);
        assert_eq!(t.ctx.jobs.periodic.len(), 0);
        assert!(t.ctx.repos.reminders.find(&reminder.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reports_missing_periodic_job_after_restart() {
        let t = setup().await;
        let reminder = create(&t, true).await;
        if let Some(ReminderJob::Periodic(handle)) = reminder.job {
            // Handles do not survive the process that issued them
            t.ctx.jobs.periodic.remove(&handle);
        }

        let mut usecase = DeleteReminderUseCase {
            reminder_id: reminder.id,
        };
        let res = usecase.execute(&t.ctx).await.unwrap();

        assert_eq!(res.job_teardown, JobTeardown::Missing);
        assert!(t.ctx.repos.reminders.find(&reminder.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deletes_reminder_even_when_teardown_fails() {
        let mut t = setup().await;
        let queue = FlakyQueue::install(&mut t);
        let reminder = create(&t, false).await;
        queue.fail_delete.store(true, Ordering::SeqCst);

        let res = delete_reminder_controller(&t.ctx, reminder.id).await.unwrap();

        assert!(res.job_teardown.is_failed());
        assert_eq!(res.reminder.id, reminder.id);
        assert!(t.ctx.repos.reminders.find(&reminder.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_unknown_reminder() {
        let t = setup().await;

        let err = delete_reminder_controller(&t.ctx, ID::new(12))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ReminderSyncError::NotFound("The reminder with id: 12, was not found.".into())
        );
    }
}
