use super::job_sync::{schedule_job, teardown_job};
use crate::{
    error::ReminderSyncError,
    shared::usecase::{execute, UseCase},
};
use reminder_sync_api_structs::create_reminder::*;
use reminder_sync_domain::{Reminder, ID};
use reminder_sync_infra::ReminderSyncContext;
use tracing::error;

pub async fn create_reminder_controller(
    ctx: &ReminderSyncContext,
    user_id: ID,
    body: RequestBody,
) -> Result<APIResponse, ReminderSyncError> {
    let usecase = CreateReminderUseCase {
        user_id,
        body: body.body,
        start_ts: body.start_ts,
        is_repeating: body.is_repeating,
        period_minutes: body.period_minutes,
        contact_method_id: body.contact_method_id,
    };

    execute(usecase, ctx)
        .await
        .map(APIResponse::new)
        .map_err(ReminderSyncError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub body: String,
    pub start_ts: i64,
    pub is_repeating: bool,
    pub period_minutes: i64,
    pub contact_method_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    ContactMethodNotFound(ID),
    InvalidPeriod,
    StorageError,
    SchedulerError(String),
}

impl From<UseCaseError> for ReminderSyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ContactMethodNotFound(_) => Self::NotFound("contact method not found".into()),
            UseCaseError::InvalidPeriod => {
                Self::Validation("period minutes must be greater than 0".into())
            }
            UseCaseError::StorageError => Self::Storage("Unable to store the reminder".into()),
            UseCaseError::SchedulerError(e) => Self::Scheduler(e),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &ReminderSyncContext) -> Result<Self::Response, Self::Error> {
        let contact_method = match ctx
            .repos
            .contact_methods
            .find_by_user(&self.user_id, &self.contact_method_id)
            .await
        {
            Ok(Some(contact_method)) => contact_method,
            Ok(None) => return Err(UseCaseError::ContactMethodNotFound(self.contact_method_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let mut reminder = Reminder {
            id: Default::default(),
            user_id: self.user_id,
            body: self.body.clone(),
            start_ts: self.start_ts,
            is_repeating: self.is_repeating,
            period_minutes: self.period_minutes,
            contact_method_id: contact_method.id,
            job: None,
        };
        if !reminder.is_valid() {
            return Err(UseCaseError::InvalidPeriod);
        }

        reminder.id = ctx
            .repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let job = match schedule_job(&reminder, ctx).await {
            Ok(job) => job,
            Err(e) => {
                // A reminder without a job would never fire
                if let Err(delete_err) = ctx.repos.reminders.delete(&reminder.id).await {
                    error!(
                        reminder_id = %reminder.id,
                        "Unable to remove unscheduled reminder: {:?}", delete_err
                    );
                }
                return Err(UseCaseError::SchedulerError(e.to_string()));
            }
        };

        reminder.job = Some(job);
        // Not saved when the row was deleted in the meantime
        if !matches!(ctx.repos.reminders.save(&reminder).await, Ok(true)) {
            teardown_job(Some(&job), ctx).await;
            if let Err(delete_err) = ctx.repos.reminders.delete(&reminder.id).await {
                error!(
                    reminder_id = %reminder.id,
                    "Unable to remove unscheduled reminder: {:?}", delete_err
                );
            }
            return Err(UseCaseError::StorageError);
        }

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::*;
    use reminder_sync_domain::{ContactChannel, ContactMethod, JobState, ReminderJob, User};
    use reminder_sync_infra::ReminderQuery;
    use std::sync::atomic::Ordering;

    fn usecase(t: &TestContext, is_repeating: bool, period_minutes: i64) -> CreateReminderUseCase {
        CreateReminderUseCase {
            user_id: t.user_id,
            body: "Doctor appointment".into(),
            start_ts: NOW + HOUR,
            is_repeating,
            period_minutes,
            contact_method_id: t.contact_method_id,
        }
    }

    async fn stored_reminders(t: &TestContext) -> Vec<Reminder> {
        t.ctx
            .repos
            .reminders
            .find_by_query(ReminderQuery::all(t.user_id))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn creates_one_shot_reminder_with_durable_job() {
        let t = setup().await;

        let reminder = usecase(&t, false, 0).execute(&t.ctx).await.unwrap();

        let job_id = match reminder.job {
            Some(ReminderJob::Durable(job_id)) => job_id,
            other => panic!("Expected durable job, got: {:?}", other),
        };
        let job = t.ctx.jobs.queue.find(&job_id).await.unwrap().unwrap();
        assert_eq!(job.scheduled_at, NOW + HOUR);
        assert_eq!(job.state, JobState::Available);
        assert_eq!(job.args.reminder_id, reminder.id);
        assert_eq!(t.ctx.jobs.periodic.len(), 0);

        assert_eq!(stored_reminders(&t).await, vec![reminder]);
    }

    #[tokio::test]
    async fn creates_repeating_reminder_with_periodic_job() {
        let t = setup().await;

        let reminder = usecase(&t, true, 60).execute(&t.ctx).await.unwrap();

        let handle = match reminder.job {
            Some(ReminderJob::Periodic(handle)) => handle,
            other => panic!("Expected periodic job, got: {:?}", other),
        };
        assert!(t.ctx.jobs.periodic.contains(&handle));

        assert!(t.ctx.jobs.periodic.due(NOW).is_empty());
        let first = t.ctx.jobs.periodic.due(NOW + HOUR);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].args.reminder_id, reminder.id);
        assert!(t.ctx.jobs.periodic.due(NOW + 2 * HOUR - 1).is_empty());
        let second = t.ctx.jobs.periodic.due(NOW + 2 * HOUR);
        assert_eq!(second[0].args.reminder_id, reminder.id);

        assert_eq!(stored_reminders(&t).await, vec![reminder]);
    }

    #[tokio::test]
    async fn rejects_contact_method_of_other_user() {
        let t = setup().await;
        let other_user = t.ctx.repos.users.insert(&User::new("user_2")).await.unwrap();
        let foreign_contact = t
            .ctx
            .repos
            .contact_methods
            .insert(&ContactMethod::new(other_user, ContactChannel::Sms, "+4799999999"))
            .await
            .unwrap();

        let mut usecase = usecase(&t, false, 0);
        usecase.contact_method_id = foreign_contact;
        let res = usecase.execute(&t.ctx).await;

        assert_eq!(
            res.unwrap_err(),
            UseCaseError::ContactMethodNotFound(foreign_contact)
        );
        assert!(stored_reminders(&t).await.is_empty());
    }

    #[tokio::test]
    async fn rejects_repeating_reminder_without_period() {
        let t = setup().await;

        for period_minutes in &[0, -10, i64::MAX / 1000] {
            let res = usecase(&t, true, *period_minutes).execute(&t.ctx).await;
            assert_eq!(res.unwrap_err(), UseCaseError::InvalidPeriod);
        }
        assert!(stored_reminders(&t).await.is_empty());
        assert_eq!(t.ctx.jobs.periodic.len(), 0);
    }

    #[tokio::test]
    async fn removes_reminder_when_job_insert_fails() {
        let mut t = setup().await;
        let queue = FlakyQueue::install(&mut t);
        queue.fail_insert.store(true, Ordering::SeqCst);

        let res = usecase(&t, false, 0).execute(&t.ctx).await;

        assert!(matches!(res, Err(UseCaseError::SchedulerError(_))));
        assert!(stored_reminders(&t).await.is_empty());
    }

    #[tokio::test]
    async fn tears_down_job_and_removes_reminder_when_save_fails() {
        let mut t = setup().await;
        let repo = FlakyReminderRepo::install(&mut t);
        repo.fail_save.store(true, Ordering::SeqCst);

        let res = usecase(&t, false, 0).execute(&t.ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::StorageError);
        // The durable job inserted for the reminder was the first one
        assert!(t.ctx.jobs.queue.find(&ID::new(1)).await.unwrap().is_none());

        let res = usecase(&t, true, 60).execute(&t.ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::StorageError);
        assert_eq!(t.ctx.jobs.periodic.len(), 0);

        assert!(stored_reminders(&t).await.is_empty());
    }

    #[tokio::test]
    async fn tears_down_job_when_reminder_is_deleted_before_save() {
        let mut t = setup().await;
        let repo = FlakyReminderRepo::install(&mut t);
        repo.delete_before_save.store(true, Ordering::SeqCst);

        let res = usecase(&t, true, 60).execute(&t.ctx).await;

        assert_eq!(res.unwrap_err(), UseCaseError::StorageError);
        assert_eq!(t.ctx.jobs.periodic.len(), 0);
        assert!(stored_reminders(&t).await.is_empty());
    }

    #[tokio::test]
    async fn controller_maps_errors() {
        let t = setup().await;
        let body = RequestBody {
            body: "Standup".into(),
            start_ts: NOW + HOUR,
            is_repeating: false,
            period_minutes: 0,
            contact_method_id: ID::new(999),
        };
        let err = create_reminder_controller(&t.ctx, t.user_id, body)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ReminderSyncError::NotFound("contact method not found".into())
        );

        let body = RequestBody {
            body: "Standup".into(),
            start_ts: NOW + HOUR,
            is_repeating: false,
            period_minutes: 0,
            contact_method_id: t.contact_method_id,
        };
        let res = create_reminder_controller(&t.ctx, t.user_id, body)
            .await
            .unwrap();
        assert_eq!(res.reminder.user_id, t.user_id);
        assert_eq!(res.reminder.body, "Standup");
    }
}
