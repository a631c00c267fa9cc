use super::job_sync::{cancel_job, schedule_job, teardown_job};
use crate::{
    error::ReminderSyncError,
    shared::usecase::{execute, UseCase},
};
use reminder_sync_api_structs::update_reminder::*;
use reminder_sync_domain::{Reminder, ID};
use reminder_sync_infra::ReminderSyncContext;
use tracing::{error, warn};

pub async fn update_reminder_controller(
    ctx: &ReminderSyncContext,
    reminder_id: ID,
    body: RequestBody,
) -> Result<APIResponse, ReminderSyncError> {
    let usecase = UpdateReminderUseCase {
        reminder_id,
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

/// Replaces the fields of a `Reminder` together with its scheduler entity.
///
/// The new job is created before the old one is cancelled, so a failure
/// in either scheduler call leaves the stored `Reminder` and its current
/// job untouched.
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub body: String,
    pub start_ts: i64,
    pub is_repeating: bool,
    pub period_minutes: i64,
    pub contact_method_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    ContactMethodNotFound(ID),
    InvalidPeriod,
    StorageError,
    SchedulerError(String),
}

impl From<UseCaseError> for ReminderSyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::ContactMethodNotFound(_) => Self::NotFound("contact method not found".into()),
            UseCaseError::InvalidPeriod => {
                Self::Validation("period minutes must be greater than 0".into())
            }
            UseCaseError::StorageError => Self::Storage("Unable to store the reminder".into()),
            UseCaseError::SchedulerError(e) => Self::Scheduler(e),
        }
    }
}

impl UpdateReminderUseCase {
    fn apply(&self, reminder: &Reminder) -> Reminder {
        Reminder {
            body: self.body.clone(),
            start_ts: self.start_ts,
            is_repeating: self.is_repeating,
            period_minutes: self.period_minutes,
            contact_method_id: self.contact_method_id,
            ..reminder.clone()
        }
    }
}

#[async_trait::async_trait]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &ReminderSyncContext) -> Result<Self::Response, Self::Error> {
        if !Reminder::is_valid_period(self.is_repeating, self.period_minutes) {
            return Err(UseCaseError::InvalidPeriod);
        }

        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        match ctx
            .repos
            .contact_methods
            .find_by_user(&reminder.user_id, &self.contact_method_id)
            .await
        {
            Ok(Some(_)) => (),
            Ok(None) => return Err(UseCaseError::ContactMethodNotFound(self.contact_method_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let mut updated = self.apply(&reminder);
        let new_job = schedule_job(&updated, ctx)
            .await
            .map_err(|e| UseCaseError::SchedulerError(e.to_string()))?;

        if let Some(old_job) = &reminder.job {
            if let Err(e) = cancel_job(old_job, ctx).await {
                teardown_job(Some(&new_job), ctx).await;
                return Err(UseCaseError::SchedulerError(e.to_string()));
            }
        } else {
            warn!(reminder_id = %reminder.id, "Updating reminder that had no job");
        }

        updated.job = Some(new_job);
        match ctx.repos.reminders.save(&updated).await {
            Ok(true) => Ok(updated),
            Ok(false) => {
                warn!(reminder_id = %reminder.id, "Reminder was deleted while it was being updated");
                teardown_job(Some(&new_job), ctx).await;
                Err(UseCaseError::NotFound(self.reminder_id))
            }
            Err(_) => {
                error!(
                    reminder_id = %reminder.id,
                    old_job = ?reminder.job,
                    "Unable to save updated reminder after its old job was cancelled"
                );
                teardown_job(Some(&new_job), ctx).await;
                Err(UseCaseError::StorageError)
            }
        }
    }
}
