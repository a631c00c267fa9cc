use crate::{
    error::ReminderSyncError,
    shared::usecase::{execute, UseCase},
};
use reminder_sync_api_structs::get_reminders::*;
use reminder_sync_domain::{Reminder, ID};
use reminder_sync_infra::{ReminderQuery, ReminderSyncContext};

pub async fn get_reminders_controller(
    ctx: &ReminderSyncContext,
    user_id: ID,
    query: QueryParams,
) -> Result<APIResponse, ReminderSyncError> {
    let usecase = GetRemindersUseCase {
        user_id,
        include_past: query.include_past,
    };

    execute(usecase, ctx)
        .await
        .map(APIResponse::new)
        .map_err(ReminderSyncError::from)
}

/// Lists the `Reminder`s of a `User` ordered by when they start.
/// Repeating `Reminder`s are ongoing and therefore never considered past.
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub user_id: ID,
    pub include_past: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ReminderSyncError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::StorageError => Self::Storage("Unable to load reminders".into()),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &ReminderSyncContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx.repos.users.find(&self.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(UseCaseError::UserNotFound(self.user_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let query = if self.include_past {
            ReminderQuery::all(user.id)
        } else {
            ReminderQuery::upcoming(user.id, ctx.sys.get_timestamp_millis())
        };

        ctx.repos
            .reminders
            .find_by_query(query)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
