use crate::dtos::ReminderDTO;
use reminder_sync_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

/// Fields of a `Reminder` a caller decides on when creating or updating it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequestBody {
    pub body: String,
    pub start_ts: i64,
    #[serde(default)]
    pub is_repeating: bool,
    #[serde(default)]
    pub period_minutes: i64,
    pub contact_method_id: ID,
}

pub mod get_reminders {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub include_past: bool,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod create_reminder {
    use super::*;

    pub type RequestBody = ReminderRequestBody;

    pub type APIResponse = ReminderResponse;
}

pub mod update_reminder {
    use super::*;

    pub type RequestBody = ReminderRequestBody;

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;
    use reminder_sync_domain::JobTeardown;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
        pub job_teardown: JobTeardown,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder, job_teardown: JobTeardown) -> Self {
            Self {
                reminder: ReminderDTO::new(reminder),
                job_teardown,
            }
        }
    }
}
