use reminder_sync_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub body: String,
    pub start_ts: i64,
    pub is_repeating: bool,
    pub period_minutes: i64,
    pub contact_method_id: ID,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            body: reminder.body,
            start_ts: reminder.start_ts,
            is_repeating: reminder.is_repeating,
            period_minutes: reminder.period_minutes,
            contact_method_id: reminder.contact_method_id,
        }
    }
}
