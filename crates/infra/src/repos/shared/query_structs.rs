use reminder_sync_domain::ID;

/// Query for the `Reminder`s of a single `User`, ordered by `start_ts` ascending
#[derive(Debug, Clone)]
pub struct ReminderQuery {
    pub user_id: ID,
    /// When set, non repeating `Reminder`s starting at or before this
    /// timestamp are left out. Repeating `Reminder`s are always included.
    pub upcoming_after: Option<i64>,
}

impl ReminderQuery {
    pub fn all(user_id: ID) -> Self {
        Self {
            user_id,
            upcoming_after: None,
        }
    }

    pub fn upcoming(user_id: ID, now: i64) -> Self {
        Self {
            user_id,
            upcoming_after: Some(now),
        }
    }
}
