use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo::*, query_structs::ReminderQuery};
use reminder_sync_domain::{Reminder, ID};
use std::sync::{atomic::AtomicI64, Mutex};

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
    sequence: AtomicI64,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(vec![]),
            sequence: AtomicI64::new(0),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<ID> {
        let mut reminder = reminder.clone();
        reminder.id = next_id(&self.sequence);
        insert(&reminder, &self.reminders);
        Ok(reminder.id)
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        Ok(save(reminder, &self.reminders))
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_by_query(&self, query: ReminderQuery) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| {
            r.user_id == query.user_id
                && query
                    .upcoming_after
                    .map(|now| r.is_upcoming(now))
                    .unwrap_or(true)
        });
        reminders.sort_by_key(|r| (r.start_ts, r.id));
        Ok(reminders)
    }

    async fn find_repeating(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.is_repeating))
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(delete(reminder_id, &self.reminders))
    }
}
