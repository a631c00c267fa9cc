mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::ReminderQuery;
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use reminder_sync_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Stores the `Reminder` and returns the id assigned to it
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<ID>;
    /// Returns false when there is no stored `Reminder` to update
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn find_by_query(&self, query: ReminderQuery) -> anyhow::Result<Vec<Reminder>>;
    /// All repeating `Reminder`s across every `User`
    async fn find_repeating(&self) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
}

#[cfg(test)]
mod tests {
    use crate::{ReminderQuery, ReminderSyncContext};
    use reminder_sync_domain::{
        ContactChannel, ContactMethod, PeriodicJobHandle, Reminder, ReminderJob, User, ID,
    };

    struct TestContext {
        ctx: ReminderSyncContext,
        user_id: ID,
        contact_method_id: ID,
    }

    async fn setup() -> TestContext {
        let ctx = ReminderSyncContext::create_inmemory();
        let user_id = ctx.repos.users.insert(&User::new("user")).await.unwrap();
        let contact_method_id = ctx
            .repos
            .contact_methods
            .insert(&ContactMethod::new(
                user_id,
                ContactChannel::Sms,
                "+4712345678",
            ))
            .await
            .unwrap();
        TestContext {
            ctx,
            user_id,
            contact_method_id,
        }
    }

    fn reminder(user_id: ID, contact_method_id: ID, start_ts: i64, is_repeating: bool) -> Reminder {
        Reminder {
            id: Default::default(),
            user_id,
            body: format!("starts at {}", start_ts),
            start_ts,
            is_repeating,
            period_minutes: if is_repeating { 30 } else { 0 },
            contact_method_id,
            job: None,
        }
    }

    #[tokio::test]
    async fn crud() {
        let TestContext {
            ctx,
            user_id,
            contact_method_id,
        } = setup().await;

        let mut r = reminder(user_id, contact_method_id, 1000, false);
        r.id = ctx.repos.reminders.insert(&r).await.unwrap();
        assert_eq!(ctx.repos.reminders.find(&r.id).await.unwrap(), Some(r.clone()));

        r.job = Some(ReminderJob::Periodic(PeriodicJobHandle(4)));
        r.is_repeating = true;
        r.period_minutes = 15;
        assert!(ctx.repos.reminders.save(&r).await.unwrap());
        assert_eq!(ctx.repos.reminders.find(&r.id).await.unwrap(), Some(r.clone()));

        assert_eq!(ctx.repos.reminders.delete(&r.id).await.unwrap(), Some(r.clone()));
        assert!(ctx.repos.reminders.find(&r.id).await.unwrap().is_none());

        // Saving a deleted reminder does not bring it back
        assert!(!ctx.repos.reminders.save(&r).await.unwrap());
        assert!(ctx.repos.reminders.find(&r.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_orders_equal_starts_by_id() {
        let TestContext {
            ctx,
            user_id,
            contact_method_id,
        } = setup().await;

        let mut ids = Vec::new();
        for is_repeating in &[true, false, true] {
            let r = reminder(user_id, contact_method_id, 2000, *is_repeating);
            ids.push(ctx.repos.reminders.insert(&r).await.unwrap());
        }

        let all = ctx
            .repos
            .reminders
            .find_by_query(ReminderQuery::all(user_id))
            .await
            .unwrap();
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), ids);
    }

    #[tokio::test]
    async fn query_orders_by_start_and_filters_past_one_shots() {
        let TestContext {
            ctx,
            user_id,
            contact_method_id,
        } = setup().await;
        let other_user = ctx.repos.users.insert(&User::new("other")).await.unwrap();

        for (start_ts, is_repeating) in &[(5000, false), (100, true), (3000, false), (200, false)] {
            let r = reminder(user_id, contact_method_id, *start_ts, *is_repeating);
            ctx.repos.reminders.insert(&r).await.unwrap();
        }
        let foreign = reminder(other_user, contact_method_id, 4000, false);
        ctx.repos.reminders.insert(&foreign).await.unwrap();

        let all = ctx
            .repos
            .reminders
            .find_by_query(ReminderQuery::all(user_id))
            .await
            .unwrap();
        assert_eq!(
            all.iter().map(|r| r.start_ts).collect::<Vec<_>>(),
            vec![100, 200, 3000, 5000]
        );

        let upcoming = ctx
            .repos
            .reminders
            .find_by_query(ReminderQuery::upcoming(user_id, 3000))
            .await
            .unwrap();
        assert_eq!(
            upcoming.iter().map(|r| r.start_ts).collect::<Vec<_>>(),
            vec![100, 5000]
        );

        let repeating = ctx.repos.reminders.find_repeating().await.unwrap();
        assert_eq!(repeating.len(), 1);
        assert_eq!(repeating[0].start_ts, 100);
    }
}
