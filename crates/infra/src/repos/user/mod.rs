mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use reminder_sync_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    /// Stores the `User` and returns the id assigned to it
    async fn insert(&self, user: &User) -> anyhow::Result<ID>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    async fn find_by_external_id(&self, external_id: &str) -> anyhow::Result<Option<User>>;
    async fn delete(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
}

#[cfg(test)]
mod tests {
    use crate::ReminderSyncContext;
    use reminder_sync_domain::User;

    #[tokio::test]
    async fn crud() {
        let ctx = ReminderSyncContext::create_inmemory();

        let mut user = User::new("user_2abc");
        user.id = ctx.repos.users.insert(&user).await.unwrap();
        assert!(user.id.is_assigned());

        let other = User::new("user_3def");
        let other_id = ctx.repos.users.insert(&other).await.unwrap();
        assert_ne!(user.id, other_id);

        assert_eq!(ctx.repos.users.find(&user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(
            ctx.repos
                .users
                .find_by_external_id("user_2abc")
                .await
                .unwrap()
                .map(|u| u.id),
            Some(user.id)
        );

        assert!(ctx.repos.users.delete(&user.id).await.unwrap().is_some());
        assert!(ctx.repos.users.find(&user.id).await.unwrap().is_none());
        assert!(ctx.repos.users.delete(&user.id).await.unwrap().is_none());
    }
}
