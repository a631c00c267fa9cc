mod inmemory;
mod postgres;

pub use inmemory::InMemoryContactMethodRepo;
pub use postgres::PostgresContactMethodRepo;
use reminder_sync_domain::{ContactMethod, ID};

#[async_trait::async_trait]
pub trait IContactMethodRepo: Send + Sync {
    async fn insert(&self, contact_method: &ContactMethod) -> anyhow::Result<ID>;
    async fn find(&self, contact_method_id: &ID) -> anyhow::Result<Option<ContactMethod>>;
    /// Only finds the `ContactMethod` if it is owned by the given `User`
    async fn find_by_user(
        &self,
        user_id: &ID,
        contact_method_id: &ID,
    ) -> anyhow::Result<Option<ContactMethod>>;
    async fn delete(&self, contact_method_id: &ID) -> anyhow::Result<Option<ContactMethod>>;
}
