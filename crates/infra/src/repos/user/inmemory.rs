use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use reminder_sync_domain::{User, ID};
use std::sync::{atomic::AtomicI64, Mutex};

pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
    sequence: AtomicI64,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(vec![]),
            sequence: AtomicI64::new(0),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<ID> {
        let mut user = user.clone();
        user.id = next_id(&self.sequence);
        insert(&user, &self.users);
        Ok(user.id)
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        Ok(find(user_id, &self.users))
    }

    async fn find_by_external_id(&self, external_id: &str) -> anyhow::Result<Option<User>> {
        Ok(find_by(&self.users, |u| u.external_id == external_id)
            .into_iter()
            .next())
    }

    async fn delete(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        Ok(delete(user_id, &self.users))
    }
}
