use super::IContactMethodRepo;
use crate::repos::shared::inmemory_repo::*;
use reminder_sync_domain::{ContactMethod, ID};
use std::sync::{atomic::AtomicI64, Mutex};

pub struct InMemoryContactMethodRepo {
    contact_methods: Mutex<Vec<ContactMethod>>,
    sequence: AtomicI64,
}

impl InMemoryContactMethodRepo {
    pub fn new() -> Self {
        Self {
            contact_methods: Mutex::new(vec![]),
            sequence: AtomicI64::new(0),
        }
    }
}

#[async_trait::async_trait]
impl IContactMethodRepo for InMemoryContactMethodRepo {
    async fn insert(&self, contact_method: &ContactMethod) -> anyhow::Result<ID> {
        let mut contact_method = contact_method.clone();
        contact_method.id = next_id(&self.sequence);
        insert(&contact_method, &self.contact_methods);
        Ok(contact_method.id)
    }

    async fn find(&self, contact_method_id: &ID) -> anyhow::Result<Option<ContactMethod>> {
        Ok(find(contact_method_id, &self.contact_methods))
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        contact_method_id: &ID,
    ) -> anyhow::Result<Option<ContactMethod>> {
        Ok(find(contact_method_id, &self.contact_methods).filter(|c| c.belongs_to(user_id)))
    }

    async fn delete(&self, contact_method_id: &ID) -> anyhow::Result<Option<ContactMethod>> {
        Ok(delete(contact_method_id, &self.contact_methods))
    }
}
