mod contact_method;
mod reminder;
pub(crate) mod shared;
mod user;

use contact_method::{InMemoryContactMethodRepo, PostgresContactMethodRepo};
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::PgPool;
use std::sync::Arc;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use contact_method::IContactMethodRepo;
pub use reminder::IReminderRepo;
pub use user::IUserRepo;

pub use shared::query_structs::*;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub contact_methods: Arc<dyn IContactMethodRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            contact_methods: Arc::new(PostgresContactMethodRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            contact_methods: Arc::new(InMemoryContactMethodRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
        }
    }
}
