mod durable;
mod periodic;

use crate::system::ISys;
pub use durable::{IDurableJobQueue, InMemoryDurableJobQueue, PostgresDurableJobQueue};
pub use periodic::{IPeriodicJobRegistry, PeriodicJobRegistry, PeriodicOccurrence};
use sqlx::PgPool;
use std::sync::Arc;

/// The two registries a `Reminder` can be scheduled in
#[derive(Clone)]
pub struct JobScheduler {
    pub queue: Arc<dyn IDurableJobQueue>,
    pub periodic: Arc<dyn IPeriodicJobRegistry>,
}

impl JobScheduler {
    pub fn create_postgres(pool: PgPool, sys: Arc<dyn ISys>) -> Self {
        Self {
            queue: Arc::new(PostgresDurableJobQueue::new(pool, sys)),
            periodic: Arc::new(PeriodicJobRegistry::new()),
        }
    }

    pub fn create_inmemory(sys: Arc<dyn ISys>) -> Self {
        Self {
            queue: Arc::new(InMemoryDurableJobQueue::new(sys)),
            periodic: Arc::new(PeriodicJobRegistry::new()),
        }
    }
}
