mod config;
mod jobs;
mod repos;
mod services;
mod system;

pub use config::{Config, Environment};
pub use jobs::{
    IDurableJobQueue, IPeriodicJobRegistry, InMemoryDurableJobQueue, JobScheduler,
    PeriodicJobRegistry, PeriodicOccurrence,
};
pub use repos::{IContactMethodRepo, IReminderRepo, IUserRepo, ReminderQuery, Repos};
pub use services::{INotifier, LogNotifier};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct ReminderSyncContext {
    pub repos: Repos,
    pub jobs: JobScheduler,
    pub notifier: Arc<dyn INotifier>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl ReminderSyncContext {
    async fn create(params: ContextParams) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        Self {
            repos: Repos::create_postgres(pool.clone()),
            jobs: JobScheduler::create_postgres(pool, sys.clone()),
            notifier: Arc::new(LogNotifier {}),
            config: Config::new(),
            sys,
        }
    }

    pub fn create_inmemory() -> Self {
        Self::create_inmemory_with_sys(Arc::new(RealSys {}))
    }

    /// Inmemory context driven by the given clock, used for testing
    pub fn create_inmemory_with_sys(sys: Arc<dyn ISys>) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            jobs: JobScheduler::create_inmemory(sys.clone()),
            notifier: Arc::new(LogNotifier {}),
            config: Config::new(),
            sys,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> ReminderSyncContext {
    ReminderSyncContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
