mod telemetry;

use reminder_sync_api::Application;
use reminder_sync_infra::{run_migration, setup_context};
use std::io::{Error, ErrorKind};
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("reminder_sync".into(), "info".into());
    init_subscriber(subscriber);

    run_migration()
        .await
        .map_err(|e| Error::new(ErrorKind::Other, e))?;
    info!("Migrations are up to date");

    let context = setup_context().await;
    info!(env = %context.config.env, "Starting reminder sync");

    let app = Application::new(context)
        .await
        .map_err(|e| Error::new(ErrorKind::Other, e))?;
    app.start().await
}
