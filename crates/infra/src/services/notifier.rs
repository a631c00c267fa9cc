use reminder_sync_domain::{ContactMethod, Reminder};
use tracing::info;

/// Delivers a `Reminder` through a `ContactMethod`. Actual email and sms
/// delivery lives with an external provider behind this trait.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn notify(&self, reminder: &Reminder, contact_method: &ContactMethod)
        -> anyhow::Result<()>;
}

/// Notifier that only records the delivery in the logs
pub struct LogNotifier {}

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn notify(
        &self,
        reminder: &Reminder,
        contact_method: &ContactMethod,
    ) -> anyhow::Result<()> {
        info!(
            reminder_id = %reminder.id,
            channel = %contact_method.channel,
            to = %contact_method.value,
            "Delivering reminder: {}",
            reminder.body
        );
        Ok(())
    }
}
