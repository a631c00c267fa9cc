use reminder_sync_domain::{ContactChannel, ContactMethod, Reminder, User, ID};
use reminder_sync_infra::{INotifier, ReminderSyncContext, StaticTimeSys};
use std::sync::{Arc, Mutex};

pub const NOW: i64 = 1_650_000_000_000;
pub const MINUTE: i64 = 60 * 1000;

/// Notifier that keeps every delivery so tests can assert on them
#[derive(Default)]
pub struct RecordingNotifier {
    pub deliveries: Mutex<Vec<(ID, String)>>,
}

impl RecordingNotifier {
    pub fn delivered(&self) -> Vec<(ID, String)> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl INotifier for RecordingNotifier {
    async fn notify(
        &self,
        reminder: &Reminder,
        contact_method: &ContactMethod,
    ) -> anyhow::Result<()> {
        self.deliveries
            .lock()
            .unwrap()
            .push((reminder.id, contact_method.value.clone()));
        Ok(())
    }
}

pub struct TestApp {
    pub ctx: ReminderSyncContext,
    pub sys: Arc<StaticTimeSys>,
    pub notifier: Arc<RecordingNotifier>,
    pub user_id: ID,
    pub email_id: ID,
    pub sms_id: ID,
}

pub async fn spawn_app() -> TestApp {
    let sys = Arc::new(StaticTimeSys::new(NOW));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut ctx = ReminderSyncContext::create_inmemory_with_sys(sys.clone());
    ctx.notifier = notifier.clone();

    let user_id = ctx.repos.users.insert(&User::new("alice")).await.unwrap();
    let email_id = ctx
        .repos
        .contact_methods
        .insert(&ContactMethod::new(
            user_id,
            ContactChannel::Email,
            "alice@example.com",
        ))
        .await
        .unwrap();
    let sms_id = ctx
        .repos
        .contact_methods
        .insert(&ContactMethod::new(user_id, ContactChannel::Sms, "+4790000000"))
        .await
        .unwrap();

    TestApp {
        ctx,
        sys,
        notifier,
        user_id,
        email_id,
        sms_id,
    }
}
