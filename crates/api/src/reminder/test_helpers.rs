use reminder_sync_domain::{
    ContactChannel, ContactMethod, DurableJob, InsertOpts, Reminder, ReminderJobArgs, User, ID,
};
use reminder_sync_infra::{
    IDurableJobQueue, IReminderRepo, InMemoryDurableJobQueue, ReminderQuery, ReminderSyncContext,
    StaticTimeSys,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub const NOW: i64 = 1_700_000_000_000;
pub const HOUR: i64 = 1000 * 60 * 60;

pub struct TestContext {
    pub ctx: ReminderSyncContext,
    pub sys: Arc<StaticTimeSys>,
    pub user_id: ID,
    pub contact_method_id: ID,
}

pub async fn setup() -> TestContext {
    let sys = Arc::new(StaticTimeSys::new(NOW));
    let ctx = ReminderSyncContext::create_inmemory_with_sys(sys.clone());
    let user_id = ctx.repos.users.insert(&User::new("user_1")).await.unwrap();
    let contact_method_id = ctx
        .repos
        .contact_methods
        .insert(&ContactMethod::new(
            user_id,
            ContactChannel::Email,
            "user_1@example.com",
        ))
        .await
        .unwrap();

    TestContext {
        ctx,
        sys,
        user_id,
        contact_method_id,
    }
}

/// Durable queue whose operations can be made to fail
pub struct FlakyQueue {
    pub inner: InMemoryDurableJobQueue,
    pub fail_insert: AtomicBool,
    pub fail_cancel: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FlakyQueue {
    /// Swaps the durable queue of the context with a `FlakyQueue`
    pub fn install(t: &mut TestContext) -> Arc<FlakyQueue> {
        let queue = Arc::new(FlakyQueue {
            inner: InMemoryDurableJobQueue::new(t.sys.clone()),
            fail_insert: AtomicBool::new(false),
            fail_cancel: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        });
        t.ctx.jobs.queue = queue.clone();
        queue
    }

    fn check(flag: &AtomicBool, operation: &str) -> anyhow::Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("{} is unavailable", operation));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl IDurableJobQueue for FlakyQueue {
    async fn insert(&self, args: ReminderJobArgs, opts: InsertOpts) -> anyhow::Result<DurableJob> {
        Self::check(&self.fail_insert, "insert")?;
        self.inner.insert(args, opts).await
    }

    async fn cancel(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>> {
        Self::check(&self.fail_cancel, "cancel")?;
        self.inner.cancel(job_id).await
    }

    async fn delete(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>> {
        Self::check(&self.fail_delete, "delete")?;
        self.inner.delete(job_id).await
    }

    async fn find(&self, job_id: &ID) -> anyhow::Result<Option<DurableJob>> {
        self.inner.find(job_id).await
    }

    async fn fetch_due(&self, limit: usize) -> anyhow::Result<Vec<DurableJob>> {
        self.inner.fetch_due(limit).await
    }

    async fn complete(&self, job_id: &ID) -> anyhow::Result<()> {
        self.inner.complete(job_id).await
    }

    async fn discard(&self, job_id: &ID, error: &str) -> anyhow::Result<()> {
        self.inner.discard(job_id, error).await
    }
}

/// Reminder repo whose saves can be made to fail, or to race with a delete
pub struct FlakyReminderRepo {
    pub inner: Arc<dyn IReminderRepo>,
    pub fail_save: AtomicBool,
    /// Deletes the row right before saving it, like a concurrent delete would
    pub delete_before_save: AtomicBool,
}

impl FlakyReminderRepo {
    /// Wraps the reminder repo of the context in a `FlakyReminderRepo`
    pub fn install(t: &mut TestContext) -> Arc<FlakyReminderRepo> {
        let repo = Arc::new(FlakyReminderRepo {
            inner: t.ctx.repos.reminders.clone(),
            fail_save: AtomicBool::new(false),
            delete_before_save: AtomicBool::new(false),
        });
        t.ctx.repos.reminders = repo.clone();
        repo
    }
}

#[async_trait::async_trait]
impl IReminderRepo for FlakyReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<ID> {
        self.inner.insert(reminder).await
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        FlakyQueue::check(&self.fail_save, "save")?;
        if self.delete_before_save.load(Ordering::SeqCst) {
            self.inner.delete(&reminder.id).await?;
        }
        self.inner.save(reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.find(reminder_id).await
    }

    async fn find_by_query(&self, query: ReminderQuery) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_by_query(query).await
    }

    async fn find_repeating(&self) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_repeating().await
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.delete(reminder_id).await
    }
}
