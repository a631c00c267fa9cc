use crate::{
    job::{InsertOpts, PeriodicJob, PeriodicJobHandle, ReminderJobArgs},
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The scheduler entity currently backing a `Reminder`.
///
/// Durable job ids and periodic handles live in different registries and
/// their numeric values may collide, so the kind always travels with the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderJob {
    Durable(ID),
    Periodic(PeriodicJobHandle),
}

impl ReminderJob {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Durable(_) => "durable",
            Self::Periodic(_) => "periodic",
        }
    }

    pub fn raw_id(&self) -> i64 {
        match self {
            Self::Durable(id) => id.inner(),
            Self::Periodic(handle) => handle.0,
        }
    }

    /// Rebuilds the job from its stored `kind` and `id` columns
    pub fn from_parts(kind: &str, id: i64) -> anyhow::Result<Self> {
        match kind {
            "durable" => Ok(Self::Durable(ID::new(id))),
            "periodic" => Ok(Self::Periodic(PeriodicJobHandle(id))),
            _ => Err(anyhow::anyhow!("Unknown reminder job kind: {}", kind)),
        }
    }
}

/// Outcome of tearing down the scheduler entity of a deleted `Reminder`.
/// Teardown never blocks the deletion, so failures are reported here instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "camelCase")]
pub enum JobTeardown {
    Removed,
    /// The scheduler had no entity for the `Reminder`, e.g. a periodic
    /// handle issued by a process that has since exited
    Missing,
    Failed(String),
}

impl JobTeardown {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

fn period_minutes_to_millis(period_minutes: i64) -> Option<i64> {
    period_minutes.checked_mul(60 * 1000)
}

/// A `Reminder` describes what a `User` should be notified about, when,
/// how often and through which `ContactMethod`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub user_id: ID,
    pub body: String,
    /// Timestamp in millis of the first (or only) notification
    pub start_ts: i64,
    pub is_repeating: bool,
    /// Minutes between notifications. Only meaningful when `is_repeating`
    pub period_minutes: i64,
    pub contact_method_id: ID,
    /// The scheduler entity notifying for this `Reminder`. It is only
    /// `None` between the row being inserted and the job being scheduled.
    pub job: Option<ReminderJob>,
}

impl Reminder {
    pub fn is_valid(&self) -> bool {
        Self::is_valid_period(self.is_repeating, self.period_minutes)
    }

    /// A repeating `Reminder` needs a positive period that fits in millis
    pub fn is_valid_period(is_repeating: bool, period_minutes: i64) -> bool {
        !is_repeating || (period_minutes > 0 && period_minutes_to_millis(period_minutes).is_some())
    }

    /// A non repeating `Reminder` is in the past once its `start_ts` has been reached
    pub fn is_upcoming(&self, now: i64) -> bool {
        self.is_repeating || self.start_ts > now
    }

    /// `None` when the period does not fit in an `i64` of millis
    pub fn period_millis(&self) -> Option<i64> {
        period_minutes_to_millis(self.period_minutes)
    }

    pub fn job_args(&self) -> ReminderJobArgs {
        ReminderJobArgs {
            reminder_id: self.id,
        }
    }

    pub fn insert_opts(&self) -> InsertOpts {
        InsertOpts {
            scheduled_at: self.start_ts,
        }
    }

    /// The periodic job for this `Reminder`. Its constructor captures the
    /// args and opts at creation time, so later mutations of the `Reminder`
    /// are not picked up until the job is replaced.
    pub fn periodic_job(&self) -> PeriodicJob {
        let args = self.job_args();
        let opts = self.insert_opts();
        let interval = self.period_millis().unwrap_or(i64::MAX);
        PeriodicJob::new(interval, Arc::new(move || (args, opts)))
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
