use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr, sync::Arc};

/// Arguments carried by every job scheduled for a `Reminder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderJobArgs {
    pub reminder_id: ID,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOpts {
    /// Timestamp in millis at which the job becomes available to workers
    pub scheduled_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Available,
    Running,
    Completed,
    Cancelled,
    Discarded,
}

impl JobState {
    /// A finalized job will never be picked up by a worker again
    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Discarded)
    }
}

impl Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Available => "available",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Discarded => "discarded",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for JobState {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "discarded" => Ok(Self::Discarded),
            _ => Err(anyhow::anyhow!("Unknown job state: {}", s)),
        }
    }
}

/// A one-shot job persisted by the durable job queue. It survives restarts
/// and is identified by an id assigned by the queue's store.
#[derive(Debug, Clone, PartialEq)]
pub struct DurableJob {
    pub id: ID,
    pub args: ReminderJobArgs,
    pub scheduled_at: i64,
    pub state: JobState,
    /// Number of times a worker has picked up this job
    pub attempt: i32,
    pub errors: Vec<String>,
    pub created_at: i64,
    pub finalized_at: Option<i64>,
}

impl DurableJob {
    pub fn new(args: ReminderJobArgs, opts: &InsertOpts, created_at: i64) -> Self {
        Self {
            id: Default::default(),
            args,
            scheduled_at: opts.scheduled_at,
            state: JobState::Available,
            attempt: 0,
            errors: Vec::new(),
            created_at,
            finalized_at: None,
        }
    }

    pub fn is_due(&self, now: i64) -> bool {
        self.state == JobState::Available && self.scheduled_at <= now
    }
}

impl Entity for DurableJob {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Handle of a job registered in the in-process periodic registry.
/// Only valid for the lifetime of the process that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodicJobHandle(pub i64);

impl Display for PeriodicJobHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type PeriodicJobConstructor = Arc<dyn Fn() -> (ReminderJobArgs, InsertOpts) + Send + Sync>;

/// A job that is enqueued again every `interval_millis`
#[derive(Clone)]
pub struct PeriodicJob {
    pub interval_millis: i64,
    pub constructor: PeriodicJobConstructor,
}

impl PeriodicJob {
    pub fn new(interval_millis: i64, constructor: PeriodicJobConstructor) -> Self {
        Self {
            interval_millis,
            constructor,
        }
    }

    pub fn construct(&self) -> (ReminderJobArgs, InsertOpts) {
        (self.constructor)()
    }
}

impl std::fmt::Debug for PeriodicJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (args, opts) = self.construct();
        f.debug_struct("PeriodicJob")
            .field("interval_millis", &self.interval_millis)
            .field("args", &args)
            .field("opts", &opts)
            .finish()
    }
}
