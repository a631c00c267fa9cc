use reminder_sync_domain::{PeriodicJob, PeriodicJobHandle, ReminderJobArgs};
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Mutex,
    },
};

/// A periodic job that is due and should be enqueued on the durable queue
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicOccurrence {
    pub handle: PeriodicJobHandle,
    pub args: ReminderJobArgs,
    pub scheduled_at: i64,
}

/// In-process registry of `PeriodicJob`s. Nothing registered here is
/// persisted: handles are lost when the process exits.
pub trait IPeriodicJobRegistry: Send + Sync {
    fn add(&self, job: PeriodicJob) -> PeriodicJobHandle;
    /// Returns false if no job was registered under the handle
    fn remove(&self, handle: &PeriodicJobHandle) -> bool;
    fn contains(&self, handle: &PeriodicJobHandle) -> bool;
    /// Every job with a run at or before `now` yields one occurrence, and
    /// is moved to its next run after `now`.
    fn due(&self, now: i64) -> Vec<PeriodicOccurrence>;
    fn len(&self) -> usize;
}

struct RegisteredJob {
    job: PeriodicJob,
    next_run_at: i64,
}

pub struct PeriodicJobRegistry {
    jobs: Mutex<BTreeMap<PeriodicJobHandle, RegisteredJob>>,
    sequence: AtomicI64,
}

impl PeriodicJobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }
}

impl Default for PeriodicJobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IPeriodicJobRegistry for PeriodicJobRegistry {
    fn add(&self, job: PeriodicJob) -> PeriodicJobHandle {
        let handle = PeriodicJobHandle(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
        // Runs are anchored at the scheduled time of the constructed job
        let (_, opts) = job.construct();
        let entry = RegisteredJob {
            job,
            next_run_at: opts.scheduled_at,
        };
        self.jobs.lock().unwrap().insert(handle, entry);
        handle
    }

    fn remove(&self, handle: &PeriodicJobHandle) -> bool {
        self.jobs.lock().unwrap().remove(handle).is_some()
    }

    fn contains(&self, handle: &PeriodicJobHandle) -> bool {
        self.jobs.lock().unwrap().contains_key(handle)
    }

    fn due(&self, now: i64) -> Vec<PeriodicOccurrence> {
        let mut jobs = self.jobs.lock().unwrap();
        let mut occurrences = Vec::new();
        for (handle, entry) in jobs.iter_mut() {
            if entry.next_run_at > now {
                continue;
            }
            let interval = entry.job.interval_millis.max(1);
            // Missed runs are collapsed into the latest one
            let missed_periods = now.saturating_sub(entry.next_run_at) / interval;
            let scheduled_at = entry
                .next_run_at
                .saturating_add(missed_periods.saturating_mul(interval));
            // A job whose next run does not fit in an i64 is never due again
            entry.next_run_at = scheduled_at.saturating_add(interval);

            let (args, _) = entry.job.construct();
            occurrences.push(PeriodicOccurrence {
                handle: *handle,
                args,
                scheduled_at,
            });
        }
        occurrences
    }

    fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }
}
