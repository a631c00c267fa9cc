mod bootstrap_periodic_jobs;
mod create_reminder;
mod delete_reminder;
mod enqueue_periodic_jobs;
mod get_reminders;
mod job_sync;
mod send_reminder;
#[cfg(test)]
mod test_helpers;
mod update_reminder;

pub use bootstrap_periodic_jobs::{BootstrapPeriodicJobsUseCase, BootstrapSummary};
pub use create_reminder::{create_reminder_controller, CreateReminderUseCase};
pub use delete_reminder::{delete_reminder_controller, DeleteReminderUseCase, DeletedReminder};
pub use enqueue_periodic_jobs::EnqueuePeriodicJobsUseCase;
pub use get_reminders::{get_reminders_controller, GetRemindersUseCase};
pub use send_reminder::{SendReminderOutcome, SendReminderUseCase};
pub use update_reminder::{update_reminder_controller, UpdateReminderUseCase};
