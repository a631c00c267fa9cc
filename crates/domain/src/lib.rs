mod contact_method;
mod job;
mod reminder;
mod shared;
mod user;

pub use contact_method::{ContactChannel, ContactMethod};
pub use job::{
    DurableJob, InsertOpts, JobState, PeriodicJob, PeriodicJobConstructor, PeriodicJobHandle,
    ReminderJobArgs,
};
pub use reminder::{JobTeardown, Reminder, ReminderJob};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::User;
