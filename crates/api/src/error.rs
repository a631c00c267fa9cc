use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ReminderSyncError {
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("Invalid data provided: Error message: `{0}`")]
    Validation(String),
    #[error("Storage failure. Error message: `{0}`")]
    Storage(String),
    #[error("Job scheduler failure. Error message: `{0}`")]
    Scheduler(String),
}
