mod notifier;

pub use notifier::{INotifier, LogNotifier};
