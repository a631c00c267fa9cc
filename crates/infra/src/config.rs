use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

fn parse_environment(value: Option<&str>) -> Environment {
    match value {
        Some("prod") => Environment::Prod,
        Some("dev") => Environment::Dev,
        Some(other) => {
            warn!("Unknown ENV: {}, falling back to dev.", other);
            Environment::Dev
        }
        None => {
            info!("Did not find ENV environment variable. Running as dev.");
            Environment::Dev
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub env: Environment,
    /// How often the worker looks for durable jobs that are due
    pub job_poll_interval_millis: u64,
    /// How often the periodic registry is asked for jobs to enqueue
    pub periodic_tick_interval_millis: u64,
    /// Maximum number of durable jobs claimed by a single poll
    pub job_fetch_limit: usize,
}

fn parse_env_var<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default value: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let env = parse_environment(std::env::var("ENV").ok().as_deref());

        Self {
            env,
            job_poll_interval_millis: parse_env_var("JOB_POLL_INTERVAL_MS", 1000),
            periodic_tick_interval_millis: parse_env_var("PERIODIC_TICK_INTERVAL_MS", 1000),
            job_fetch_limit: parse_env_var("JOB_FETCH_LIMIT", 50),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
