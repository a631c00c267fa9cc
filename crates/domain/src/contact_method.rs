use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// The channel a `Reminder` is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactChannel {
    Email,
    Sms,
}

impl Display for ContactChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Sms => write!(f, "sms"),
        }
    }
}

impl FromStr for ContactChannel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            _ => Err(anyhow::anyhow!("Unknown contact channel: {}", s)),
        }
    }
}

/// Where and how a `User` wants to be notified
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMethod {
    pub id: ID,
    /// The `User` owning this `ContactMethod`
    pub user_id: ID,
    pub channel: ContactChannel,
    /// Email address or phone number, depending on `channel`
    pub value: String,
}

impl ContactMethod {
    pub fn new(user_id: ID, channel: ContactChannel, value: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            user_id,
            channel,
            value: value.into(),
        }
    }

    pub fn belongs_to(&self, user_id: &ID) -> bool {
        self.user_id == *user_id
    }
}

impl Entity for ContactMethod {
    fn id(&self) -> &ID {
        &self.id
    }
}
