use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::IdentityError;

/// Authentication provider backing an identity binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Onsite,
    Twitter,
    Google,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Onsite => "onsite",
            Provider::Twitter => "twitter",
            Provider::Google => "google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onsite" => Ok(Provider::Onsite),
            "twitter" => Ok(Provider::Twitter),
            "google" => Ok(Provider::Google),
            other => Err(IdentityError::Validation(format!("unknown provider: {}", other))),
        }
    }
}

/// Input for linking a provider identity to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBinding {
    pub user_id: i32,
    #[serde(default)]
    pub provider: Provider,
    pub provider_identifier: String,
}

/// A persisted user-to-provider-identity binding (business view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityBinding {
    pub id: i32,
    pub user_id: i32,
    pub provider: Provider,
    pub provider_identifier: String,
}

/// User account view owned by the external user collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub name: String,
}
