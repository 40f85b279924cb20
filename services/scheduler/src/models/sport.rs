//! Sport record and payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Whether a sport is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SportStatus {
    #[default]
    Active,
    Inactive,
}

impl SportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SportStatus::Active => "Active",
            SportStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for SportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(SportStatus::Active),
            "Inactive" => Ok(SportStatus::Inactive),
            other => Err(format!("unknown sport status '{}'", other)),
        }
    }
}

/// Sport entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub id: Uuid,
    pub name: String,
    pub status: SportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sport {
    /// A freshly created, active sport
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: SportStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body for adding or renaming a sport
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SportInput {
    #[serde(default)]
    pub name: String,
}
