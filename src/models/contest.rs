//! Contest records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::CreatedBy;

/// Contest access type as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContestType {
    #[serde(rename = "Public")]
    Public,
    #[serde(rename = "Password Protected")]
    PasswordProtected,
}

/// Contest lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestStatus {
    NotStarted,
    Underway,
    Ended,
}

impl ContestStatus {
    /// Backend wire code (`"1"`, `"0"`, `"-1"`)
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotStarted => "1",
            Self::Underway => "0",
            Self::Ended => "-1",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::NotStarted),
            "0" => Some(Self::Underway),
            "-1" => Some(Self::Ended),
            _ => None,
        }
    }
}

/// Contest as the backend serializes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestInfo {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub rule_type: Option<String>,
    #[serde(default)]
    pub contest_type: Option<ContestType>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub real_time_rank: bool,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub created_by: Option<CreatedBy>,
    /// Only present for admins
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub allowed_ip_ranges: Vec<String>,
}

impl ContestInfo {
    /// Status as of `now`, computed from the contest window
    pub fn status_at(&self, now: DateTime<Utc>) -> ContestStatus {
        if now < self.start_time {
            ContestStatus::NotStarted
        } else if now < self.end_time {
            ContestStatus::Underway
        } else {
            ContestStatus::Ended
        }
    }

    /// Get current status of the contest
    pub fn current_status(&self) -> ContestStatus {
        self.status
            .as_deref()
            .and_then(ContestStatus::from_code)
            .unwrap_or_else(|| self.status_at(Utc::now()))
    }

    pub fn is_password_protected(&self) -> bool {
        self.contest_type == Some(ContestType::PasswordProtected)
    }
}

/// Result of `contest/access` and `contest/password`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestAccess {
    pub access: bool,
}
