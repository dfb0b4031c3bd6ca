//! Announcement records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::CreatedBy;

/// Site or contest announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_update_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<CreatedBy>,
    /// Set for contest announcements
    #[serde(default)]
    pub contest: Option<u64>,
}
