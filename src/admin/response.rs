//! Admin console response records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dashboard counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardInfo {
    #[serde(default)]
    pub user_count: u64,
    #[serde(default)]
    pub recent_contest_count: u64,
    #[serde(default)]
    pub today_submission_count: u64,
    #[serde(default)]
    pub judge_server_count: u64,
    #[serde(default)]
    pub env: Value,
}

/// One entry of the release notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseNote {
    pub version: String,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Result of an SMTP test or SPJ compile: free-form text or structure
pub type ToolOutput = Value;

/// Generated accounts: the backend answers with a download token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedUsers {
    pub file_id: String,
}
